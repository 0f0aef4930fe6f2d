//! Domain models used by the backend: question source, locale strings, and
//! the per-instance question parameters.

use serde::{Deserialize, Serialize};

/// Where did we get the question from?
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum QuestionSource {
  LocalBank,   // from user-provided TOML bank
  Seed,  // built-in seeds (last resort)
}

/// Kind of interaction event reported toward the host. `Answered` is only
/// emitted on a submit that passed the gate; `Interacted` covers skip and
/// editor blur.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
  Answered,
  Interacted,
}

/// Localized labels rendered around the input surface. Overridable per
/// question in the TOML bank.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocaleStrings {
  pub required_label: String,
  pub required_message: String,
  pub skip_label: String,
  pub submit_label: String,
  pub language: String,
}

impl Default for LocaleStrings {
  fn default() -> Self {
    Self {
      required_label: "required".into(),
      required_message: "This question requires an answer".into(),
      skip_label: "Skip Question".into(),
      submit_label: "Answer and proceed".into(),
      language: "en".into(),
    }
  }
}

/// Immutable parameters for one question instance. Read-only for the whole
/// life of a widget; a skip action is offered iff `is_required` is false.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QuestionParams {
  pub id: String,
  pub source: QuestionSource,

  /// Rich-text prompt shown above the input surface.
  pub prompt: String,
  /// Shown in the input surface until the learner writes something; also
  /// stands in for content when the editor never came up.
  pub placeholder: String,
  pub max_score: u32,
  pub is_required: bool,
  pub locale: LocaleStrings,
}

impl Default for QuestionParams {
  fn default() -> Self {
    Self {
      id: String::new(),
      source: QuestionSource::Seed,
      prompt: "Question or description".into(),
      placeholder: "Enter your response here".into(),
      max_score: 1,
      is_required: false,
      locale: LocaleStrings::default(),
    }
  }
}
