//! Loading the question bank from TOML.
//!
//! See `BankConfig` and `QuestionCfg` for the expected schema. Every field of
//! an entry is optional; missing fields fall back to the stock defaults so a
//! bank file only has to state what it overrides.

use serde::Deserialize;
use tracing::{error, info};
use uuid::Uuid;

use crate::domain::{LocaleStrings, QuestionParams, QuestionSource};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct BankConfig {
  #[serde(default)]
  pub questions: Vec<QuestionCfg>,
}

/// Question entry accepted in TOML configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct QuestionCfg {
  #[serde(default)] pub id: Option<String>,
  #[serde(default)] pub prompt: Option<String>,
  #[serde(default)] pub placeholder: Option<String>,
  #[serde(default)] pub max_score: Option<u32>,
  #[serde(default)] pub is_required: Option<bool>,
  #[serde(default)] pub locale: Option<LocaleCfg>,
}

/// Locale overrides accepted per question entry.
#[derive(Clone, Debug, Deserialize, Default)]
pub struct LocaleCfg {
  #[serde(default)] pub required_label: Option<String>,
  #[serde(default)] pub required_message: Option<String>,
  #[serde(default)] pub skip_label: Option<String>,
  #[serde(default)] pub submit_label: Option<String>,
  #[serde(default)] pub language: Option<String>,
}

impl QuestionCfg {
  /// Merge the entry over the stock defaults into full parameters.
  pub fn into_params(self) -> QuestionParams {
    let defaults = QuestionParams::default();
    let locale_defaults = LocaleStrings::default();
    let locale = self.locale.unwrap_or_default();
    QuestionParams {
      id: self.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
      source: QuestionSource::LocalBank,
      prompt: self.prompt.unwrap_or(defaults.prompt),
      placeholder: self.placeholder.unwrap_or(defaults.placeholder),
      max_score: self.max_score.unwrap_or(defaults.max_score),
      is_required: self.is_required.unwrap_or(defaults.is_required),
      locale: LocaleStrings {
        required_label: locale.required_label.unwrap_or(locale_defaults.required_label),
        required_message: locale.required_message.unwrap_or(locale_defaults.required_message),
        skip_label: locale.skip_label.unwrap_or(locale_defaults.skip_label),
        submit_label: locale.submit_label.unwrap_or(locale_defaults.submit_label),
        language: locale.language.unwrap_or(locale_defaults.language),
      },
    }
  }
}

/// Attempt to load `BankConfig` from QUESTION_BANK_PATH. On any parsing/IO
/// error, returns None.
pub fn load_bank_config_from_env() -> Option<BankConfig> {
  let path = std::env::var("QUESTION_BANK_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<BankConfig>(&s) {
      Ok(cfg) => {
        info!(target: "freetext_backend", %path, "Loaded question bank (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "freetext_backend", %path, error = %e, "Failed to parse TOML question bank");
        None
      }
    },
    Err(e) => {
      error!(target: "freetext_backend", %path, error = %e, "Failed to read TOML question bank file");
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn entry_fields_default_when_missing() {
    let cfg: BankConfig = toml::from_str(
      r#"
      [[questions]]
      id = "q-custom"
      prompt = "Describe your day."
      is_required = true
      "#,
    )
    .unwrap();
    assert_eq!(cfg.questions.len(), 1);
    let params = cfg.questions[0].clone().into_params();
    assert_eq!(params.id, "q-custom");
    assert_eq!(params.prompt, "Describe your day.");
    assert!(params.is_required);
    assert_eq!(params.max_score, 1);
    assert_eq!(params.placeholder, "Enter your response here");
    assert_eq!(params.locale.submit_label, "Answer and proceed");
    assert_eq!(params.source, QuestionSource::LocalBank);
  }

  #[test]
  fn locale_overrides_merge_over_defaults() {
    let cfg: BankConfig = toml::from_str(
      r#"
      [[questions]]
      prompt = "Beskriv dagen din."
      [questions.locale]
      submit_label = "Svar og fortsett"
      language = "nb"
      "#,
    )
    .unwrap();
    let params = cfg.questions[0].clone().into_params();
    assert_eq!(params.locale.submit_label, "Svar og fortsett");
    assert_eq!(params.locale.language, "nb");
    assert_eq!(params.locale.skip_label, "Skip Question");
    // Missing id gets generated.
    assert!(!params.id.is_empty());
  }

  #[test]
  fn empty_bank_parses() {
    let cfg: BankConfig = toml::from_str("").unwrap();
    assert!(cfg.questions.is_empty());
  }
}
