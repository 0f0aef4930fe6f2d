//! Seed data: built-in questions so the service is useful even without an
//! external bank file.

use uuid::Uuid;

use crate::domain::{QuestionParams, QuestionSource};

/// Minimal set of built-in questions covering both policy branches.
pub fn seed_questions() -> Vec<QuestionParams> {
  vec![
    QuestionParams {
      id: "q-reflect".into(),
      source: QuestionSource::Seed,
      prompt: "<p>What did you take away from this module?</p>".into(),
      max_score: 5,
      ..QuestionParams::default()
    },
    QuestionParams {
      id: "q-improve".into(),
      source: QuestionSource::Seed,
      prompt: "<p>Describe one thing you would improve, and why.</p>".into(),
      is_required: true,
      ..QuestionParams::default()
    },
  ]
}

/// Absolute last-resort fallback: a question built entirely from the stock
/// defaults, used when a host attaches with no usable bank.
pub fn fallback_question() -> QuestionParams {
  QuestionParams { id: Uuid::new_v4().to_string(), ..QuestionParams::default() }
}
