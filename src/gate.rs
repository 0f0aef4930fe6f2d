//! Required-answer gate: the submit-time decision on whether the learner
//! may proceed or must be shown the corrective message.

/// Outcome of a submit attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
  /// Emit the answered statement and signal continue.
  Allow,
  /// Show the required message and stay in editing.
  Block,
}

/// Decide whether a submit may proceed. Blocks exactly when the question is
/// required and a response is present. The skip path never consults this
/// gate.
pub fn evaluate_submit(response: &str, is_required: bool) -> SubmitOutcome {
  if is_required && !response.is_empty() {
    SubmitOutcome::Block
  } else {
    SubmitOutcome::Allow
  }
}
