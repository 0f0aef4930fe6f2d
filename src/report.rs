//! Interaction-report construction. Pure: {event kind, question parameters,
//! response content} in, a fresh serializable statement out. Reports are
//! rebuilt on every request since the response may change between calls.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::{EventKind, QuestionParams};

/// Statement format revision reported to consumers.
pub const REPORT_VERSION: &str = "1.0.0";

/// Declared interaction category; fixed for free-text capture.
pub const INTERACTION_TYPE: &str = "fill-in";

/// Activity-type identifier (ADL cmi.interaction vocabulary).
pub const ACTIVITY_TYPE: &str = "http://adlnet.gov/expapi/activities/cmi.interaction";

/// Extension key carrying the widget machine name.
pub const MACHINE_NAME_KEY: &str = "https://freetext.app/x-api/machine-name";

/// Machine name identifying this widget type in reports.
pub const MACHINE_NAME: &str = "FreeTextQuestion";

/// Reports do not track the configured language; description entries are
/// keyed by this fixed tag.
pub const DESCRIPTION_LANGUAGE: &str = "en-US";

/// Score block of a report. `raw` stays absent until a human grades the
/// response downstream; the reporting layer relies on absent being distinct
/// from a graded zero.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReportScore {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub raw: Option<f64>,
  pub max: u32,
  pub scored: bool,
}

/// The structured record describing a single question attempt, consumed by
/// the host's reporting layer.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionReport {
  pub version: &'static str,
  pub event: EventKind,
  pub interaction_type: &'static str,
  pub activity_type: &'static str,
  /// Single-entry mapping keyed by [`DESCRIPTION_LANGUAGE`].
  pub description: BTreeMap<String, String>,
  pub extensions: BTreeMap<&'static str, &'static str>,
  pub score: ReportScore,
  pub response: String,
}

/// Build a fresh report from the current response content.
pub fn build_report(event: EventKind, params: &QuestionParams, response: &str) -> InteractionReport {
  let mut description = BTreeMap::new();
  description.insert(DESCRIPTION_LANGUAGE.to_string(), params.prompt.clone());

  let mut extensions = BTreeMap::new();
  extensions.insert(MACHINE_NAME_KEY, MACHINE_NAME);

  InteractionReport {
    version: REPORT_VERSION,
    event,
    interaction_type: INTERACTION_TYPE,
    activity_type: ACTIVITY_TYPE,
    description,
    extensions,
    score: ReportScore { raw: None, max: params.max_score, scored: false },
    response: response.to_string(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::QuestionParams;

  fn params() -> QuestionParams {
    QuestionParams {
      id: "q1".into(),
      prompt: "Describe X".into(),
      max_score: 5,
      ..QuestionParams::default()
    }
  }

  #[test]
  fn raw_score_is_absent_not_zero() {
    let report = build_report(EventKind::Answered, &params(), "hello");
    assert_eq!(report.score.raw, None);
    assert_eq!(report.score.max, 5);
    assert!(!report.score.scored);

    // Absent must also hold on the wire: no "raw" key at all.
    let json = serde_json::to_value(&report).unwrap();
    assert!(json["score"].get("raw").is_none());
    assert_eq!(json["score"]["max"], 5);
  }

  #[test]
  fn fixed_wire_constants() {
    let report = build_report(EventKind::Answered, &params(), "");
    assert_eq!(report.interaction_type, "fill-in");
    assert_eq!(report.activity_type, ACTIVITY_TYPE);
    assert_eq!(report.extensions.get(MACHINE_NAME_KEY), Some(&MACHINE_NAME));
  }

  #[test]
  fn description_keyed_by_fixed_language_tag() {
    let mut p = params();
    p.locale.language = "nb".into();
    let report = build_report(EventKind::Answered, &p, "");
    assert_eq!(report.description.len(), 1);
    assert_eq!(report.description.get("en-US"), Some(&"Describe X".to_string()));
  }

  #[test]
  fn response_and_event_flow_through() {
    let report = build_report(EventKind::Interacted, &params(), "hello");
    assert_eq!(report.response, "hello");
    assert_eq!(report.event, EventKind::Interacted);
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["event"], "interacted");
  }

  #[test]
  fn rebuilding_is_deterministic() {
    let a = build_report(EventKind::Answered, &params(), "same");
    let b = build_report(EventKind::Answered, &params(), "same");
    assert_eq!(a, b);
  }
}
