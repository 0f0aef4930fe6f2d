//! The question widget itself: owns widget state, wires submit/skip/blur to
//! the gate and the report builder, and keeps the editor surface consistent
//! with host resize/hide signals.
//!
//! All transitions run synchronously inside one message dispatch. The widget
//! never talks to the transport directly; it emits [`WidgetEvent`]s through a
//! composed [`Emitter`] and the routes layer drains them after each dispatch.

use tracing::{debug, instrument, warn};

use crate::domain::{EventKind, QuestionParams};
use crate::editor::{EditorAdapter, EditorCommand};
use crate::gate::{evaluate_submit, SubmitOutcome};
use crate::report::{build_report, InteractionReport};

/// Container width (in em, approximated by width / font-size) at or below
/// which the submit button drops its label for the icon-only compact form.
const WIDTH_TO_EM_THRESHOLD: f32 = 23.0;

/// Events the widget emits toward the host channel.
#[derive(Clone, Debug, PartialEq)]
pub enum WidgetEvent {
  /// Command for the host-side editor surface.
  Editor(EditorCommand),
  /// Show or hide the required-answer warning banner.
  RequiredMessage { visible: bool },
  /// New label for the submit button (empty in the compact form).
  SubmitLabel { label: String },
  /// Report-ready event. Emitted on submit, skip and editor blur; blur is
  /// never accompanied by `Continue`.
  Statement(InteractionReport),
  /// Advance to the next question. Emitted only after the gate allowed a
  /// submit, or on skip.
  Continue,
}

/// Event emission capability held by the widget. Events collect in emission
/// order; the transport drains them after each dispatch.
#[derive(Default)]
pub struct Emitter {
  pending: Vec<WidgetEvent>,
}

impl Emitter {
  pub fn emit(&mut self, event: WidgetEvent) {
    self.pending.push(event);
  }

  pub fn drain(&mut self) -> Vec<WidgetEvent> {
    std::mem::take(&mut self.pending)
  }
}

/// Mutable widget state. `attached` flips to true exactly once and never
/// reverts; `completed` records that a continue signal has been emitted.
#[derive(Clone, Copy, Debug, Default)]
pub struct WidgetState {
  pub attached: bool,
  pub required_message_visible: bool,
  pub completed: bool,
}

/// Container measurements delivered with a host resize signal. The host owns
/// the container, so the numbers are measured on its side.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResizeMetrics {
  pub width: f32,
  pub font_size: f32,
  pub input_height: f32,
  pub visible: bool,
}

/// One free-text question instance.
pub struct QuestionWidget {
  params: QuestionParams,
  state: WidgetState,
  editor: EditorAdapter,
  events: Emitter,
  // Kept so the editor's created event can run the initial sizing pass.
  last_resize: Option<ResizeMetrics>,
}

impl QuestionWidget {
  pub fn new(params: QuestionParams) -> Self {
    let editor = EditorAdapter::new(params.placeholder.clone());
    Self { params, state: WidgetState::default(), editor, events: Emitter::default(), last_resize: None }
  }

  pub fn params(&self) -> &QuestionParams {
    &self.params
  }

  pub fn state(&self) -> WidgetState {
    self.state
  }

  /// Drain events emitted since the last dispatch, in order.
  pub fn take_events(&mut self) -> Vec<WidgetEvent> {
    self.events.drain()
  }

  /// Host attachment. Expected once per instance; activates responsiveness.
  #[instrument(level = "debug", skip(self), fields(id = %self.params.id))]
  pub fn attach(&mut self) {
    self.state.attached = true;
    debug!(target: "question", id = %self.params.id, "Widget attached");
  }

  /// First interaction with the input region: lazily bring up the editor.
  pub fn handle_first_interaction(&mut self) {
    if let Some(cmd) = self.editor.on_first_interaction() {
      self.events.emit(WidgetEvent::Editor(cmd));
    }
  }

  /// The editor surface finished coming up; run the initial sizing pass with
  /// the last known measurements.
  pub fn handle_editor_ready(&mut self) {
    if let Some(metrics) = self.last_resize {
      self.apply_resize(metrics);
    }
  }

  /// Content mirrored from the surface while the learner types.
  pub fn handle_editor_input(&mut self, content: String) {
    self.editor.record_content(content);
  }

  /// The learner left the input surface. Reports the interaction, but must
  /// never advance the learner.
  #[instrument(level = "debug", skip(self, content), fields(id = %self.params.id, content_len = content.len()))]
  pub fn handle_editor_blur(&mut self, content: String) {
    self.editor.record_content(content);
    let report = build_report(EventKind::Interacted, &self.params, self.editor.current_content());
    self.events.emit(WidgetEvent::Statement(report));
  }

  /// Host resize signal: re-evaluate the footer compaction and forward the
  /// new size to the editor surface. A no-op before attachment.
  #[instrument(level = "debug", skip(self), fields(id = %self.params.id))]
  pub fn handle_resize(&mut self, metrics: ResizeMetrics) {
    if !self.state.attached {
      return;
    }
    self.last_resize = Some(metrics);
    self.apply_resize(metrics);
  }

  fn apply_resize(&mut self, metrics: ResizeMetrics) {
    let label = submit_label(metrics.width, metrics.font_size, &self.params.locale.submit_label);
    self.events.emit(WidgetEvent::SubmitLabel { label });
    if let Some(cmd) = self.editor.on_host_resize(metrics.input_height, metrics.visible) {
      self.events.emit(WidgetEvent::Editor(cmd));
    }
  }

  /// Submit action: consult the gate, then either warn or report-and-continue.
  #[instrument(level = "debug", skip(self), fields(id = %self.params.id))]
  pub fn handle_submit(&mut self) {
    let content = self.editor.current_content().to_string();
    match evaluate_submit(&content, self.params.is_required) {
      SubmitOutcome::Block => {
        self.state.required_message_visible = true;
        self.events.emit(WidgetEvent::RequiredMessage { visible: true });
        debug!(target: "question", id = %self.params.id, "Submit blocked by required policy");
      }
      SubmitOutcome::Allow => {
        let report = build_report(EventKind::Answered, &self.params, &content);
        self.events.emit(WidgetEvent::Statement(report));
        self.events.emit(WidgetEvent::Continue);
        self.state.completed = true;
        debug!(target: "question", id = %self.params.id, content_len = content.len(), "Submit answered");
      }
    }
  }

  /// Skip action. Only offered when the question is not required; bypasses
  /// the gate entirely.
  #[instrument(level = "debug", skip(self), fields(id = %self.params.id))]
  pub fn handle_skip(&mut self) {
    if self.params.is_required {
      warn!(target: "question", id = %self.params.id, "Skip on a required question ignored");
      return;
    }
    let report = build_report(EventKind::Interacted, &self.params, self.editor.current_content());
    self.events.emit(WidgetEvent::Statement(report));
    self.events.emit(WidgetEvent::Continue);
    self.state.completed = true;
  }

  /// Dismiss the warning banner. No other state change.
  pub fn handle_dismiss_warning(&mut self) {
    self.state.required_message_visible = false;
    self.events.emit(WidgetEvent::RequiredMessage { visible: false });
  }

  /// Host hide signal: tear the editor surface down. Idempotent.
  #[instrument(level = "debug", skip(self), fields(id = %self.params.id))]
  pub fn handle_hide(&mut self) {
    if let Some(cmd) = self.editor.on_host_hide() {
      self.events.emit(WidgetEvent::Editor(cmd));
    }
  }

  /// Current report, built fresh from the current response content. Safe to
  /// call at any time; no side effects.
  pub fn report(&self) -> InteractionReport {
    build_report(EventKind::Answered, &self.params, self.editor.current_content())
  }

  /// Always the ungraded sentinel: the response is graded manually
  /// downstream, and `None` keeps "not yet graded" distinct from zero.
  pub fn score(&self) -> Option<u32> {
    None
  }

  pub fn max_score(&self) -> u32 {
    self.params.max_score
  }
}

/// Footer compaction: icon-only submit button in narrow containers. The
/// width-to-font-size ratio approximates the container width in em.
fn submit_label(width: f32, font_size: f32, full_label: &str) -> String {
  if width / font_size <= WIDTH_TO_EM_THRESHOLD {
    String::new()
  } else {
    full_label.to_string()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn optional_params() -> QuestionParams {
    QuestionParams { id: "q1".into(), prompt: "Describe X".into(), max_score: 5, ..QuestionParams::default() }
  }

  fn required_params() -> QuestionParams {
    QuestionParams { is_required: true, ..optional_params() }
  }

  fn attached(params: QuestionParams) -> QuestionWidget {
    let mut widget = QuestionWidget::new(params);
    widget.attach();
    widget
  }

  fn continues(events: &[WidgetEvent]) -> usize {
    events.iter().filter(|e| **e == WidgetEvent::Continue).count()
  }

  #[test]
  fn skip_always_continues_with_interacted_report() {
    let mut widget = attached(optional_params());
    widget.handle_first_interaction();
    widget.handle_editor_input("whatever the learner wrote".into());
    widget.take_events();

    widget.handle_skip();
    let events = widget.take_events();
    assert_eq!(continues(&events), 1);
    match &events[0] {
      WidgetEvent::Statement(report) => assert_eq!(report.event, EventKind::Interacted),
      other => panic!("expected statement first, got {other:?}"),
    }
    assert!(widget.state().completed);
  }

  #[test]
  fn skip_on_required_question_is_ignored() {
    let mut widget = attached(required_params());
    widget.handle_skip();
    assert!(widget.take_events().is_empty());
    assert!(!widget.state().completed);
  }

  #[test]
  fn submit_blocks_required_question_with_response() {
    let mut widget = attached(required_params());
    widget.handle_first_interaction();
    widget.handle_editor_input("hello".into());
    widget.take_events();

    widget.handle_submit();
    let events = widget.take_events();
    assert_eq!(events, vec![WidgetEvent::RequiredMessage { visible: true }]);
    assert_eq!(continues(&events), 0);
    assert!(widget.state().required_message_visible);
    assert!(!widget.state().completed);
  }

  #[test]
  fn submit_allows_required_question_with_empty_response() {
    let mut widget = attached(required_params());
    widget.handle_first_interaction();
    widget.handle_editor_input(String::new());
    widget.take_events();

    widget.handle_submit();
    let events = widget.take_events();
    assert_eq!(continues(&events), 1);
    match &events[0] {
      WidgetEvent::Statement(report) => assert_eq!(report.event, EventKind::Answered),
      other => panic!("expected statement first, got {other:?}"),
    }
    assert!(widget.state().completed);
  }

  #[test]
  fn submit_scenario_reports_response_and_ungraded_score() {
    let mut widget = attached(optional_params());
    widget.handle_first_interaction();
    widget.handle_editor_input("hello".into());
    widget.take_events();

    widget.handle_submit();
    let events = widget.take_events();
    let report = match &events[0] {
      WidgetEvent::Statement(report) => report,
      other => panic!("expected statement first, got {other:?}"),
    };
    assert_eq!(report.response, "hello");
    assert_eq!(report.score.max, 5);
    assert_eq!(report.score.raw, None);
    assert_eq!(report.event, EventKind::Answered);
    assert_eq!(continues(&events), 1);
  }

  #[test]
  fn report_is_idempotent() {
    let mut widget = attached(optional_params());
    widget.handle_first_interaction();
    widget.handle_editor_input("draft".into());
    let first = widget.report();
    let second = widget.report();
    assert_eq!(first, second);
    assert!(widget.take_events().iter().all(|e| !matches!(e, WidgetEvent::Statement(_))));
  }

  #[test]
  fn report_uses_placeholder_before_editor_exists() {
    let widget = QuestionWidget::new(optional_params());
    assert_eq!(widget.report().response, "Enter your response here");
  }

  #[test]
  fn score_is_always_the_ungraded_sentinel() {
    let mut widget = attached(optional_params());
    assert_eq!(widget.score(), None);
    widget.handle_submit();
    assert_eq!(widget.score(), None);
    assert_eq!(widget.max_score(), 5);
  }

  #[test]
  fn resize_before_attach_is_a_noop() {
    let mut widget = QuestionWidget::new(optional_params());
    widget.handle_resize(ResizeMetrics { width: 400.0, font_size: 10.0, input_height: 100.0, visible: true });
    assert!(widget.take_events().is_empty());
  }

  #[test]
  fn resize_compacts_and_restores_submit_label() {
    let mut widget = attached(optional_params());
    widget.handle_resize(ResizeMetrics { width: 100.0, font_size: 10.0, input_height: 100.0, visible: true });
    let events = widget.take_events();
    assert_eq!(events, vec![WidgetEvent::SubmitLabel { label: String::new() }]);

    widget.handle_resize(ResizeMetrics { width: 400.0, font_size: 10.0, input_height: 100.0, visible: true });
    let events = widget.take_events();
    assert_eq!(events, vec![WidgetEvent::SubmitLabel { label: "Answer and proceed".into() }]);
  }

  #[test]
  fn resize_forwards_to_editor_only_while_visible() {
    let mut widget = attached(optional_params());
    widget.handle_first_interaction();
    widget.take_events();

    widget.handle_resize(ResizeMetrics { width: 400.0, font_size: 16.0, input_height: 120.0, visible: false });
    let events = widget.take_events();
    assert!(events.iter().all(|e| !matches!(e, WidgetEvent::Editor(_))));

    widget.handle_resize(ResizeMetrics { width: 400.0, font_size: 16.0, input_height: 120.0, visible: true });
    let events = widget.take_events();
    assert!(events.contains(&WidgetEvent::Editor(EditorCommand::Resize { width: None, height: 116.0 })));
  }

  #[test]
  fn editor_ready_runs_initial_sizing_pass() {
    let mut widget = attached(optional_params());
    widget.handle_resize(ResizeMetrics { width: 400.0, font_size: 16.0, input_height: 120.0, visible: true });
    widget.handle_first_interaction();
    widget.take_events();

    widget.handle_editor_ready();
    let events = widget.take_events();
    assert!(events.contains(&WidgetEvent::Editor(EditorCommand::Resize { width: None, height: 116.0 })));
  }

  #[test]
  fn editor_ready_without_measurements_is_a_noop() {
    let mut widget = attached(optional_params());
    widget.handle_first_interaction();
    widget.take_events();
    widget.handle_editor_ready();
    assert!(widget.take_events().is_empty());
  }

  #[test]
  fn hide_twice_destroys_once() {
    let mut widget = attached(optional_params());
    widget.handle_first_interaction();
    widget.take_events();

    widget.handle_hide();
    assert_eq!(widget.take_events(), vec![WidgetEvent::Editor(EditorCommand::Destroy)]);
    widget.handle_hide();
    assert!(widget.take_events().is_empty());
  }

  #[test]
  fn blur_reports_interacted_without_continue() {
    let mut widget = attached(optional_params());
    widget.handle_first_interaction();
    widget.take_events();

    widget.handle_editor_blur("partial thought".into());
    let events = widget.take_events();
    assert_eq!(continues(&events), 0);
    match &events[0] {
      WidgetEvent::Statement(report) => {
        assert_eq!(report.event, EventKind::Interacted);
        assert_eq!(report.response, "partial thought");
      }
      other => panic!("expected statement, got {other:?}"),
    }
    assert!(!widget.state().completed);
  }

  #[test]
  fn dismiss_hides_the_warning_banner() {
    let mut widget = attached(required_params());
    widget.handle_first_interaction();
    widget.handle_editor_input("hello".into());
    widget.handle_submit();
    widget.take_events();

    widget.handle_dismiss_warning();
    assert_eq!(widget.take_events(), vec![WidgetEvent::RequiredMessage { visible: false }]);
    assert!(!widget.state().required_message_visible);
  }

  #[test]
  fn compaction_threshold() {
    assert_eq!(submit_label(100.0, 10.0, "Answer and proceed"), "");
    assert_eq!(submit_label(230.0, 10.0, "Answer and proceed"), "");
    assert_eq!(submit_label(400.0, 10.0, "Answer and proceed"), "Answer and proceed");
  }
}
