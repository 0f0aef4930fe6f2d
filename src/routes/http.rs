//! HTTP endpoint handlers: the report/score query contract plus the bank
//! listing. Thin wrappers that forward to the live widget instances.

use std::sync::Arc;
use axum::{
  extract::{Query, State},
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use tracing::{info, instrument};

use crate::protocol::*;
use crate::state::AppState;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state))]
pub async fn http_get_questions(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  let bank = state.list_questions().await;
  info!(target: "question", count = bank.len(), "HTTP question listing served");
  Json(bank.iter().map(to_question_out).collect::<Vec<_>>())
}

#[instrument(level = "info", skip(state), fields(%q.widget_id))]
pub async fn http_get_report(
  State(state): State<Arc<AppState>>,
  Query(q): Query<WidgetQuery>,
) -> Response {
  match state.with_widget(&q.widget_id, |w| w.report()).await {
    Some(statement) => {
      info!(target: "question", widget_id = %q.widget_id, "HTTP report served");
      Json(ReportOut { statement }).into_response()
    }
    None => unknown_widget(&q.widget_id),
  }
}

#[instrument(level = "info", skip(state), fields(%q.widget_id))]
pub async fn http_get_score(
  State(state): State<Arc<AppState>>,
  Query(q): Query<WidgetQuery>,
) -> Response {
  match state.with_widget(&q.widget_id, |w| w.score()).await {
    Some(score) => Json(ScoreOut { score }).into_response(),
    None => unknown_widget(&q.widget_id),
  }
}

#[instrument(level = "info", skip(state), fields(%q.widget_id))]
pub async fn http_get_max_score(
  State(state): State<Arc<AppState>>,
  Query(q): Query<WidgetQuery>,
) -> Response {
  match state.with_widget(&q.widget_id, |w| w.max_score()).await {
    Some(max_score) => Json(MaxScoreOut { max_score }).into_response(),
    None => unknown_widget(&q.widget_id),
  }
}

fn unknown_widget(widget_id: &str) -> Response {
  (
    StatusCode::NOT_FOUND,
    Json(ErrorOut { message: format!("Unknown widgetId: {}", widget_id) }),
  )
    .into_response()
}
