//! WebSocket upgrade + message loop. Each host signal is parsed as JSON,
//! dispatched into the widget core, and the events the widget emitted during
//! that dispatch are sent back in order.

use std::sync::Arc;
use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use tracing::{debug, error, info, instrument};

use crate::protocol::{to_view, ClientWsMessage, ServerWsMessage};
use crate::state::AppState;
use crate::widget::{QuestionWidget, ResizeMetrics, WidgetEvent};

#[instrument(level = "info", skip(state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "freetext_backend", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  info!(target: "freetext_backend", "WebSocket connected");
  'outer: while let Some(Ok(msg)) = socket.recv().await {
    match msg {
      Message::Text(txt) => {
        // Parse, dispatch, serialize replies.
        let replies = match serde_json::from_str::<ClientWsMessage>(&txt) {
          Ok(incoming) => {
            debug!(target: "freetext_backend", "WS received: {:?}", &incoming);
            handle_client_ws(incoming, &state).await
          }
          Err(e) => vec![ServerWsMessage::Error { message: format!("Invalid JSON: {}", e) }],
        };

        for reply in replies {
          let out = serde_json::to_string(&reply).unwrap_or_else(|e| {
            serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
          });
          if let Err(e) = socket.send(Message::Text(out)).await {
            error!(target: "freetext_backend", error = %e, "WS send error");
            break 'outer;
          }
        }
      }
      Message::Ping(payload) => { let _ = socket.send(Message::Pong(payload)).await; }
      Message::Close(_) => break,
      _ => {}
    }
  }
  info!(target: "freetext_backend", "WebSocket disconnected");
}

#[instrument(level = "info", skip(state))]
async fn handle_client_ws(msg: ClientWsMessage, state: &AppState) -> Vec<ServerWsMessage> {
  match msg {
    ClientWsMessage::Ping => vec![ServerWsMessage::Pong],

    ClientWsMessage::Attach { question_id } => {
      let (widget_id, params) = state.attach_widget(question_id.as_deref()).await;
      info!(target: "question", %widget_id, question = %params.id, "WS attach served");
      vec![ServerWsMessage::Attached { widget_id, view: to_view(&params) }]
    }

    ClientWsMessage::Resize { widget_id, width, font_size, input_height, visible } => {
      dispatch(state, widget_id, move |w| {
        w.handle_resize(ResizeMetrics { width, font_size, input_height, visible })
      })
      .await
    }

    ClientWsMessage::Hide { widget_id } => dispatch(state, widget_id, |w| w.handle_hide()).await,

    ClientWsMessage::FirstInteraction { widget_id } => {
      dispatch(state, widget_id, |w| w.handle_first_interaction()).await
    }

    ClientWsMessage::EditorReady { widget_id } => {
      dispatch(state, widget_id, |w| w.handle_editor_ready()).await
    }

    ClientWsMessage::EditorInput { widget_id, content } => {
      dispatch(state, widget_id, move |w| w.handle_editor_input(content)).await
    }

    ClientWsMessage::EditorBlur { widget_id, content } => {
      dispatch(state, widget_id, move |w| w.handle_editor_blur(content)).await
    }

    ClientWsMessage::Submit { widget_id } => dispatch(state, widget_id, |w| w.handle_submit()).await,

    ClientWsMessage::Skip { widget_id } => dispatch(state, widget_id, |w| w.handle_skip()).await,

    ClientWsMessage::DismissWarning { widget_id } => {
      dispatch(state, widget_id, |w| w.handle_dismiss_warning()).await
    }

    ClientWsMessage::GetReport { widget_id } => {
      match state.with_widget(&widget_id, |w| w.report()).await {
        Some(statement) => vec![ServerWsMessage::Report { widget_id, statement }],
        None => vec![unknown_widget(&widget_id)],
      }
    }
  }
}

/// Run a handler against the widget and map everything it emitted into
/// protocol messages, preserving emission order.
async fn dispatch(
  state: &AppState,
  widget_id: String,
  f: impl FnOnce(&mut QuestionWidget),
) -> Vec<ServerWsMessage> {
  match state
    .with_widget(&widget_id, |w| {
      f(w);
      w.take_events()
    })
    .await
  {
    Some(events) => events.into_iter().map(|e| to_server(&widget_id, e)).collect(),
    None => vec![unknown_widget(&widget_id)],
  }
}

fn to_server(widget_id: &str, event: WidgetEvent) -> ServerWsMessage {
  let widget_id = widget_id.to_string();
  match event {
    WidgetEvent::Editor(command) => ServerWsMessage::Editor { widget_id, command },
    WidgetEvent::RequiredMessage { visible } => ServerWsMessage::RequiredMessage { widget_id, visible },
    WidgetEvent::SubmitLabel { label } => ServerWsMessage::SubmitLabel { widget_id, label },
    WidgetEvent::Statement(statement) => ServerWsMessage::Statement { widget_id, statement },
    WidgetEvent::Continue => ServerWsMessage::Continue { widget_id },
  }
}

fn unknown_widget(widget_id: &str) -> ServerWsMessage {
  ServerWsMessage::Error { message: format!("Unknown widgetId: {}", widget_id) }
}
