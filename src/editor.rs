//! Editor lifecycle adapter: keeps the host-side rich-text surface's
//! existence and sizing consistent with the widget's visibility. The surface
//! itself lives with the host; we mirror the content it reports and issue
//! create/destroy/resize commands back over the channel.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Height subtracted from the input region so the surface clears its chrome.
const HEIGHT_INSET: f32 = 4.0;

/// Lifecycle of the embedded surface. At most one live instance per widget;
/// a destroyed surface is not revived.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorLifecycle {
  NotCreated,
  Created,
  Destroyed,
}

/// Command issued toward the host-side editor surface.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditorCommand {
  Create,
  Destroy,
  Resize {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    width: Option<f32>,
    height: f32,
  },
}

/// Mediates between host show/hide/resize signals and the surface's own
/// create/destroy/resize lifecycle.
pub struct EditorAdapter {
  lifecycle: EditorLifecycle,
  content: Option<String>,
  placeholder: String,
}

impl EditorAdapter {
  pub fn new(placeholder: String) -> Self {
    Self { lifecycle: EditorLifecycle::NotCreated, content: None, placeholder }
  }

  pub fn lifecycle(&self) -> EditorLifecycle {
    self.lifecycle
  }

  /// Lazily instantiate the surface on the first interaction with the input
  /// region. Idempotent: later calls are no-ops.
  pub fn on_first_interaction(&mut self) -> Option<EditorCommand> {
    match self.lifecycle {
      EditorLifecycle::NotCreated => {
        self.lifecycle = EditorLifecycle::Created;
        debug!(target: "question", "Editor surface create requested");
        Some(EditorCommand::Create)
      }
      _ => None,
    }
  }

  /// Forward a host resize to the surface. Skipped entirely while the
  /// container is hidden (a hidden container measures zero) and while no
  /// surface exists.
  pub fn on_host_resize(&mut self, input_height: f32, visible: bool) -> Option<EditorCommand> {
    if !visible || self.lifecycle != EditorLifecycle::Created {
      return None;
    }
    Some(EditorCommand::Resize { width: None, height: input_height - HEIGHT_INSET })
  }

  /// Tear the surface down on a host hide. Idempotent: a second hide finds
  /// nothing to destroy.
  pub fn on_host_hide(&mut self) -> Option<EditorCommand> {
    if self.lifecycle != EditorLifecycle::Created {
      return None;
    }
    self.lifecycle = EditorLifecycle::Destroyed;
    debug!(target: "question", "Editor surface destroyed");
    Some(EditorCommand::Destroy)
  }

  /// Record content mirrored from the surface (input and blur events).
  pub fn record_content(&mut self, content: String) {
    self.content = Some(content);
  }

  /// Current response content. Falls back to the configured placeholder when
  /// the surface never produced any, so the gate and the report keep working
  /// even if the surface failed to come up.
  pub fn current_content(&self) -> &str {
    self.content.as_deref().unwrap_or(&self.placeholder)
  }
}
