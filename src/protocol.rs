//! Public protocol structs for the WebSocket host channel and the HTTP query
//! surface (serde ready). Keep this small and stable so the backend and the
//! host player can evolve independently.

use serde::{Deserialize, Serialize};

use crate::domain::QuestionParams;
use crate::editor::EditorCommand;
use crate::report::InteractionReport;

/// Signals the host player sends over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    /// Insert the widget into a container. Creates the instance.
    Attach {
        #[serde(rename = "questionId")]
        question_id: Option<String>,
    },
    /// Container measurements changed.
    Resize {
        #[serde(rename = "widgetId")]
        widget_id: String,
        width: f32,
        #[serde(rename = "fontSize")]
        font_size: f32,
        #[serde(rename = "inputHeight")]
        input_height: f32,
        visible: bool,
    },
    /// The container is being hidden; tear the editor surface down.
    Hide {
        #[serde(rename = "widgetId")]
        widget_id: String,
    },
    /// The learner touched the input region for the first time.
    FirstInteraction {
        #[serde(rename = "widgetId")]
        widget_id: String,
    },
    /// The editor surface finished coming up.
    EditorReady {
        #[serde(rename = "widgetId")]
        widget_id: String,
    },
    /// Content mirrored from the editor surface while typing.
    EditorInput {
        #[serde(rename = "widgetId")]
        widget_id: String,
        content: String,
    },
    /// The learner left the editor surface.
    EditorBlur {
        #[serde(rename = "widgetId")]
        widget_id: String,
        content: String,
    },
    Submit {
        #[serde(rename = "widgetId")]
        widget_id: String,
    },
    Skip {
        #[serde(rename = "widgetId")]
        widget_id: String,
    },
    DismissWarning {
        #[serde(rename = "widgetId")]
        widget_id: String,
    },
    GetReport {
        #[serde(rename = "widgetId")]
        widget_id: String,
    },
}

/// Messages the backend sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    /// Reply to `attach`: the instance id plus the view tree to render once.
    Attached {
        #[serde(rename = "widgetId")]
        widget_id: String,
        view: QuestionView,
    },
    /// Command for the host-side editor surface.
    Editor {
        #[serde(rename = "widgetId")]
        widget_id: String,
        command: EditorCommand,
    },
    /// Show or hide the required-answer warning banner.
    RequiredMessage {
        #[serde(rename = "widgetId")]
        widget_id: String,
        visible: bool,
    },
    /// New submit-button label (empty string in the compact form).
    SubmitLabel {
        #[serde(rename = "widgetId")]
        widget_id: String,
        label: String,
    },
    /// Report-ready event (submit, skip, or editor blur).
    Statement {
        #[serde(rename = "widgetId")]
        widget_id: String,
        statement: InteractionReport,
    },
    /// Advance to the next question.
    Continue {
        #[serde(rename = "widgetId")]
        widget_id: String,
    },
    /// Reply to `get_report`.
    Report {
        #[serde(rename = "widgetId")]
        widget_id: String,
        statement: InteractionReport,
    },
    Error {
        message: String,
    },
}

/// Declarative view tree the host renders once at attach time. Later changes
/// arrive as `required_message` / `submit_label` / `editor` deltas.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    pub prompt: PromptRegion,
    pub input: InputRegion,
    pub warning: WarningRegion,
    pub footer: FooterRegion,
    pub language: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PromptRegion {
    /// Rich-text question prompt.
    pub html: String,
    /// "*required" marker, present iff the question is required.
    #[serde(rename = "requiredLabel", skip_serializing_if = "Option::is_none")]
    pub required_label: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InputRegion {
    pub placeholder: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct WarningRegion {
    pub message: String,
    /// Hidden on creation; toggled by `required_message` messages.
    pub visible: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct FooterRegion {
    /// Present iff the question is not required.
    #[serde(rename = "skipLabel", skip_serializing_if = "Option::is_none")]
    pub skip_label: Option<String>,
    #[serde(rename = "submitLabel")]
    pub submit_label: String,
}

/// Build the view tree for a question instance.
pub fn to_view(params: &QuestionParams) -> QuestionView {
    QuestionView {
        prompt: PromptRegion {
            html: params.prompt.clone(),
            required_label: params
                .is_required
                .then(|| format!("*{}", params.locale.required_label)),
        },
        input: InputRegion { placeholder: params.placeholder.clone() },
        warning: WarningRegion { message: params.locale.required_message.clone(), visible: false },
        footer: FooterRegion {
            skip_label: (!params.is_required).then(|| params.locale.skip_label.clone()),
            submit_label: params.locale.submit_label.clone(),
        },
        language: params.locale.language.clone(),
    }
}

//
// HTTP request/response DTOs
//

/// Bank listing entry served to hosts that preload their sequence.
#[derive(Debug, Serialize)]
pub struct QuestionOut {
    pub id: String,
    pub prompt: String,
    #[serde(rename = "maxScore")]
    pub max_score: u32,
    #[serde(rename = "isRequired")]
    pub is_required: bool,
    pub source: crate::domain::QuestionSource,
}

pub fn to_question_out(params: &QuestionParams) -> QuestionOut {
    QuestionOut {
        id: params.id.clone(),
        prompt: params.prompt.clone(),
        max_score: params.max_score,
        is_required: params.is_required,
        source: params.source,
    }
}

#[derive(Debug, Deserialize)]
pub struct WidgetQuery {
    #[serde(rename = "widgetId")]
    pub widget_id: String,
}

#[derive(Serialize)]
pub struct ReportOut {
    pub statement: InteractionReport,
}

/// `score` serializes as an explicit null until graded downstream.
#[derive(Serialize)]
pub struct ScoreOut {
    pub score: Option<u32>,
}

#[derive(Serialize)]
pub struct MaxScoreOut {
    #[serde(rename = "maxScore")]
    pub max_score: u32,
}

#[derive(Serialize)]
pub struct ErrorOut {
    pub message: String,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}
