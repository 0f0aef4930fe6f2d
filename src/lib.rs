//! Free-text question unit backend.
//!
//! One pluggable content unit of a host-controlled player: collects a
//! rich-text response from a learner, gates progression on the required
//! policy, and reports the interaction toward the host.
//!
//! Module map:
//!   - `domain`   - question parameters and shared enums
//!   - `config`   - TOML question bank loading
//!   - `seeds`    - built-in questions used without external config
//!   - `gate`     - submit-time required-answer decision
//!   - `report`   - interaction-report construction
//!   - `editor`   - lifecycle adapter for the host-side editor surface
//!   - `widget`   - the question widget itself (state + event wiring)
//!   - `state`    - shared application state (bank + live widgets)
//!   - `protocol` - WebSocket/HTTP message types
//!   - `routes`   - router assembly and handlers
//!   - `telemetry`- tracing initialization

pub mod config;
pub mod domain;
pub mod editor;
pub mod gate;
pub mod protocol;
pub mod report;
pub mod routes;
pub mod seeds;
pub mod state;
pub mod telemetry;
pub mod widget;

pub use domain::{EventKind, QuestionParams};
pub use report::InteractionReport;
pub use state::AppState;
pub use widget::QuestionWidget;
