//! Application state: the question bank and the live widget instances.
//!
//! This module owns:
//!   - the question stores (by id, plus serving order)
//!   - the live widget instances, keyed by instance id
//!
//! The bank is assembled once at startup from the optional TOML file plus the
//! built-in seeds; the widget map changes as hosts attach instances.

use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::config::load_bank_config_from_env;
use crate::domain::{QuestionParams, QuestionSource};
use crate::seeds::{fallback_question, seed_questions};
use crate::widget::QuestionWidget;

#[derive(Clone)]
pub struct AppState {
    pub questions: Arc<RwLock<HashMap<String, QuestionParams>>>,
    /// Ids in serving order; the first entry is the default for attaches
    /// that name no question.
    pub question_order: Arc<RwLock<Vec<String>>>,
    pub widgets: Arc<RwLock<HashMap<String, QuestionWidget>>>,
}

impl AppState {
    /// Build state from env: load the bank config, add seeds, build indices.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let cfg = load_bank_config_from_env();

        let mut id_map = HashMap::<String, QuestionParams>::new();
        let mut order = Vec::<String>::new();

        // Insert config-based questions (if any) first; they take precedence.
        if let Some(cfg) = cfg {
            for entry in cfg.questions {
                let params = entry.into_params();
                if params.prompt.is_empty() {
                    error!(target: "question", id = %params.id, "Skipping bank item: empty prompt.");
                    continue;
                }
                order.push(params.id.clone());
                id_map.insert(params.id.clone(), params);
            }
        }

        // Always insert built-in seeds, but don't overwrite existing ids.
        for q in seed_questions() {
            if !id_map.contains_key(&q.id) {
                order.push(q.id.clone());
                id_map.insert(q.id.clone(), q);
            }
        }

        // Inventory summary by source.
        let (mut bank, mut seed) = (0usize, 0usize);
        for q in id_map.values() {
            match q.source {
                QuestionSource::LocalBank => bank += 1,
                QuestionSource::Seed => seed += 1,
            }
        }
        info!(target: "question", local_bank = bank, seed = seed, "Startup question inventory");

        Self {
            questions: Arc::new(RwLock::new(id_map)),
            question_order: Arc::new(RwLock::new(order)),
            widgets: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Insert a question into the stores (by id and serving order).
    #[instrument(level = "debug", skip(self, params), fields(id = %params.id))]
    pub async fn insert_question(&self, params: QuestionParams) {
        let mut questions = self.questions.write().await;
        let mut order = self.question_order.write().await;
        order.push(params.id.clone());
        questions.insert(params.id.clone(), params);
    }

    /// Bank listing in serving order.
    pub async fn list_questions(&self) -> Vec<QuestionParams> {
        let order = self.question_order.read().await;
        let questions = self.questions.read().await;
        order.iter().filter_map(|id| questions.get(id).cloned()).collect()
    }

    /// Create and attach a widget instance for the given question (or the
    /// default question when none is named). Falls back to a stock question
    /// rather than failing the attach.
    #[instrument(level = "info", skip(self))]
    pub async fn attach_widget(&self, question_id: Option<&str>) -> (String, QuestionParams) {
        let params = match question_id {
            Some(id) => self.questions.read().await.get(id).cloned(),
            None => {
                let order = self.question_order.read().await;
                let questions = self.questions.read().await;
                order.first().and_then(|id| questions.get(id).cloned())
            }
        };

        let params = match params {
            Some(p) => p,
            None => {
                let p = fallback_question();
                warn!(target: "question", id = %p.id, "No usable bank entry; serving fallback question");
                self.insert_question(p.clone()).await;
                p
            }
        };

        let widget_id = Uuid::new_v4().to_string();
        let mut widget = QuestionWidget::new(params.clone());
        widget.attach();
        self.widgets.write().await.insert(widget_id.clone(), widget);
        info!(target: "question", %widget_id, question = %params.id, "Widget instance attached");
        (widget_id, params)
    }

    /// Run a closure against a live widget. Returns None for unknown ids.
    pub async fn with_widget<T>(
        &self,
        widget_id: &str,
        f: impl FnOnce(&mut QuestionWidget) -> T,
    ) -> Option<T> {
        let mut widgets = self.widgets.write().await;
        widgets.get_mut(widget_id).map(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn attach_serves_the_default_question() {
        let state = AppState::new();
        let (widget_id, params) = state.attach_widget(None).await;
        assert_eq!(params.id, "q-reflect");
        let attached = state.with_widget(&widget_id, |w| w.state().attached).await;
        assert_eq!(attached, Some(true));
    }

    #[tokio::test]
    async fn attach_with_unknown_question_falls_back() {
        let state = AppState::new();
        let (_, params) = state.attach_widget(Some("nope")).await;
        assert_eq!(params.source, QuestionSource::Seed);
        assert_eq!(params.prompt, "Question or description");
        // The fallback is inserted so the listing stays truthful.
        assert!(state.questions.read().await.contains_key(&params.id));
    }

    #[tokio::test]
    async fn with_widget_on_unknown_id_is_none() {
        let state = AppState::new();
        assert_eq!(state.with_widget("missing", |w| w.max_score()).await, None);
    }

    #[tokio::test]
    async fn seeds_cover_both_policy_branches() {
        let state = AppState::new();
        let bank = state.list_questions().await;
        assert!(bank.iter().any(|q| q.is_required));
        assert!(bank.iter().any(|q| !q.is_required));
    }
}
