use std::sync::Arc;

use crate::config::Config;
use crate::parsing::entities::EntityRecognizer;
use crate::scheduling::calendar::Calendar;
use crate::scheduling::mailer::Mailer;
use crate::summarizer::CandidateSummarizer;

/// Shared application state injected into all route handlers via Axum extractors.
/// Every collaborator is chosen once at startup from `Config`.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// No-op unless LLM entity recognition is enabled.
    pub entity_recognizer: Arc<dyn EntityRecognizer>,
    pub summarizer: Arc<dyn CandidateSummarizer>,
    pub calendar: Arc<dyn Calendar>,
    pub mailer: Arc<dyn Mailer>,
}
