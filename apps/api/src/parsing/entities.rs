//! Entity recognition — optional capability behind a trait.
//!
//! Resolved once at startup: `LlmEntityRecognizer` when enabled and an LLM key is
//! configured, otherwise `NoopEntityRecognizer`. Callers never re-check availability.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::llm_client::prompts::{fill_template, truncate_chars};
use crate::llm_client::LlmClient;
use crate::models::candidate::{Entity, EntityLabel};
use crate::parsing::prompts::{ENTITY_PROMPT_TEMPLATE, ENTITY_SYSTEM};

/// Recognition only looks at the start of a resume.
pub const MAX_ENTITY_CHARS: usize = 5000;

#[async_trait]
pub trait EntityRecognizer: Send + Sync {
    /// Returns ORG, DATE and PERSON entities found in `text`. Never fails; an
    /// unavailable backend returns an empty list.
    async fn recognize(&self, text: &str) -> Vec<Entity>;

    /// Backend name, for logging.
    fn backend(&self) -> &'static str;
}

/// Used when entity recognition is unavailable.
pub struct NoopEntityRecognizer;

#[async_trait]
impl EntityRecognizer for NoopEntityRecognizer {
    async fn recognize(&self, _text: &str) -> Vec<Entity> {
        Vec::new()
    }

    fn backend(&self) -> &'static str {
        "noop"
    }
}

/// Entity recognition through the shared LLM client.
pub struct LlmEntityRecognizer(pub LlmClient);

#[derive(Debug, Deserialize)]
struct RawEntity {
    text: String,
    label: String,
}

#[async_trait]
impl EntityRecognizer for LlmEntityRecognizer {
    async fn recognize(&self, text: &str) -> Vec<Entity> {
        let excerpt = truncate_chars(text, MAX_ENTITY_CHARS);
        if excerpt.trim().is_empty() {
            return Vec::new();
        }
        let prompt = fill_template(ENTITY_PROMPT_TEMPLATE, &[("resume_text", excerpt)]);
        match self.0.call_json::<Vec<RawEntity>>(&prompt, ENTITY_SYSTEM).await {
            Ok(raw) => keep_known_labels(raw),
            Err(e) => {
                warn!("Entity recognition failed, continuing without entities: {e}");
                Vec::new()
            }
        }
    }

    fn backend(&self) -> &'static str {
        "llm"
    }
}

fn keep_known_labels(raw: Vec<RawEntity>) -> Vec<Entity> {
    raw.into_iter()
        .filter_map(|e| {
            let label = match e.label.to_ascii_uppercase().as_str() {
                "PERSON" => EntityLabel::Person,
                "ORG" => EntityLabel::Org,
                "DATE" => EntityLabel::Date,
                _ => return None,
            };
            let text = e.text.trim().to_string();
            (!text.is_empty()).then_some(Entity { text, label })
        })
        .collect()
}

/// First PERSON entity, used as the candidate's display name.
pub fn first_person(entities: &[Entity]) -> Option<&str> {
    entities
        .iter()
        .find(|e| e.label == EntityLabel::Person)
        .map(|e| e.text.as_str())
}
