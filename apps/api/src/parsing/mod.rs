//! Resume parsing — turns uploaded files into candidate records.
//!
//! Flow: bytes → text (by extension) → contact fields → optional entities → record.
//! A file that cannot be read still produces a record, with empty text.

pub mod contact;
pub mod entities;
pub mod extract;
pub mod prompts;

use tracing::info;

use crate::models::candidate::CandidateRecord;
use crate::parsing::contact::parse_basic_info;
use crate::parsing::entities::{first_person, EntityRecognizer};
use crate::parsing::extract::extract_text_or_empty;

/// Builds a candidate record from raw text. The score starts at 0.0.
pub async fn build_candidate(
    text: String,
    filename: &str,
    recognizer: &dyn EntityRecognizer,
) -> CandidateRecord {
    let info = parse_basic_info(&text, filename);
    let entities = recognizer.recognize(&text).await;
    let name = first_person(&entities)
        .map(str::to_string)
        .unwrap_or(info.name);

    CandidateRecord {
        filename: Some(filename.to_string()),
        email: info.email,
        phone: info.phone,
        emails: info.emails,
        phones: info.phones,
        entities,
        ..CandidateRecord::new(name, text)
    }
}

/// Parses one uploaded resume file.
pub async fn parse_resume(
    filename: &str,
    bytes: &[u8],
    recognizer: &dyn EntityRecognizer,
) -> CandidateRecord {
    let text = extract_text_or_empty(filename, bytes);
    info!("Parsed {filename}: {} characters", text.len());
    build_candidate(text, filename, recognizer).await
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::models::candidate::{Entity, EntityLabel};
    use crate::parsing::entities::NoopEntityRecognizer;

    struct FixedRecognizer(Vec<Entity>);

    #[async_trait]
    impl EntityRecognizer for FixedRecognizer {
        async fn recognize(&self, _text: &str) -> Vec<Entity> {
            self.0.clone()
        }

        fn backend(&self) -> &'static str {
            "fixed"
        }
    }

    #[tokio::test]
    async fn test_parse_plain_text_resume() {
        let bytes = b"Python backend engineer\nalice@example.com\n+44 20 7946 0958";
        let record = parse_resume("alice.txt", bytes, &NoopEntityRecognizer).await;
        assert_eq!(record.name, "alice");
        assert_eq!(record.filename.as_deref(), Some("alice.txt"));
        assert_eq!(record.email.as_deref(), Some("alice@example.com"));
        assert!(record.phone.is_some());
        assert_eq!(record.score, 0.0);
        assert!(record.text().contains("Python backend engineer"));
    }

    #[tokio::test]
    async fn test_person_entity_overrides_filename_name() {
        let recognizer = FixedRecognizer(vec![
            Entity {
                text: "Acme".to_string(),
                label: EntityLabel::Org,
            },
            Entity {
                text: "Alice Smith".to_string(),
                label: EntityLabel::Person,
            },
        ]);
        let record = parse_resume("cv_2024.txt", b"Alice Smith, Acme", &recognizer).await;
        assert_eq!(record.name, "Alice Smith");
        assert_eq!(record.entities.len(), 2);
    }

    #[tokio::test]
    async fn test_unreadable_file_yields_empty_text() {
        let record = parse_resume("broken.pdf", b"garbage", &NoopEntityRecognizer).await;
        assert_eq!(record.name, "broken");
        assert_eq!(record.text(), "");
    }
}
