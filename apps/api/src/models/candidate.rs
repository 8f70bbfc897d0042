use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Entity label kept from recognition output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityLabel {
    Org,
    Date,
    Person,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    pub label: EntityLabel,
}

/// One parsed resume.
///
/// `score` starts at 0.0 and is overwritten in place by
/// [`crate::ranking::rank_candidates`]. A missing `raw_text` is ranked as empty text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateRecord {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub emails: Vec<String>,
    #[serde(default)]
    pub phones: Vec<String>,
    #[serde(default)]
    pub entities: Vec<Entity>,
    #[serde(default)]
    pub raw_text: Option<String>,
    #[serde(default)]
    pub score: f64,
}

impl CandidateRecord {
    pub fn new(name: impl Into<String>, raw_text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            filename: None,
            email: None,
            phone: None,
            emails: Vec::new(),
            phones: Vec::new(),
            entities: Vec::new(),
            raw_text: Some(raw_text.into()),
            score: 0.0,
        }
    }

    pub fn text(&self) -> &str {
        self.raw_text.as_deref().unwrap_or("")
    }
}
