//! Screening pipeline: rank → matched keywords → optional summaries.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::models::candidate::CandidateRecord;
use crate::ranking::{extract_keyword_matches, rank_candidates, DEFAULT_TOP_K};
use crate::summarizer::CandidateSummarizer;

/// A candidate in ranked position, with the terms it shares with the JD.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub rank: usize,
    #[serde(flatten)]
    pub candidate: CandidateRecord,
    pub matched_keywords: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// Ranks `candidates` against `jd_text` and annotates each with matched keywords.
/// When a summarizer is passed, every candidate also gets a summary, in rank order.
pub async fn screen_candidates(
    jd_text: &str,
    mut candidates: Vec<CandidateRecord>,
    summarizer: Option<&dyn CandidateSummarizer>,
) -> Vec<RankedCandidate> {
    let ranked: Vec<CandidateRecord> = rank_candidates(jd_text, &mut candidates)
        .into_iter()
        .cloned()
        .collect();
    info!("Ranked {} candidates", ranked.len());

    let mut results = Vec::with_capacity(ranked.len());
    for (i, candidate) in ranked.into_iter().enumerate() {
        let matched_keywords = extract_keyword_matches(jd_text, candidate.text(), DEFAULT_TOP_K);
        let summary = match summarizer {
            Some(s) => Some(s.summarize(candidate.text(), jd_text, &candidate.name).await),
            None => None,
        };
        results.push(RankedCandidate {
            rank: i + 1,
            candidate,
            matched_keywords,
            summary,
        });
    }
    results
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;

    struct EchoSummarizer;

    #[async_trait]
    impl CandidateSummarizer for EchoSummarizer {
        async fn summarize(&self, _resume: &str, _jd: &str, name: &str) -> String {
            format!("Summary for {name}")
        }
    }

    const JD: &str = "Looking for a Python backend engineer with AWS experience";

    fn candidates() -> Vec<CandidateRecord> {
        vec![
            CandidateRecord::new("Bob", "Graphic designer, Photoshop, Illustrator"),
            CandidateRecord::new("Alice", "Python backend engineer, 5 years AWS"),
        ]
    }

    #[tokio::test]
    async fn test_screening_ranks_and_annotates() {
        let results = screen_candidates(JD, candidates(), None).await;
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].candidate.name, "Alice");
        assert_eq!(results[0].rank, 1);
        assert_eq!(
            results[0].matched_keywords,
            vec!["python", "backend", "engineer", "aws"]
        );
        assert!(results[1].matched_keywords.is_empty());
        assert!(results.iter().all(|r| r.summary.is_none()));
    }

    #[tokio::test]
    async fn test_screening_with_summaries() {
        let summarizer: &dyn CandidateSummarizer = &EchoSummarizer;
        let results = screen_candidates(JD, candidates(), Some(summarizer)).await;
        assert_eq!(results[0].summary.as_deref(), Some("Summary for Alice"));
        assert_eq!(results[1].summary.as_deref(), Some("Summary for Bob"));
    }

    #[tokio::test]
    async fn test_screening_empty_list() {
        let summarizer: &dyn CandidateSummarizer = &EchoSummarizer;
        assert!(screen_candidates(JD, vec![], Some(summarizer))
            .await
            .is_empty());
    }

    #[test]
    fn test_ranked_candidate_serializes_flat() {
        let ranked = RankedCandidate {
            rank: 1,
            candidate: CandidateRecord::new("Alice", "rust"),
            matched_keywords: vec!["rust".to_string()],
            summary: None,
        };
        let json = serde_json::to_value(&ranked).unwrap();
        assert_eq!(json["name"], "Alice");
        assert_eq!(json["score"], 0.0);
        assert!(json.get("summary").is_none());
    }
}
