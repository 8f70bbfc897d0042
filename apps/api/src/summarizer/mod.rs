//! Candidate summaries — a short recruiter-style write-up of one resume against a JD.
//!
//! Summaries never fail the request: any error becomes the summary text itself
//! (`"Summary error: ..."`), so one bad call cannot hide the rest of a screening.

pub mod prompts;

use async_trait::async_trait;
use tracing::warn;

use crate::llm_client::prompts::{fill_template, truncate_chars, HR_ASSISTANT_SYSTEM};
use crate::llm_client::{CallOptions, LlmClient};
use crate::summarizer::prompts::SUMMARY_PROMPT_TEMPLATE;

/// Resume text beyond this many characters is not sent to the model.
pub const MAX_RESUME_CHARS: usize = 3000;
pub const DEFAULT_CANDIDATE_NAME: &str = "Candidate";

const SUMMARY_OPTIONS: CallOptions = CallOptions {
    max_tokens: 400,
    temperature: Some(0.2),
};

#[async_trait]
pub trait CandidateSummarizer: Send + Sync {
    async fn summarize(&self, resume_text: &str, jd_text: &str, candidate_name: &str) -> String;
}

pub struct LlmSummarizer(pub LlmClient);

#[async_trait]
impl CandidateSummarizer for LlmSummarizer {
    async fn summarize(&self, resume_text: &str, jd_text: &str, candidate_name: &str) -> String {
        let prompt = build_summary_prompt(resume_text, jd_text, candidate_name);
        match self
            .0
            .call_text(&prompt, HR_ASSISTANT_SYSTEM, SUMMARY_OPTIONS)
            .await
        {
            Ok(summary) => summary,
            Err(e) => {
                warn!("Summary generation failed for {candidate_name}: {e}");
                format!("Summary error: {e}")
            }
        }
    }
}

/// Used when no LLM key is configured.
pub struct UnavailableSummarizer;

#[async_trait]
impl CandidateSummarizer for UnavailableSummarizer {
    async fn summarize(&self, _resume_text: &str, _jd_text: &str, _name: &str) -> String {
        "Summary error: no LLM API key configured".to_string()
    }
}

pub fn build_summary_prompt(resume_text: &str, jd_text: &str, candidate_name: &str) -> String {
    fill_template(
        SUMMARY_PROMPT_TEMPLATE,
        &[
            ("candidate_name", candidate_name),
            ("jd_text", jd_text),
            ("resume_text", truncate_chars(resume_text, MAX_RESUME_CHARS)),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_fills_all_placeholders() {
        let prompt = build_summary_prompt("Rust engineer", "Need Rust", "Alice");
        assert!(prompt.contains("'Alice'"));
        assert!(prompt.contains("Need Rust"));
        assert!(prompt.contains("Rust engineer"));
        assert!(!prompt.contains('{'));
    }

    #[test]
    fn test_prompt_keeps_placeholder_text_from_inputs() {
        let prompt = build_summary_prompt(
            "Built {jd_text} parsers",
            "Paste {resume_text} here",
            "{jd_text}",
        );
        assert!(prompt.contains("'{jd_text}'"));
        assert!(prompt.contains("Paste {resume_text} here"));
        assert!(prompt.contains("Built {jd_text} parsers"));
        assert_eq!(prompt.matches("Built {jd_text} parsers").count(), 1);
    }

    #[test]
    fn test_prompt_truncates_long_resume() {
        let resume = "x".repeat(MAX_RESUME_CHARS + 500);
        let prompt = build_summary_prompt(&resume, "jd", "Bob");
        assert!(prompt.contains(&"x".repeat(MAX_RESUME_CHARS)));
        assert!(!prompt.contains(&"x".repeat(MAX_RESUME_CHARS + 1)));
    }

    #[tokio::test]
    async fn test_unavailable_summarizer_reports_error_text() {
        let summary = UnavailableSummarizer.summarize("cv", "jd", "Alice").await;
        assert!(summary.starts_with("Summary error:"));
    }
}
