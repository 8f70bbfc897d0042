//! Axum route handlers for screening, keyword matching and summaries.

use axum::{
    extract::{Multipart, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::models::candidate::CandidateRecord;
use crate::parsing::parse_resume;
use crate::ranking::{extract_keyword_matches, DEFAULT_TOP_K};
use crate::screening::service::{screen_candidates, RankedCandidate};
use crate::state::AppState;
use crate::summarizer::{CandidateSummarizer, DEFAULT_CANDIDATE_NAME};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct ScreeningQuery {
    #[serde(default)]
    pub summaries: bool,
}

#[derive(Debug, Serialize)]
pub struct ScreeningResponse {
    pub candidates: Vec<RankedCandidate>,
}

#[derive(Debug, Deserialize)]
pub struct RankRequest {
    pub jd_text: String,
    pub candidates: Vec<CandidateRecord>,
    #[serde(default)]
    pub include_summaries: bool,
}

#[derive(Debug, Deserialize)]
pub struct KeywordRequest {
    pub jd_text: String,
    #[serde(default)]
    pub resume_text: Option<String>,
    pub top_k: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct KeywordResponse {
    pub keywords: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SummaryRequest {
    pub jd_text: String,
    #[serde(default)]
    pub resume_text: Option<String>,
    pub candidate_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub summary: String,
}

fn require_jd(jd_text: &str) -> Result<(), AppError> {
    if jd_text.trim().is_empty() {
        return Err(AppError::Validation("jd_text cannot be empty".to_string()));
    }
    Ok(())
}

fn summarizer_if(state: &AppState, wanted: bool) -> Option<&dyn CandidateSummarizer> {
    wanted.then_some(state.summarizer.as_ref())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/screenings
///
/// Multipart form: a `jd_text` text field plus one or more resume files
/// (PDF, DOCX, or plain text). Returns candidates ranked by relevance.
pub async fn handle_screen_upload(
    State(state): State<AppState>,
    Query(query): Query<ScreeningQuery>,
    mut multipart: Multipart,
) -> Result<Json<ScreeningResponse>, AppError> {
    let mut jd_text = String::new();
    let mut candidates = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default().to_string();
        if field_name == "jd_text" {
            jd_text = field.text().await?;
            continue;
        }
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        let bytes = field.bytes().await?;
        candidates.push(parse_resume(&filename, &bytes, state.entity_recognizer.as_ref()).await);
    }

    require_jd(&jd_text)?;
    if candidates.is_empty() {
        return Err(AppError::Validation(
            "Upload at least one resume file".to_string(),
        ));
    }
    info!(
        "Screening {} uploaded resumes (entities: {})",
        candidates.len(),
        state.entity_recognizer.backend()
    );

    let candidates =
        screen_candidates(&jd_text, candidates, summarizer_if(&state, query.summaries)).await;
    Ok(Json(ScreeningResponse { candidates }))
}

/// POST /api/v1/screenings/rank
///
/// Ranks already-parsed candidate records. Records without `raw_text` rank as empty.
pub async fn handle_rank(
    State(state): State<AppState>,
    Json(request): Json<RankRequest>,
) -> Result<Json<ScreeningResponse>, AppError> {
    require_jd(&request.jd_text)?;
    let candidates = screen_candidates(
        &request.jd_text,
        request.candidates,
        summarizer_if(&state, request.include_summaries),
    )
    .await;
    Ok(Json(ScreeningResponse { candidates }))
}

/// POST /api/v1/keywords
pub async fn handle_keywords(
    Json(request): Json<KeywordRequest>,
) -> Result<Json<KeywordResponse>, AppError> {
    let keywords = extract_keyword_matches(
        &request.jd_text,
        request.resume_text.as_deref().unwrap_or(""),
        request.top_k.unwrap_or(DEFAULT_TOP_K),
    );
    Ok(Json(KeywordResponse { keywords }))
}

/// POST /api/v1/summaries
pub async fn handle_summary(
    State(state): State<AppState>,
    Json(request): Json<SummaryRequest>,
) -> Result<Json<SummaryResponse>, AppError> {
    require_jd(&request.jd_text)?;
    let name = request
        .candidate_name
        .as_deref()
        .unwrap_or(DEFAULT_CANDIDATE_NAME);
    let summary = state
        .summarizer
        .summarize(request.resume_text.as_deref().unwrap_or(""), &request.jd_text, name)
        .await;
    Ok(Json(SummaryResponse { summary }))
}
