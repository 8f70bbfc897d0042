//! Axum route handlers for interview scheduling and event management.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::AppError;
use crate::scheduling::calendar::{CalendarEvent, DEFAULT_LIST_LIMIT};
use crate::scheduling::interviews::{
    schedule_interviews, InterviewCandidate, InterviewPlan, InviteOutcome,
    DEFAULT_DURATION_MINUTES, DEFAULT_EVENT_TITLE, MAX_DURATION_MINUTES,
};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ScheduleRequest {
    pub candidates: Vec<InterviewCandidate>,
    /// Wall-clock start, e.g. `2025-06-02T15:00:00`, in `timezone`.
    pub start: Option<NaiveDateTime>,
    pub duration_minutes: Option<i64>,
    pub timezone: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ScheduleResponse {
    pub outcomes: Vec<InviteOutcome>,
}

#[derive(Debug, Deserialize)]
pub struct ListEventsQuery {
    pub max_results: Option<u32>,
}

/// POST /api/v1/interviews
///
/// Creates an event and emails an invitation for each selected candidate.
pub async fn handle_schedule(
    State(state): State<AppState>,
    Json(request): Json<ScheduleRequest>,
) -> Result<Json<ScheduleResponse>, AppError> {
    if request.candidates.is_empty() {
        return Err(AppError::Validation(
            "Please select candidates first.".to_string(),
        ));
    }
    let minutes = request.duration_minutes.unwrap_or(DEFAULT_DURATION_MINUTES);
    if !(1..=MAX_DURATION_MINUTES).contains(&minutes) {
        return Err(AppError::Validation(format!(
            "duration_minutes must be between 1 and {MAX_DURATION_MINUTES}"
        )));
    }
    let duration = Duration::minutes(minutes);
    if let Some(start) = request.start {
        if start.checked_add_signed(duration).is_none() {
            return Err(AppError::Validation(
                "start is too late for the requested duration".to_string(),
            ));
        }
    }

    let plan = InterviewPlan {
        title: request
            .title
            .unwrap_or_else(|| DEFAULT_EVENT_TITLE.to_string()),
        start: request.start,
        duration,
        timezone: request
            .timezone
            .unwrap_or_else(|| state.config.interview_timezone.clone()),
    };

    let outcomes = schedule_interviews(
        state.calendar.as_ref(),
        state.mailer.as_ref(),
        &request.candidates,
        &plan,
    )
    .await;
    Ok(Json(ScheduleResponse { outcomes }))
}

/// GET /api/v1/interviews/events
pub async fn handle_list_events(
    State(state): State<AppState>,
    Query(query): Query<ListEventsQuery>,
) -> Result<Json<Vec<CalendarEvent>>, AppError> {
    let events = state
        .calendar
        .list_events(query.max_results.unwrap_or(DEFAULT_LIST_LIMIT))
        .await?;
    Ok(Json(events))
}

/// PATCH /api/v1/interviews/events/:id
///
/// Body is a JSON object whose top-level fields replace the event's fields.
pub async fn handle_update_event(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
    Json(fields): Json<Map<String, Value>>,
) -> Result<Json<CalendarEvent>, AppError> {
    if fields.is_empty() {
        return Err(AppError::Validation("No fields to update".to_string()));
    }
    let event = state.calendar.update_event(&event_id, &fields).await?;
    Ok(Json(event))
}

/// DELETE /api/v1/interviews/events/:id
pub async fn handle_delete_event(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.calendar.delete_event(&event_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
