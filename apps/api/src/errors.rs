use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::scheduling::calendar::CalendarError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// The ranking core has no error type: degenerate input yields neutral results.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upload error: {0}")]
    Upload(#[from] MultipartError),

    #[error("Calendar error: {0}")]
    Calendar(#[from] CalendarError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Upload(e) => (e.status(), "UPLOAD_ERROR", e.body_text()),
            AppError::Calendar(CalendarError::NotConfigured) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "CALENDAR_NOT_CONFIGURED",
                CalendarError::NotConfigured.to_string(),
            ),
            AppError::Calendar(CalendarError::TimeOutOfRange) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                CalendarError::TimeOutOfRange.to_string(),
            ),
            AppError::Calendar(CalendarError::Api { status: 404, .. }) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                "Calendar event not found".to_string(),
            ),
            AppError::Calendar(e) => {
                tracing::error!("Calendar error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "CALENDAR_ERROR",
                    "The calendar service returned an error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
