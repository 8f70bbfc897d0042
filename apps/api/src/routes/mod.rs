pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post},
    Router,
};

use crate::scheduling::handlers as scheduling;
use crate::screening::handlers as screening;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Screening API
        .route("/api/v1/screenings", post(screening::handle_screen_upload))
        .route("/api/v1/screenings/rank", post(screening::handle_rank))
        .route("/api/v1/keywords", post(screening::handle_keywords))
        .route("/api/v1/summaries", post(screening::handle_summary))
        // Interview API
        .route("/api/v1/interviews", post(scheduling::handle_schedule))
        .route(
            "/api/v1/interviews/events",
            get(scheduling::handle_list_events),
        )
        .route(
            "/api/v1/interviews/events/:id",
            patch(scheduling::handle_update_event).delete(scheduling::handle_delete_event),
        )
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}
