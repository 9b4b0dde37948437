pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::jobs::handlers as jobs;
use crate::matching::handlers as matching;
use crate::state::AppState;

/// Room for multipart boundaries and text fields on top of the files.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Request body cap: compare carries two documents per request.
fn request_body_limit(max_file_size: usize) -> usize {
    max_file_size
        .saturating_mul(2)
        .saturating_add(MULTIPART_OVERHEAD)
}

pub fn build_router(state: AppState) -> Router {
    let body_limit = request_body_limit(state.config.max_file_size);

    Router::new()
        .route("/health", get(health::health_handler))
        // Matching API
        .route("/api/matching/compare", post(matching::handle_compare))
        .route(
            "/api/matching/debug-extract",
            post(matching::handle_debug_extract),
        )
        .route("/api/matching/history", get(matching::handle_history))
        // Job catalog API
        .route("/api/jobs", get(jobs::handle_list_jobs))
        .route("/api/jobs/:id", get(jobs::handle_get_job))
        .route("/api/filters", get(jobs::handle_filters))
        .route("/api/match-all", post(jobs::handle_match_all))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
