//! Route definitions for the text-improvement job endpoints.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::jobs;
use crate::state::AppState;

/// Routes mounted under `/api/v1`.
///
/// ```text
/// POST   /text    -> submit_text
/// GET    /jobs    -> job_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/text", post(jobs::submit_text))
        .route("/jobs", get(jobs::job_status))
}
