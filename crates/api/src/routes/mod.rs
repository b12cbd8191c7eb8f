pub mod health;
pub mod jobs;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// POST /text    submit a text for improvement
/// GET  /jobs    poll a job's status with job_id + token
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(jobs::router())
}
