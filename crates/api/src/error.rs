use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use redraft_jobs::CreateJobError;

/// Application-level error type for HTTP handlers.
///
/// Implements [`IntoResponse`] to produce consistent JSON error bodies.
/// Internal detail never reaches the client; it is logged and replaced
/// with a generic message.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A bad request with a user-facing message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a message for the logs only.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<CreateJobError> for AppError {
    fn from(err: CreateJobError) -> Self {
        match err {
            CreateJobError::Invalid(e) => AppError::BadRequest(e.to_string()),
            CreateJobError::Store(e) => AppError::Internal(format!("Error creating job: {e}")),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
