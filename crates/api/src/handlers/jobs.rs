//! Handlers for text submission and job-status reads.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use redraft_core::text;
use redraft_jobs::GetJobError;

use crate::error::{AppError, AppResult};
use crate::response::{JobCompleted, JobCreated, JobProcessing, JOB_CREATED, JOB_IN_PROCESSING};
use crate::state::AppState;

/// Body of `POST /api/v1/text`.
///
/// `text` is optional at the deserialization layer so a missing field
/// reports "Text is required" instead of a generic decode failure.
#[derive(Debug, Deserialize)]
pub struct SubmitText {
    #[serde(default)]
    pub text: Option<String>,
}

/// Query parameters of `GET /api/v1/jobs`.
#[derive(Debug, Deserialize)]
pub struct JobStatusQuery {
    #[serde(default)]
    pub job_id: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

// ---------------------------------------------------------------------------
// Submit
// ---------------------------------------------------------------------------

/// POST /api/v1/text
///
/// Queue a text for improvement. Returns 201 with the job id and the
/// capability token; the submitter polls the status endpoint with both.
/// Length violations are rejected here, before the core is reached.
pub async fn submit_text(
    State(state): State<AppState>,
    Json(input): Json<SubmitText>,
) -> AppResult<impl IntoResponse> {
    let text = input.text.unwrap_or_default();

    if let Err(e) = text::validate(&text, state.manager.settings()) {
        return Err(AppError::BadRequest(e.to_string()));
    }

    let created = state.manager.create_job(&text).await?;

    tracing::info!(job_id = %created.job_id, chars = text.chars().count(), "Text accepted");

    Ok((
        StatusCode::CREATED,
        Json(JobCreated {
            message: JOB_CREATED,
            job_id: created.job_id,
            token: created.token,
        }),
    ))
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// GET /api/v1/jobs?job_id=...&token=...
///
/// Read a job's status. 400 for malformed or wrong credentials (the two
/// are indistinguishable to the caller), 202 while processing, 200 with
/// the improved text once completed.
pub async fn job_status(
    State(state): State<AppState>,
    Query(params): Query<JobStatusQuery>,
) -> AppResult<Response> {
    let settings = state.manager.settings();

    let (job_id, token) = match (params.job_id, params.token) {
        (Some(job_id), Some(token))
            if job_id.len() == settings.job_id_length && token.len() == settings.token_length =>
        {
            (job_id, token)
        }
        _ => {
            return Err(AppError::BadRequest(
                GetJobError::WrongCredentials.to_string(),
            ))
        }
    };

    match state.manager.get_job(&job_id, &token).await {
        Ok(view) => Ok((
            StatusCode::OK,
            Json(JobCompleted {
                state: view.state,
                output_text: view.output_text,
            }),
        )
            .into_response()),

        Err(GetJobError::InProcessing) => Ok((
            StatusCode::ACCEPTED,
            Json(JobProcessing {
                message: JOB_IN_PROCESSING,
            }),
        )
            .into_response()),

        Err(e @ (GetJobError::NotFound | GetJobError::WrongCredentials)) => {
            Err(AppError::BadRequest(e.to_string()))
        }

        Err(GetJobError::Store(e)) => Err(AppError::Internal(format!("Error getting job: {e}"))),
    }
}
