//! Response payloads for the job endpoints.
//!
//! Typed structs instead of ad-hoc `serde_json::json!` bodies, so the
//! integration tests and handlers agree on shapes at compile time.

use serde::Serialize;

use redraft_core::job::JobState;

/// Confirmation message on the 201 creation response.
pub const JOB_CREATED: &str = "Job created";

/// Message on the 202 still-processing response.
pub const JOB_IN_PROCESSING: &str = "Job is being processed";

/// Body of `POST /api/v1/text` on success.
///
/// The only response that ever carries the capability token: creation is
/// the one moment the token is transmitted, and only to the submitter.
#[derive(Debug, Serialize)]
pub struct JobCreated {
    pub message: &'static str,
    pub job_id: String,
    pub token: String,
}

/// Body of `GET /api/v1/jobs` while the job is still being processed.
#[derive(Debug, Serialize)]
pub struct JobProcessing {
    pub message: &'static str,
}

/// Body of `GET /api/v1/jobs` once the job has completed.
#[derive(Debug, Serialize)]
pub struct JobCompleted {
    pub state: JobState,
    pub output_text: String,
}
