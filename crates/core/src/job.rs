//! The job record and its state machine.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a job.
///
/// Transitions are monotonic: `Created -> Completed`, set exactly once by
/// the worker and never reverted. There is no failure state; a job whose
/// processing attempt failed simply stays `Created`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobState {
    Created,
    Completed,
}

impl JobState {
    /// Canonical string form, as persisted in the record store.
    pub fn as_str(self) -> &'static str {
        match self {
            JobState::Created => "created",
            JobState::Completed => "completed",
        }
    }

    /// Parse the persisted string form. Returns `None` for anything else.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "created" => Some(JobState::Created),
            "completed" => Some(JobState::Completed),
            _ => None,
        }
    }
}

/// One submitted text-improvement request and its result.
///
/// `job_id` is the public identifier (record-store key and queue payload).
/// `token_id` is the secret capability issued once at creation; possession
/// of both is the only credential for reading the result. The token is
/// independent of the id and not derivable from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRecord {
    pub job_id: String,
    pub token_id: String,
    pub state: JobState,
    /// Immutable after creation.
    pub input_text: String,
    /// Empty until the worker completes the job; written exactly once,
    /// together with the transition to [`JobState::Completed`].
    pub output_text: String,
}

impl JobRecord {
    /// Build a fresh record in the `Created` state with no output.
    pub fn new(job_id: String, token_id: String, input_text: String) -> Self {
        Self {
            job_id,
            token_id,
            state: JobState::Created,
            input_text,
            output_text: String::new(),
        }
    }
}
