//! The job manager: the only component that writes new jobs and the only
//! read path for their results.

use std::sync::Arc;

use redraft_core::job::{JobRecord, JobState};
use redraft_core::settings::JobSettings;
use redraft_core::text::{self, TextError};
use redraft_core::token;
use redraft_store::{JobQueue, JobStore, StoreError};

/// Credentials handed back to the submitter at creation time.
///
/// This is the only place the capability token ever leaves the system;
/// status reads require it but never echo it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewJob {
    pub job_id: String,
    pub token: String,
}

/// Projection of a completed job, the only shape a reader ever sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobView {
    pub state: JobState,
    pub output_text: String,
}

/// Why a job could not be created.
#[derive(Debug, thiserror::Error)]
pub enum CreateJobError {
    /// The text violates the configured length policy.
    #[error(transparent)]
    Invalid(#[from] TextError),

    /// The record store or queue was unavailable.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Why a job read produced no output.
///
/// The first three are expected outcomes reported to the caller as typed
/// conditions, never thrown faults. Checks run in a fixed precedence:
/// not-found, then wrong-token, then in-processing.
#[derive(Debug, thiserror::Error)]
pub enum GetJobError {
    #[error("No job found")]
    NotFound,

    #[error("Wrong job_id or token provided")]
    WrongCredentials,

    #[error("The job is still being processed")]
    InProcessing,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Orchestrates job creation (id/token issuance, initial record, enqueue)
/// and read access (token check, state-gated projection).
pub struct JobManager {
    store: Arc<dyn JobStore>,
    queue: Arc<dyn JobQueue>,
    settings: JobSettings,
}

impl JobManager {
    pub fn new(store: Arc<dyn JobStore>, queue: Arc<dyn JobQueue>, settings: JobSettings) -> Self {
        Self {
            store,
            queue,
            settings,
        }
    }

    /// Policy settings this manager was built with.
    pub fn settings(&self) -> &JobSettings {
        &self.settings
    }

    /// Create a job for `text` and enqueue it for processing.
    ///
    /// The record is written before the id is pushed: the queue and the
    /// record store are separate resources with no transaction between
    /// them, and a consumer must never pop an id whose record is not yet
    /// readable. If the push itself fails the job is left stranded in
    /// `created` -- the same observable outcome as a processing failure.
    pub async fn create_job(&self, text: &str) -> Result<NewJob, CreateJobError> {
        text::validate(text, &self.settings)?;

        let job_id = token::generate(self.settings.job_id_length);
        let token = token::generate(self.settings.token_length);

        let record = JobRecord::new(job_id.clone(), token.clone(), text.to_string());
        self.store.put(&record).await?;

        let queued = self.queue.push(&job_id).await?;

        tracing::info!(job_id = %job_id, queue_len = queued, "Job created");

        Ok(NewJob { job_id, token })
    }

    /// Read a job's status. Read-only; calling it any number of times
    /// with the same credentials returns the same result.
    pub async fn get_job(&self, job_id: &str, token: &str) -> Result<JobView, GetJobError> {
        let record = self
            .store
            .get(job_id)
            .await?
            .ok_or(GetJobError::NotFound)?;

        // Opaque capability compared by exact equality. Together with the
        // uniform 400 mapping at the HTTP boundary, a wrong token on an
        // existing job is indistinguishable from a missing job.
        if record.token_id != token {
            return Err(GetJobError::WrongCredentials);
        }

        match record.state {
            JobState::Created => Err(GetJobError::InProcessing),
            JobState::Completed => Ok(JobView {
                state: record.state,
                output_text: record.output_text,
            }),
        }
    }
}
