//! The worker loop: drains the pending-job queue and performs one
//! external transformation per job.
//!
//! The loop is a cancellable run-loop task owned by the process that
//! starts it -- either the service binary (in-process worker) or the
//! standalone `redraft-worker` binary. Several instances may run against
//! the same queue; the queue's blocking pop delivers each id to exactly
//! one of them.
//!
//! Processing is at-most-once by design: a popped id whose processing
//! fails for any reason (missing record, LLM failure, empty output,
//! store write failure) is dropped, and the job stays in `created`
//! until an operator resubmits it. There is no requeue, no retry
//! counter, and no dead-letter queue. A stricter redelivery scheme
//! would slot in behind [`JobQueue`] without touching the rest of the
//! system.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use redraft_core::job::JobState;
use redraft_llm::LlmClient;
use redraft_store::{JobQueue, JobStore};

/// How long each blocking pop waits before the loop re-checks the
/// shutdown signal. A finite timeout guarantees cancellation is observed
/// between iterations even when the queue stays empty.
pub const DEFAULT_POP_TIMEOUT: Duration = Duration::from_secs(5);

/// Pause after a failed pop so an unreachable store does not turn the
/// loop into a busy spin.
const POP_ERROR_BACKOFF: Duration = Duration::from_secs(1);

/// A single long-running queue consumer.
pub struct Worker {
    store: Arc<dyn JobStore>,
    queue: Arc<dyn JobQueue>,
    llm: Arc<dyn LlmClient>,
    pop_timeout: Duration,
}

impl Worker {
    pub fn new(
        store: Arc<dyn JobStore>,
        queue: Arc<dyn JobQueue>,
        llm: Arc<dyn LlmClient>,
    ) -> Self {
        Self {
            store,
            queue,
            llm,
            pop_timeout: DEFAULT_POP_TIMEOUT,
        }
    }

    /// Override the pop timeout (tests use a short one).
    pub fn with_pop_timeout(mut self, pop_timeout: Duration) -> Self {
        self.pop_timeout = pop_timeout;
        self
    }

    /// Run until `cancel` is triggered.
    ///
    /// Each iteration blocks on the queue, then processes the popped id
    /// to completion or failure; cancellation mid-processing is not
    /// attempted (a job interrupted by shutdown is left in `created`,
    /// the same outcome as a processing failure).
    pub async fn run(self, cancel: CancellationToken) {
        tracing::info!("Worker started");

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Worker stopping");
                    break;
                }
                popped = self.queue.blocking_pop(self.pop_timeout) => match popped {
                    Ok(Some(job_id)) => self.process(&job_id).await,
                    Ok(None) => {
                        // Idle timeout; loop around and re-check shutdown.
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Queue pop failed");
                        tokio::time::sleep(POP_ERROR_BACKOFF).await;
                    }
                }
            }
        }
    }

    /// Process one dequeued job id.
    ///
    /// The id is already gone from the queue; every early return below
    /// permanently drops it.
    async fn process(&self, job_id: &str) {
        let record = match self.store.get(job_id).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                // Creation writes the record before the enqueue, so this
                // means the record was deleted out-of-band.
                tracing::warn!(%job_id, "Dequeued id has no record, dropping");
                return;
            }
            Err(e) => {
                tracing::error!(%job_id, error = %e, "Failed to fetch record, dropping job");
                return;
            }
        };

        if record.input_text.is_empty() {
            tracing::warn!(%job_id, "Record has no input text, dropping");
            return;
        }

        tracing::info!(%job_id, "Processing job");

        match self.llm.query(&record.input_text).await {
            Ok(result) if !result.is_empty() => {
                match self
                    .store
                    .update_state_and_output(job_id, JobState::Completed, &result)
                    .await
                {
                    Ok(()) => tracing::info!(%job_id, "Job completed"),
                    Err(e) => {
                        tracing::error!(%job_id, error = %e, "Failed to store result, job stays created");
                    }
                }
            }
            Ok(_) => {
                tracing::error!(%job_id, "LLM returned no output, job stays created");
            }
            Err(e) => {
                tracing::error!(%job_id, error = %e, "LLM query failed, job stays created");
            }
        }
    }
}
