//! Job orchestration: creation with capability-token issuance and
//! token-gated, state-gated reads.

pub mod manager;

pub use manager::{CreateJobError, GetJobError, JobManager, JobView, NewJob};
