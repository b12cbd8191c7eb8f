//! Job record storage: one Redis hash per job under a namespaced key.

use std::collections::HashMap;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;

use redraft_core::job::{JobRecord, JobState};

use crate::error::StoreError;

/// Key namespace for job records.
pub const JOB_KEY_PREFIX: &str = "job:";

/// Durable mapping from job id to job record. No business logic lives
/// here; access control and state gating are the manager's concern.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Write the full record. Idempotent: rewriting the same record is a
    /// no-op in effect.
    async fn put(&self, record: &JobRecord) -> Result<(), StoreError>;

    /// Fetch a record by job id, or `None` if no such job exists.
    async fn get(&self, job_id: &str) -> Result<Option<JobRecord>, StoreError>;

    /// Partial write touching exactly the `state` and `output_text`
    /// fields, leaving the rest of the record untouched. Only the worker
    /// calls this, exactly once per job.
    async fn update_state_and_output(
        &self,
        job_id: &str,
        state: JobState,
        output_text: &str,
    ) -> Result<(), StoreError>;
}

/// [`JobStore`] backed by Redis hashes.
#[derive(Clone)]
pub struct RedisJobStore {
    conn: ConnectionManager,
}

impl RedisJobStore {
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }

    fn key(job_id: &str) -> String {
        format!("{JOB_KEY_PREFIX}{job_id}")
    }
}

#[async_trait]
impl JobStore for RedisJobStore {
    async fn put(&self, record: &JobRecord) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        let key = Self::key(&record.job_id);
        tracing::debug!(key = %key, "HSET job record");

        let fields = [
            ("job_id", record.job_id.as_str()),
            ("token_id", record.token_id.as_str()),
            ("state", record.state.as_str()),
            ("input_text", record.input_text.as_str()),
            ("output_text", record.output_text.as_str()),
        ];

        let _: () = conn.hset_multiple(&key, &fields).await?;
        Ok(())
    }

    async fn get(&self, job_id: &str) -> Result<Option<JobRecord>, StoreError> {
        let mut conn = self.conn.clone();
        let key = Self::key(job_id);

        let fields: HashMap<String, String> = conn.hgetall(&key).await?;
        Ok(record_from_hash(fields))
    }

    async fn update_state_and_output(
        &self,
        job_id: &str,
        state: JobState,
        output_text: &str,
    ) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        let key = Self::key(job_id);
        tracing::debug!(key = %key, state = state.as_str(), "HSET state/output");

        let fields = [("state", state.as_str()), ("output_text", output_text)];
        let _: () = conn.hset_multiple(&key, &fields).await?;
        Ok(())
    }
}

/// Rebuild a record from its hash fields.
///
/// An empty hash (Redis returns no fields for a missing key) or a hash
/// without a `job_id` field reads as "no record". Other missing fields
/// degrade to defaults; an unrecognized `state` reads as `Created`, which
/// keeps the output hidden rather than exposing it.
fn record_from_hash(mut fields: HashMap<String, String>) -> Option<JobRecord> {
    let job_id = fields.remove("job_id")?;

    let state = fields
        .get("state")
        .and_then(|s| JobState::parse(s))
        .unwrap_or(JobState::Created);

    Some(JobRecord {
        job_id,
        token_id: fields.remove("token_id").unwrap_or_default(),
        state,
        input_text: fields.remove("input_text").unwrap_or_default(),
        output_text: fields.remove("output_text").unwrap_or_default(),
    })
}
