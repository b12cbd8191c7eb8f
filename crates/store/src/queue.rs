//! The pending-job queue: a Redis list of job ids in FIFO order.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;

use crate::error::StoreError;

/// Default Redis key for the pending-job list.
pub const QUEUE_KEY: &str = "job_queue";

/// FIFO of job identifiers. No priorities, no deduplication, no per-item
/// visibility timeout: once popped, an id is gone from the queue whether
/// or not processing later succeeds.
#[async_trait]
pub trait JobQueue: Send + Sync {
    /// Append a job id to the tail. Returns the new queue length.
    async fn push(&self, job_id: &str) -> Result<usize, StoreError>;

    /// Remove and return the head, blocking until an item is available or
    /// `timeout` elapses (`None` on timeout). A zero timeout blocks
    /// indefinitely. Each id is delivered to exactly one popping caller,
    /// which is what makes competing worker instances safe.
    async fn blocking_pop(&self, timeout: Duration) -> Result<Option<String>, StoreError>;

    /// Read the head without removing it (diagnostics and tests).
    async fn peek(&self) -> Result<Option<String>, StoreError>;
}

/// [`JobQueue`] backed by a Redis list (`RPUSH`/`BLPOP`/`LINDEX`).
///
/// `BLPOP` parks the connection it runs on, so a worker must own a
/// dedicated [`ConnectionManager`] rather than sharing the request path's.
#[derive(Clone)]
pub struct RedisJobQueue {
    conn: ConnectionManager,
    key: String,
}

impl RedisJobQueue {
    /// Queue over the default key.
    pub fn new(conn: ConnectionManager) -> Self {
        Self::with_key(conn, QUEUE_KEY)
    }

    /// Queue over a custom key (namespacing several queues in one store).
    pub fn with_key(conn: ConnectionManager, key: impl Into<String>) -> Self {
        Self {
            conn,
            key: key.into(),
        }
    }
}

#[async_trait]
impl JobQueue for RedisJobQueue {
    async fn push(&self, job_id: &str) -> Result<usize, StoreError> {
        let mut conn = self.conn.clone();
        let len: usize = conn.rpush(&self.key, job_id).await?;
        tracing::debug!(%job_id, queue_len = len, "RPUSH");
        Ok(len)
    }

    async fn blocking_pop(&self, timeout: Duration) -> Result<Option<String>, StoreError> {
        let mut conn = self.conn.clone();
        // BLPOP returns (key, element), or nil once the timeout elapses.
        let popped: Option<(String, String)> =
            conn.blpop(&self.key, timeout.as_secs_f64()).await?;
        Ok(popped.map(|(_, job_id)| job_id))
    }

    async fn peek(&self) -> Result<Option<String>, StoreError> {
        let mut conn = self.conn.clone();
        let head: Option<String> = conn.lindex(&self.key, 0).await?;
        Ok(head)
    }
}
