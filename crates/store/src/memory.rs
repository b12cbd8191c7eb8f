//! In-process implementations of [`JobStore`] and [`JobQueue`].
//!
//! Used by the test suites across the workspace and usable for local runs
//! without a Redis instance. The queue's `blocking_pop` genuinely blocks
//! the calling task (on a [`Notify`]) so worker-loop tests exercise the
//! same wait-then-wake shape as `BLPOP`.

use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Mutex, Notify};

use redraft_core::job::{JobRecord, JobState};

use crate::error::StoreError;
use crate::queue::JobQueue;
use crate::records::JobStore;

/// [`JobStore`] over a mutex-guarded map.
#[derive(Default)]
pub struct MemoryJobStore {
    records: Mutex<HashMap<String, JobRecord>>,
}

impl MemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl JobStore for MemoryJobStore {
    async fn put(&self, record: &JobRecord) -> Result<(), StoreError> {
        self.records
            .lock()
            .await
            .insert(record.job_id.clone(), record.clone());
        Ok(())
    }

    async fn get(&self, job_id: &str) -> Result<Option<JobRecord>, StoreError> {
        Ok(self.records.lock().await.get(job_id).cloned())
    }

    async fn update_state_and_output(
        &self,
        job_id: &str,
        state: JobState,
        output_text: &str,
    ) -> Result<(), StoreError> {
        if let Some(record) = self.records.lock().await.get_mut(job_id) {
            record.state = state;
            record.output_text = output_text.to_string();
        }
        Ok(())
    }
}

/// [`JobQueue`] over a mutex-guarded deque plus a wakeup signal.
#[derive(Default)]
pub struct MemoryJobQueue {
    items: Mutex<VecDeque<String>>,
    notify: Notify,
}

impl MemoryJobQueue {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl JobQueue for MemoryJobQueue {
    async fn push(&self, job_id: &str) -> Result<usize, StoreError> {
        let len = {
            let mut items = self.items.lock().await;
            items.push_back(job_id.to_string());
            items.len()
        };
        self.notify.notify_one();
        Ok(len)
    }

    async fn blocking_pop(&self, timeout: Duration) -> Result<Option<String>, StoreError> {
        loop {
            if let Some(job_id) = self.items.lock().await.pop_front() {
                return Ok(Some(job_id));
            }

            // `notify_one` before we get here leaves a stored permit, so a
            // push racing this gap still wakes us immediately.
            if timeout.is_zero() {
                self.notify.notified().await;
            } else if tokio::time::timeout(timeout, self.notify.notified())
                .await
                .is_err()
            {
                return Ok(None);
            }
        }
    }

    async fn peek(&self) -> Result<Option<String>, StoreError> {
        Ok(self.items.lock().await.front().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn queue_is_fifo() {
        let queue = MemoryJobQueue::new();
        queue.push("first").await.unwrap();
        queue.push("second").await.unwrap();
        queue.push("third").await.unwrap();

        assert_eq!(
            queue.blocking_pop(Duration::from_millis(10)).await.unwrap().as_deref(),
            Some("first")
        );
        assert_eq!(
            queue.blocking_pop(Duration::from_millis(10)).await.unwrap().as_deref(),
            Some("second")
        );
        assert_eq!(
            queue.blocking_pop(Duration::from_millis(10)).await.unwrap().as_deref(),
            Some("third")
        );
    }

    #[tokio::test]
    async fn push_reports_new_length() {
        let queue = MemoryJobQueue::new();
        assert_eq!(queue.push("a").await.unwrap(), 1);
        assert_eq!(queue.push("b").await.unwrap(), 2);
    }

    #[tokio::test]
    async fn peek_does_not_remove() {
        let queue = MemoryJobQueue::new();
        queue.push("head").await.unwrap();

        assert_eq!(queue.peek().await.unwrap().as_deref(), Some("head"));
        assert_eq!(queue.peek().await.unwrap().as_deref(), Some("head"));
        assert_eq!(
            queue
                .blocking_pop(Duration::from_millis(10))
                .await
                .unwrap()
                .as_deref(),
            Some("head")
        );
    }

    #[tokio::test]
    async fn pop_times_out_on_empty_queue() {
        let queue = MemoryJobQueue::new();
        let popped = queue.blocking_pop(Duration::from_millis(20)).await.unwrap();
        assert_eq!(popped, None);
    }

    #[tokio::test]
    async fn blocked_pop_wakes_on_push() {
        let queue = std::sync::Arc::new(MemoryJobQueue::new());

        let waiter = {
            let queue = queue.clone();
            tokio::spawn(async move { queue.blocking_pop(Duration::ZERO).await })
        };

        // Give the waiter a chance to park before pushing.
        tokio::time::sleep(Duration::from_millis(10)).await;
        queue.push("wakeup").await.unwrap();

        let popped = waiter.await.unwrap().unwrap();
        assert_eq!(popped.as_deref(), Some("wakeup"));
    }

    #[tokio::test]
    async fn store_get_returns_what_was_put() {
        let store = MemoryJobStore::new();
        let record = JobRecord::new("id12345678".into(), "t".repeat(20), "input".into());
        store.put(&record).await.unwrap();

        assert_eq!(store.get("id12345678").await.unwrap(), Some(record));
        assert_eq!(store.get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn update_touches_only_state_and_output() {
        let store = MemoryJobStore::new();
        let record = JobRecord::new("id12345678".into(), "t".repeat(20), "input".into());
        store.put(&record).await.unwrap();

        store
            .update_state_and_output("id12345678", JobState::Completed, "done")
            .await
            .unwrap();

        let updated = store.get("id12345678").await.unwrap().unwrap();
        assert_eq!(updated.state, JobState::Completed);
        assert_eq!(updated.output_text, "done");
        assert_eq!(updated.input_text, "input");
        assert_eq!(updated.token_id, record.token_id);
    }
}
