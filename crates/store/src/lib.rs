//! Persistence substrate for redraft: job records and the pending-job queue.
//!
//! Both live in Redis -- one hash per job record, one list for the FIFO
//! queue -- but callers only see the [`JobStore`] and [`JobQueue`] traits.
//! The [`memory`] module provides in-process implementations of the same
//! contracts for tests and credential-free local runs.
//!
//! The queue and the record store are separate resources with no
//! cross-store transaction; the ordering guarantee between them (record
//! readable before its id is poppable) is the job manager's
//! responsibility, not this crate's.

pub mod error;
pub mod memory;
pub mod queue;
pub mod records;

pub use error::StoreError;
pub use queue::{JobQueue, RedisJobQueue};
pub use records::{JobStore, RedisJobStore};

/// Handle to the Redis store, shared by the adapters and the health check.
pub type StoreConn = redis::aio::ConnectionManager;

/// Open a managed Redis connection.
///
/// The returned [`StoreConn`] reconnects automatically and is cheap to
/// clone; each adapter call clones it so concurrent commands do not
/// serialize on one handle. A worker doing `BLPOP` must still be given
/// its own manager, because the blocking pop parks whichever underlying
/// connection it runs on.
pub async fn connect(url: &str) -> Result<StoreConn, StoreError> {
    let client = redis::Client::open(url)?;
    let conn = client.get_connection_manager().await?;
    Ok(conn)
}

/// Round-trip a `PING` to verify the store is reachable.
pub async fn ping(conn: &StoreConn) -> Result<(), StoreError> {
    let mut conn = conn.clone();
    let _: () = redis::cmd("PING").query_async(&mut conn).await?;
    Ok(())
}
