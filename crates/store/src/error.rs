use redis::RedisError;

/// Errors from the store layer.
///
/// Everything the adapters can fail with is an infrastructure problem;
/// "record not found" is not an error here but an `Ok(None)` from
/// [`JobStore::get`](crate::records::JobStore::get).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The underlying Redis command or connection failed.
    #[error("Redis error: {0}")]
    Redis(#[from] RedisError),
}
