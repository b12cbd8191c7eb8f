//! Request handlers.
//!
//! Handlers validate the request shape, delegate to the job manager, and
//! map its typed outcomes onto status codes via [`AppError`](crate::error::AppError).

pub mod jobs;
