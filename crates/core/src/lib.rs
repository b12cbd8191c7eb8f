//! Domain types for the redraft job service.
//!
//! This crate has no internal dependencies so every other crate (store,
//! manager, worker, API) can share the job model, the identifier/token
//! generator, and the text-length policy without pulling in I/O code.

pub mod job;
pub mod settings;
pub mod text;
pub mod token;
