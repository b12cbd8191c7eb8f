//! External text-improvement collaborator.
//!
//! The rest of the system depends only on the narrow [`LlmClient`]
//! contract: text in, improved text out, or a failure. [`google`] provides
//! the production implementation against Google AI Studio.

pub mod client;
pub mod google;

pub use client::{LlmClient, LlmError};
pub use google::GoogleAiClient;
