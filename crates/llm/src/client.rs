use async_trait::async_trait;

/// The single operation the core needs from a language model.
///
/// An `Ok` carrying an empty string means the model produced no usable
/// output; callers must treat that exactly like an `Err` -- log it and
/// leave the job untouched. The worker enforces this.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Produce an improved version of `text`.
    async fn query(&self, text: &str) -> Result<String, LlmError>;
}

/// Errors from the LLM layer.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("LLM API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}
