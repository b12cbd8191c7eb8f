//! [`LlmClient`] implementation over the Google AI Studio REST API.
//!
//! Sends a `generateContent` request with a fixed grammar-fixing
//! instruction and extracts the first candidate's text. The configured URL
//! already carries the API key as a query parameter, matching how AI
//! Studio hands out endpoint URLs.

use async_trait::async_trait;
use serde::Deserialize;

use crate::client::{LlmClient, LlmError};

/// Instruction prepended to every submission.
///
/// TODO: source the prompt from configuration once more than one
/// improvement style is needed.
const IMPROVE_PROMPT: &str = "Fix all grammar and styling issues for the text after the colon. \
     Return only the improved text without the prompt:";

/// HTTP client for Google AI Studio's `generateContent` endpoint.
pub struct GoogleAiClient {
    client: reqwest::Client,
    /// Full endpoint URL including the API key.
    api_url: String,
}

// ---------------------------------------------------------------------------
// Response shape (the subset this service reads)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GoogleAiClient {
    /// Create a client for the given endpoint URL (key included).
    pub fn new(api_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`]
    /// (connection pooling across collaborators).
    pub fn with_client(client: reqwest::Client, api_url: String) -> Self {
        Self { client, api_url }
    }
}

#[async_trait]
impl LlmClient for GoogleAiClient {
    async fn query(&self, text: &str) -> Result<String, LlmError> {
        let body = serde_json::json!({
            "contents": [
                {
                    "parts": [
                        { "text": format!("{IMPROVE_PROMPT}{text}") }
                    ]
                }
            ]
        });

        let response = self.client.post(&self.api_url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        Ok(extract_result(parsed))
    }
}

/// Pull the improved text out of the response: first candidate, first
/// part. Anything missing along the way collapses to an empty string,
/// which callers treat as "no update".
fn extract_result(response: GenerateContentResponse) -> String {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().next())
        .and_then(|part| part.text)
        .unwrap_or_default()
}
