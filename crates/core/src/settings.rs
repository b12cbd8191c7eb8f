//! Job policy settings shared by the HTTP boundary, the manager, and tests.

use crate::token;

/// Default minimum input length in characters.
pub const DEFAULT_MIN_TEXT_CHARS: usize = 10;

/// Default maximum input length in characters.
pub const DEFAULT_MAX_TEXT_CHARS: usize = 200;

/// Identifier lengths and input-text bounds.
///
/// The HTTP adapter validates request fields against these values and the
/// job manager re-checks the text bounds, so the policy holds even when
/// the manager is invoked directly.
#[derive(Debug, Clone)]
pub struct JobSettings {
    /// Length of generated job identifiers (default: 10).
    pub job_id_length: usize,
    /// Length of generated capability tokens (default: 20).
    pub token_length: usize,
    /// Minimum accepted input length in characters (default: 10).
    pub min_text_chars: usize,
    /// Maximum accepted input length in characters (default: 200).
    pub max_text_chars: usize,
}

impl Default for JobSettings {
    fn default() -> Self {
        Self {
            job_id_length: token::JOB_ID_LENGTH,
            token_length: token::TOKEN_LENGTH,
            min_text_chars: DEFAULT_MIN_TEXT_CHARS,
            max_text_chars: DEFAULT_MAX_TEXT_CHARS,
        }
    }
}

impl JobSettings {
    /// Load settings from environment variables with defaults.
    ///
    /// | Env Var          | Default |
    /// |------------------|---------|
    /// | `JOB_ID_LENGTH`  | `10`    |
    /// | `TOKEN_LENGTH`   | `20`    |
    /// | `MIN_TEXT_CHARS` | `10`    |
    /// | `MAX_TEXT_CHARS` | `200`   |
    pub fn from_env() -> Self {
        Self {
            job_id_length: env_usize("JOB_ID_LENGTH", token::JOB_ID_LENGTH),
            token_length: env_usize("TOKEN_LENGTH", token::TOKEN_LENGTH),
            min_text_chars: env_usize("MIN_TEXT_CHARS", DEFAULT_MIN_TEXT_CHARS),
            max_text_chars: env_usize("MAX_TEXT_CHARS", DEFAULT_MAX_TEXT_CHARS),
        }
    }
}

fn env_usize(name: &str, default: usize) -> usize {
    match std::env::var(name) {
        Ok(value) => value
            .parse()
            .unwrap_or_else(|_| panic!("{name} must be a valid usize")),
        Err(_) => default,
    }
}
