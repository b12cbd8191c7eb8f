//! Input-text length policy.
//!
//! The bounds are a shared contract: the HTTP adapter rejects out-of-range
//! submissions before they reach the core, and the job manager applies the
//! same check so a direct caller cannot bypass it.

use crate::settings::JobSettings;

/// Why a submitted text was rejected. The display strings are the
/// user-facing error messages returned by the HTTP adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TextError {
    #[error("Text is required")]
    Empty,

    #[error("Text is too short")]
    TooShort,

    #[error("Text is too long")]
    TooLong,
}

/// Check a submitted text against the configured character bounds.
///
/// Lengths are counted in characters, not bytes, so multi-byte input is
/// measured the way a submitter would count it.
pub fn validate(text: &str, settings: &JobSettings) -> Result<(), TextError> {
    if text.is_empty() {
        return Err(TextError::Empty);
    }

    let chars = text.chars().count();

    if chars < settings.min_text_chars {
        return Err(TextError::TooShort);
    }
    if chars > settings.max_text_chars {
        return Err(TextError::TooLong);
    }

    Ok(())
}
