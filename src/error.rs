//! Error taxonomy for rejected input.
//!
//! Every variant means analysis was not attempted. Stage-internal failures
//! never surface here; they degrade to default values instead.

use thiserror::Error;

/// Reasons a submission is rejected before analysis.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("no code provided")]
    Empty,
    #[error("code too large: {chars} characters exceeds the limit of {limit}")]
    TooLarge { chars: usize, limit: usize },
    #[error("unsupported language {0:?}, expected python, c or cpp")]
    UnsupportedLanguage(String),
    #[error("code contains a disallowed pattern outside comments: {pattern:?}")]
    ContentRejected { pattern: String },
    #[error("no valid code found after removing comments")]
    NoCode,
}

impl InputError {
    /// Short machine-readable tag for JSON output.
    pub fn kind(&self) -> &'static str {
        match self {
            InputError::Empty => "empty_input",
            InputError::TooLarge { .. } => "oversized_input",
            InputError::UnsupportedLanguage(_) => "unsupported_language",
            InputError::ContentRejected { .. } => "content_rejected",
            InputError::NoCode => "no_code",
        }
    }
}
