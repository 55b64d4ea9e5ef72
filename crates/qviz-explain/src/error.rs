//! Error types for the explanation clients.

use thiserror::Error;

/// Result type for explanation operations.
pub type ExplainResult<T> = Result<T, ExplainError>;

/// Errors raised by a language model client.
///
/// These never reach API callers: [`crate::Explainer`] replaces any of them
/// with fallback text.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExplainError {
    /// The request could not be sent or the response could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The service answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The service answered but produced no text.
    #[error("Empty response from model")]
    EmptyResponse,

    /// Missing API key.
    #[error("Missing API key for {0}")]
    MissingApiKey(String),
}
