//! Error types for visualization.

use thiserror::Error;

/// Result type for visualization operations.
pub type VizResult<T> = Result<T, VizError>;

/// Errors raised while building or storing a visualization.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VizError {
    /// The qubit state cannot be visualized.
    #[error("Invalid qubit state: {0}")]
    InvalidState(String),

    /// No artifact is stored under the key.
    #[error("Artifact not found: {0}")]
    NotFound(String),

    /// The artifact store rejected the operation.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl VizError {
    /// Whether the error stems from the request.
    pub fn is_validation(&self) -> bool {
        matches!(self, VizError::InvalidState(_))
    }
}
