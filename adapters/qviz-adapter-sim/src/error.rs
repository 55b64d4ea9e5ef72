//! Simulator error types.

use qviz_hal::HalError;
use thiserror::Error;

/// Errors raised by the state-vector engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SimError {
    /// Amplitude vector length is not a non-zero power of two.
    #[error("amplitude vector length {0} is not a power of two")]
    InvalidLength(usize),

    /// All amplitudes are zero.
    #[error("state vector has zero norm")]
    ZeroNorm,

    /// Basis index outside the state space.
    #[error("basis index {index} out of range for {size} amplitudes")]
    IndexOutOfRange { index: usize, size: usize },

    /// Sampling distribution could not be built.
    #[error("sampling failed: {0}")]
    Sampling(String),
}

impl From<SimError> for HalError {
    fn from(err: SimError) -> Self {
        HalError::Backend(err.to_string())
    }
}

/// Result type for the simulator engine.
pub type SimResult<T> = Result<T, SimError>;
