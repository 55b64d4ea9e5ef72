//! Error types for the algorithm demos.

use qviz_adapter_sim::SimError;
use qviz_hal::HalError;
use qviz_ir::IrError;
use thiserror::Error;

/// Errors raised while setting up or running an algorithm.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AlgoError {
    /// A request parameter is out of range or malformed.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Building the circuit failed.
    #[error(transparent)]
    Circuit(#[from] IrError),

    /// Running on a backend failed.
    #[error(transparent)]
    Backend(#[from] HalError),

    /// The state-vector engine failed.
    #[error(transparent)]
    Simulation(#[from] SimError),
}

impl AlgoError {
    /// Whether the error stems from the request rather than the execution.
    pub fn is_validation(&self) -> bool {
        match self {
            AlgoError::InvalidParameter(_) | AlgoError::Circuit(_) => true,
            AlgoError::Backend(e) => e.is_validation(),
            AlgoError::Simulation(_) => false,
        }
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        AlgoError::InvalidParameter(msg.into())
    }
}

/// Result type for algorithm operations.
pub type AlgoResult<T> = Result<T, AlgoError>;
