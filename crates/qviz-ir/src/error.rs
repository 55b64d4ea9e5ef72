//! Error types for the circuit model.

use crate::gate::GateKind;
use crate::qubit::QubitId;
use thiserror::Error;

/// Errors raised while building or validating a circuit.
///
/// All variants are validation failures: they describe a malformed circuit,
/// never an I/O or simulation problem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Unknown gate name.
    #[error("Unknown gate type '{0}'. Supported gates: H, X, Y, Z, T, CNOT, CZ, SWAP")]
    UnknownGate(String),

    /// Qubit index is negative or does not fit in a `u32`.
    #[error("Invalid qubit index {0}: indices must be non-negative integers")]
    InvalidQubitIndex(i64),

    /// Two-qubit gate without a target.
    #[error("Gate '{kind}' on {qubit} requires a target qubit")]
    MissingTarget {
        /// The gate kind.
        kind: GateKind,
        /// The control/first qubit.
        qubit: QubitId,
    },

    /// Single-qubit gate with a target.
    #[error("Gate '{kind}' is a single-qubit gate and does not take a target")]
    UnexpectedTarget {
        /// The gate kind.
        kind: GateKind,
    },

    /// Two-qubit gate whose target equals its qubit.
    #[error("Gate '{kind}' must act on two distinct qubits, got {qubit} twice")]
    SameQubit {
        /// The gate kind.
        kind: GateKind,
        /// The repeated qubit.
        qubit: QubitId,
    },

    /// Qubit index at or beyond the circuit's qubit limit.
    #[error("Qubit {qubit} is out of range for a circuit limited to {limit} qubits")]
    QubitOutOfRange {
        /// The offending qubit.
        qubit: QubitId,
        /// The configured limit.
        limit: u32,
    },

    /// Error attributed to a specific gate of a submitted gate list.
    #[error("gate #{index}: {source}")]
    AtGate {
        /// Position of the gate in the submitted list.
        index: usize,
        /// The underlying error.
        #[source]
        source: Box<IrError>,
    },
}

impl IrError {
    /// Attach the position of the offending gate.
    pub fn at_gate(self, index: usize) -> Self {
        IrError::AtGate {
            index,
            source: Box::new(self),
        }
    }
}

/// Result type for circuit-model operations.
pub type IrResult<T> = Result<T, IrError>;
