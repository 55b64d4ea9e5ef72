//! QuantumViz circuit model.
//!
//! This crate holds the data structures every other QuantumViz crate shares:
//! qubit indices, the fixed gate set, and the [`Circuit`] container with its
//! validation rules.
//!
//! # Core Components
//!
//! - **Qubits**: [`QubitId`], a non-negative qubit index
//! - **Gates**: [`GateKind`] for the supported gate set and [`Gate`] for a
//!   gate applied to concrete qubits; [`GateSpec`] is the untyped wire form
//! - **Circuit**: [`Circuit`], an ordered gate list validated on append
//! - **Analysis**: [`analysis::analyze`] for structural findings
//! - **QASM**: [`qasm::emit`] for OpenQASM 3 output
//!
//! # Example: Building a Bell State
//!
//! ```rust
//! use qviz_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::new();
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cnot(QubitId(0), QubitId(1)).unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.depth(), 2);
//! ```
//!
//! # Example: Rejected Gates
//!
//! ```rust
//! use qviz_ir::{Circuit, IrError, QubitId};
//!
//! let mut circuit = Circuit::new();
//! let err = circuit.cnot(QubitId(1), QubitId(1)).unwrap_err();
//! assert!(matches!(err, IrError::SameQubit { .. }));
//! assert!(circuit.is_empty());
//! ```

pub mod analysis;
pub mod circuit;
pub mod error;
pub mod gate;
pub mod qasm;
pub mod qubit;

pub use analysis::{CircuitAnalysis, Finding, Optimization, Severity, analyze};
pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::{Gate, GateKind, GateSpec};
pub use qubit::QubitId;
