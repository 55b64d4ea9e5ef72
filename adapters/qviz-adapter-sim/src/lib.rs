//! QuantumViz Local Statevector Simulator
//!
//! Exact state-vector simulation of the QuantumViz gate set with shot
//! sampling from the final state. The engine primitives on [`Statevector`]
//! are public so algorithm demos can apply rotations and oracles the circuit
//! model does not expose.
//!
//! # Performance
//!
//! | Qubits | Memory | Simulation Speed |
//! |--------|--------|------------------|
//! | 10 | ~16 KB | Instant |
//! | 15 | ~512 KB | Fast |
//! | 20 | ~16 MB | Moderate |
//!
//! # Example
//!
//! ```ignore
//! use qviz_adapter_sim::SimulatorBackend;
//! use qviz_hal::Backend;
//! use qviz_ir::Circuit;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = SimulatorBackend::new();
//!     let result = backend.run(&Circuit::bell(), 1024).await?;
//!
//!     // Expect ~50% "00" and ~50% "11"
//!     println!("Results: {:?}", result.counts);
//!     Ok(())
//! }
//! ```

mod error;
mod simulator;
mod statevector;

pub use error::{SimError, SimResult};
pub use simulator::{MAX_RETAINED_JOBS, SimulatorBackend, SimulatorConfig};
pub use statevector::Statevector;
