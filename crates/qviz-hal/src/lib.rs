//! QuantumViz backend abstraction.
//!
//! This crate defines how QuantumViz talks to anything that can execute a
//! circuit, whether the local state-vector simulator or a cloud service:
//! - A common [`Backend`] trait for job submission and retrieval
//! - [`Capabilities`] describing qubit and shot limits
//! - Unified result handling via [`ExecutionResult`] and [`Counts`]
//!
//! # Supported Backends
//!
//! | Backend | Crate | Authentication |
//! |---------|-------|----------------|
//! | Local Simulator | `qviz-adapter-sim` | None |
//! | AWS Braket | `qviz-adapter-braket` | AWS default credential chain |
//!
//! # Example: Running a Circuit
//!
//! ```ignore
//! use qviz_hal::{Backend, DEFAULT_SHOTS};
//! use qviz_adapter_sim::SimulatorBackend;
//! use qviz_ir::Circuit;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = SimulatorBackend::new();
//!     let result = backend.run(&Circuit::bell(), DEFAULT_SHOTS).await?;
//!
//!     if let Some((bitstring, count)) = result.counts.most_frequent() {
//!         println!("Most frequent: {bitstring} ({count} times)");
//!     }
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod capability;
pub mod error;
pub mod job;
pub mod result;

pub use backend::{
    Backend, BackendAvailability, DEFAULT_SHOTS, POLL_INTERVAL, WAIT_TIMEOUT, validate_submission,
};
pub use capability::Capabilities;
pub use error::{HalError, HalResult};
pub use job::{Job, JobId, JobStatus};
pub use result::{Counts, ExecutionResult};
