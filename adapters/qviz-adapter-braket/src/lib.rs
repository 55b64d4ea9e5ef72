//! QuantumViz Adapter for AWS Braket
//!
//! Runs circuits on Amazon's managed simulators through the Braket service.
//! Circuits are submitted as OpenQASM 3 programs and their results are read
//! back from S3.
//!
//! # Supported Devices
//!
//! | Device | Qubits | Short name |
//! |--------|--------|------------|
//! | Amazon SV1 | 34 | `sv1` |
//! | Amazon DM1 | 17 | `dm1` |
//! | Amazon TN1 | 50 | `tn1` |
//!
//! # Authentication
//!
//! AWS credentials are loaded from the standard AWS credential chain:
//! environment variables, shared config, SSO, or IAM role. An S3 bucket for
//! task results is required.
//!
//! # Example
//!
//! ```ignore
//! use qviz_adapter_braket::{BraketBackend, BraketConfig};
//! use qviz_hal::Backend;
//! use qviz_ir::Circuit;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = BraketBackend::connect(BraketConfig {
//!         s3_bucket: "my-braket-results".into(),
//!         ..BraketConfig::default()
//!     })
//!     .await?;
//!
//!     let result = backend.run(&Circuit::bell(), 1024).await?;
//!     println!("Results: {:?}", result.counts);
//!     Ok(())
//! }
//! ```

mod api;
mod backend;
pub mod device;
mod error;

pub use backend::{BraketBackend, BraketConfig};
pub use error::{BraketError, BraketResult};
