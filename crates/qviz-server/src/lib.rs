//! QuantumViz HTTP API.
//!
//! JSON endpoints for building and simulating circuits, running the algorithm
//! demos, rendering visualizations and explaining concepts. Every success body
//! carries `"status": "success"`; errors are
//! `{"status": "error", "error": <kind>, "message": <text>}`.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use qviz_server::{AppState, Config, create_router};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     let addr = config.bind_address()?;
//!     let app = create_router(Arc::new(AppState::new(config)));
//!
//!     let listener = tokio::net::TcpListener::bind(addr).await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod content;
pub mod dto;
pub mod error;
pub mod server;
pub mod state;
pub mod telemetry;

pub use config::{Config, ConfigError};
pub use dto::{SimulationReport, Statistics};
pub use error::{ApiError, ApiJson};
pub use server::create_router;
pub use state::AppState;
pub use telemetry::init_tracing;
