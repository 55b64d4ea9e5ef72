//! Backend trait.
//!
//! The [`Backend`] trait defines the lifecycle for running a circuit:
//!
//! ```text
//!   capabilities() ──→ validate() ──→ submit() ──→ status() ──→ result()
//!    (sync, &ref)       (provided)    (async)      (async)      (async)
//! ```
//!
//! Most callers only need [`Backend::run`], which chains the whole sequence.
//!
//! | Method | Kind | Required | Returns |
//! |--------|------|----------|---------|
//! | `name()` | sync | yes | `&str` |
//! | `capabilities()` | sync | yes | `&Capabilities` |
//! | `availability()` | async | yes | `HalResult<BackendAvailability>` |
//! | `submit()` | async | yes | `HalResult<JobId>` |
//! | `status()` | async | yes | `HalResult<JobStatus>` |
//! | `result()` | async | yes | `HalResult<ExecutionResult>` |
//! | `validate()` | sync | provided | `HalResult<()>` |
//! | `wait()` | async | provided | `HalResult<ExecutionResult>` |
//! | `run()` | async | provided | `HalResult<ExecutionResult>` |

use std::time::Duration;

use async_trait::async_trait;
use qviz_ir::Circuit;
use serde::Serialize;
use tracing::debug;

use crate::capability::Capabilities;
use crate::error::{HalError, HalResult};
use crate::job::{JobId, JobStatus};
use crate::result::ExecutionResult;

/// Default number of shots when a request does not specify one.
pub const DEFAULT_SHOTS: u32 = 1024;

/// Interval between status polls in [`Backend::wait`].
pub const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Upper bound on how long [`Backend::wait`] polls.
pub const WAIT_TIMEOUT: Duration = Duration::from_secs(300);

/// Check a submission against a backend's limits.
///
/// Rejects empty circuits, zero shots, shot counts above the backend limit,
/// circuits wider than the backend, and gates outside its gate set.
pub fn validate_submission(caps: &Capabilities, circuit: &Circuit, shots: u32) -> HalResult<()> {
    if circuit.is_empty() {
        return Err(HalError::InvalidCircuit(
            "circuit has no gates; add at least one gate before simulating".into(),
        ));
    }
    if shots == 0 || shots > caps.max_shots {
        return Err(HalError::InvalidShots(format!(
            "shots must be between 1 and {}, got {shots}",
            caps.max_shots
        )));
    }
    let width = circuit.num_qubits();
    if width > caps.num_qubits {
        return Err(HalError::CircuitTooLarge(format!(
            "circuit uses {width} qubits but {} supports at most {}",
            caps.name, caps.num_qubits
        )));
    }
    if let Some(gate) = circuit.gates().iter().find(|g| !caps.supports(g.kind)) {
        return Err(HalError::InvalidCircuit(format!(
            "gate {} is not supported by {}",
            gate.kind, caps.name
        )));
    }
    Ok(())
}

/// Trait for simulation backends.
///
/// `capabilities()` is synchronous and infallible; implementations cache
/// it at construction time. `result()` is only valid once `status()`
/// reports `Completed`.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Get the name of this backend.
    fn name(&self) -> &str;

    /// Get the capabilities of this backend.
    fn capabilities(&self) -> &Capabilities;

    /// Lightweight liveness check.
    async fn availability(&self) -> HalResult<BackendAvailability>;

    /// Submit a circuit for execution.
    async fn submit(&self, circuit: &Circuit, shots: u32) -> HalResult<JobId>;

    /// Get the status of a job.
    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus>;

    /// Get the result of a completed job.
    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult>;

    /// Validate a submission against this backend's capabilities.
    fn validate(&self, circuit: &Circuit, shots: u32) -> HalResult<()> {
        validate_submission(self.capabilities(), circuit, shots)
    }

    /// Wait for a job to complete and return its result.
    ///
    /// Polls every 200 ms for up to 5 minutes.
    async fn wait(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        let max_polls = WAIT_TIMEOUT.as_millis() / POLL_INTERVAL.as_millis();

        for _ in 0..max_polls {
            match self.status(job_id).await? {
                JobStatus::Completed => return self.result(job_id).await,
                JobStatus::Failed(msg) => return Err(HalError::JobFailed(msg)),
                JobStatus::Cancelled => return Err(HalError::JobCancelled),
                JobStatus::Queued | JobStatus::Running => {
                    tokio::time::sleep(POLL_INTERVAL).await;
                }
            }
        }

        Err(HalError::Timeout(job_id.0.clone()))
    }

    /// Validate, submit and wait.
    async fn run(&self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult> {
        self.validate(circuit, shots)?;
        let job_id = self.submit(circuit, shots).await?;
        debug!(backend = self.name(), %job_id, shots, "job submitted");
        self.wait(&job_id).await
    }
}

/// Backend availability information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackendAvailability {
    /// Whether the backend is currently accepting jobs.
    pub is_available: bool,
    /// Human-readable status message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_message: Option<String>,
}

impl BackendAvailability {
    /// A backend that is always available, typical for local simulators.
    pub fn always_available() -> Self {
        Self {
            is_available: true,
            status_message: None,
        }
    }

    /// An offline backend.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            is_available: false,
            status_message: Some(reason.into()),
        }
    }
}
