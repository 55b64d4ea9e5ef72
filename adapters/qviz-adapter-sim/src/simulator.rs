//! Simulator backend implementation.

use async_trait::async_trait;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rustc_hash::FxHashMap;
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use std::time::Instant;
use tracing::{debug, instrument};
use uuid::Uuid;

use qviz_hal::{
    Backend, BackendAvailability, Capabilities, ExecutionResult, HalError, HalResult, Job, JobId,
    JobStatus,
};
use qviz_ir::Circuit;

use crate::statevector::Statevector;

/// Simulator limits and sampling options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatorConfig {
    /// Widest circuit accepted.
    pub max_qubits: u32,
    /// Largest shot count accepted.
    pub max_shots: u32,
    /// Fixed RNG seed; `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            max_qubits: 20,
            max_shots: 100_000,
            seed: None,
        }
    }
}

/// Finished jobs kept for `status`/`result` lookups; the oldest is evicted first.
pub const MAX_RETAINED_JOBS: usize = 256;

/// Job data for the simulator.
struct SimJob {
    job: Job,
    result: Option<ExecutionResult>,
}

/// Finished jobs in insertion order.
#[derive(Default)]
struct JobTable {
    jobs: FxHashMap<String, SimJob>,
    order: VecDeque<String>,
}

impl JobTable {
    fn insert(&mut self, id: String, job: SimJob) {
        if self.order.len() >= MAX_RETAINED_JOBS {
            if let Some(oldest) = self.order.pop_front() {
                self.jobs.remove(&oldest);
            }
        }
        self.order.push_back(id.clone());
        self.jobs.insert(id, job);
    }

    fn get(&self, id: &str) -> Option<&SimJob> {
        self.jobs.get(id)
    }

    fn len(&self) -> usize {
        self.jobs.len()
    }
}

/// Local simulator backend.
///
/// Computes the final state once per job and samples every shot from it.
/// Jobs complete inside `submit`, so `status` is always terminal.
pub struct SimulatorBackend {
    capabilities: Capabilities,
    jobs: Mutex<JobTable>,
    rng: Mutex<StdRng>,
}

impl SimulatorBackend {
    /// Backend name used for registration and in job records.
    pub const NAME: &'static str = "simulator";

    /// Create a new simulator backend with default settings.
    pub fn new() -> Self {
        Self::with_config(SimulatorConfig::default())
    }

    /// Create a simulator with custom limits.
    pub fn with_config(config: SimulatorConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            capabilities: Capabilities::simulator(Self::NAME, config.max_qubits, config.max_shots),
            jobs: Mutex::new(JobTable::default()),
            rng: Mutex::new(rng),
        }
    }

    /// Number of jobs currently retained.
    pub fn retained_jobs(&self) -> usize {
        self.jobs.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Run simulation synchronously.
    #[instrument(skip(self, circuit), fields(qubits = circuit.num_qubits(), gates = circuit.len()))]
    fn run_simulation(&self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult> {
        let start = Instant::now();

        let state = Statevector::from_circuit(circuit);
        let counts = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            state.sample_counts(shots, &mut *rng)?
        };

        let elapsed = start.elapsed();
        debug!(?elapsed, outcomes = counts.len(), "simulation completed");

        Ok(ExecutionResult::new(counts, shots).with_execution_time(elapsed.as_millis() as u64))
    }
}

impl Default for SimulatorBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for SimulatorBackend {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    async fn availability(&self) -> HalResult<BackendAvailability> {
        Ok(BackendAvailability::always_available())
    }

    #[instrument(skip(self, circuit))]
    async fn submit(&self, circuit: &Circuit, shots: u32) -> HalResult<JobId> {
        self.validate(circuit, shots)?;

        let job_id = JobId::new(Uuid::new_v4().to_string());
        let job = Job::new(job_id.clone(), shots, Self::NAME);

        let (job, result) = match self.run_simulation(circuit, shots) {
            Ok(result) => (job.with_status(JobStatus::Completed), Some(result)),
            Err(e) => (job.with_status(JobStatus::Failed(e.to_string())), None),
        };

        self.jobs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(job_id.0.clone(), SimJob { job, result });

        debug!(%job_id, "job finished");
        Ok(job_id)
    }

    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus> {
        let jobs = self.jobs.lock().unwrap_or_else(PoisonError::into_inner);
        jobs.get(&job_id.0)
            .map(|j| j.job.status.clone())
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))
    }

    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        let jobs = self.jobs.lock().unwrap_or_else(PoisonError::into_inner);
        let sim_job = jobs
            .get(&job_id.0)
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))?;
        match (&sim_job.job.status, &sim_job.result) {
            (_, Some(result)) => Ok(result.clone()),
            (JobStatus::Failed(msg), None) => Err(HalError::JobFailed(msg.clone())),
            (status, None) => Err(HalError::Backend(format!(
                "job {job_id} has no result (status: {status})"
            ))),
        }
    }
}
