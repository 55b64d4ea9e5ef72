//! Algorithm demo endpoints.

use std::sync::Arc;

use axum::{Json, extract::State};
use tracing::info;

use qviz_algo::grover::{self, GroverOutcome, GroverParams};
use qviz_algo::qft::{self, QftOutcome};
use qviz_algo::shor::{self, ShorOutcome, ShorParams};
use qviz_algo::teleportation::{self, TeleportationOutcome};
use qviz_algo::vqe::{self, VqeOutcome, VqeParams};

use crate::dto::{
    AlgorithmResponse, GroverRequest, QftRequest, ShorRequest, Success, TeleportationRequest,
    VqeRequest,
};
use crate::error::{ApiError, ApiJson};
use crate::state::AppState;

type AlgorithmJson<T> = Json<Success<AlgorithmResponse<T>>>;

fn respond<T>(algorithm: &'static str, outcome: T) -> AlgorithmJson<T> {
    Json(Success {
        status: "success",
        body: AlgorithmResponse { algorithm, outcome },
    })
}

/// POST /api/algorithms/grover - Grover search.
pub async fn grover(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<GroverRequest>,
) -> Result<AlgorithmJson<GroverOutcome>, ApiError> {
    let params = GroverParams {
        search_space: req.search_space,
        targets: req.targets,
        iterations: req.iterations,
        shots: state.resolve_shots(req.shots)?,
    };
    let outcome = grover::run(&params, &mut state.rng())?;
    info!(
        search_space = outcome.search_space,
        iterations = outcome.iterations,
        success_rate = outcome.success_rate,
        "grover search finished"
    );
    Ok(respond("grover", outcome))
}

/// POST /api/algorithms/shor - Shor factorization.
pub async fn shor(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<ShorRequest>,
) -> Result<AlgorithmJson<ShorOutcome>, ApiError> {
    let params = ShorParams {
        number: req.number,
        base: req.base,
        shots: state.resolve_shots(req.shots)?,
    };
    let outcome = shor::run(&params, &mut state.rng())?;
    info!(
        number = outcome.number,
        base = outcome.base,
        success = outcome.success,
        "shor factorization finished"
    );
    Ok(respond("shor", outcome))
}

/// POST /api/algorithms/vqe - Variational eigensolver.
pub async fn vqe(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<VqeRequest>,
) -> Result<AlgorithmJson<VqeOutcome>, ApiError> {
    let mut params = VqeParams::from_rows(&req.hamiltonian, req.ansatz_depth)?;
    params.shots = state.resolve_shots(req.shots)?;
    if let Some(sweeps) = req.max_sweeps {
        params.max_sweeps = sweeps;
    }
    let outcome = vqe::run(&params, &mut state.rng())?;
    info!(
        qubits = outcome.num_qubits,
        energy = outcome.energy,
        sweeps = outcome.sweeps,
        "vqe finished"
    );
    Ok(respond("vqe", outcome))
}

/// POST /api/algorithms/teleportation - Teleport a one-qubit message.
pub async fn teleportation(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<TeleportationRequest>,
) -> Result<AlgorithmJson<TeleportationOutcome>, ApiError> {
    let shots = state.resolve_shots(req.shots)?;
    let backend = state.backend(req.backend.as_deref()).await?;
    let outcome = teleportation::run(backend.as_ref(), req.message, shots).await?;
    info!(
        message = %outcome.message,
        backend = %outcome.backend,
        fidelity = outcome.fidelity,
        "teleportation finished"
    );
    Ok(respond("teleportation", outcome))
}

/// POST /api/algorithms/qft - Quantum Fourier transform of a basis state.
pub async fn qft(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<QftRequest>,
) -> Result<AlgorithmJson<QftOutcome>, ApiError> {
    let shots = state.resolve_shots(req.shots)?;
    let outcome = qft::run(req.num_qubits, req.input_state, shots, &mut state.rng())?;
    info!(
        qubits = outcome.num_qubits,
        input = outcome.input_state,
        fidelity = outcome.fidelity,
        "qft finished"
    );
    Ok(respond("qft", outcome))
}
