//! Circuit simulation and analysis endpoints.

use std::sync::Arc;

use axum::{Json, extract::State};
use tracing::info;

use qviz_ir::{CircuitAnalysis, analyze as analyze_circuit};

use crate::dto::{AnalyzeRequest, SimulateRequest, SimulationReport, Success};
use crate::error::{ApiError, ApiJson};
use crate::state::AppState;

/// POST /api/circuit/simulate - Run a circuit and format the counts.
pub async fn simulate(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<SimulateRequest>,
) -> Result<Json<Success<SimulationReport>>, ApiError> {
    let circuit = req.circuit.build(state.config.simulation.max_qubits)?;
    let shots = state.resolve_shots(req.shots)?;
    let backend = state.backend(req.backend.as_deref()).await?;

    // The backend rejects empty circuits as a validation error.
    let result = backend.run(&circuit, shots).await?;
    info!(
        backend = backend.name(),
        gates = circuit.len(),
        qubits = circuit.num_qubits(),
        shots,
        "circuit simulated"
    );

    Ok(Json(Success::new(SimulationReport::new(
        &circuit,
        result,
        backend.name(),
    ))))
}

/// POST /api/circuit/analyze - Static analysis of a circuit.
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<AnalyzeRequest>,
) -> Result<Json<Success<CircuitAnalysis>>, ApiError> {
    let circuit = req.circuit.build(state.config.simulation.max_qubits)?;
    Ok(Json(Success::new(analyze_circuit(&circuit))))
}
