//! Visualization endpoints; each stores an HTML page and returns its URL.

use std::sync::Arc;

use axum::{Json, extract::State};

use qviz_hal::Counts;
use qviz_viz::{QubitState, bloch_figure, circuit_figure, histogram_figure, publish};

use crate::dto::{
    BlochDetails, BlochRequest, CircuitDetails, CircuitVisualizationRequest, ResultsDetails,
    ResultsVisualizationRequest, Success, VisualizationResponse, histogram,
};
use crate::error::{ApiError, ApiJson};
use crate::state::AppState;

type VisualizationJson<T> = Json<Success<VisualizationResponse<T>>>;

/// POST /api/visualize/bloch - Bloch sphere of a single-qubit state.
pub async fn bloch(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<BlochRequest>,
) -> Result<VisualizationJson<BlochDetails>, ApiError> {
    let qubit = QubitState::from_amplitudes(&req.qubit_state)?;
    let vector = qubit.bloch();

    let artifact = publish(
        state.artifacts.as_ref(),
        &state.config.visualization.prefix,
        "bloch_sphere",
        "Bloch sphere",
        &bloch_figure(&vector),
    )
    .await?;

    Ok(Json(Success::new(VisualizationResponse::new(
        artifact,
        state.artifacts.name(),
        BlochDetails {
            bloch: vector,
            prob_zero: qubit.prob_zero(),
            prob_one: qubit.prob_one(),
        },
    ))))
}

/// POST /api/visualize/circuit - Circuit diagram and gate histogram.
pub async fn circuit(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CircuitVisualizationRequest>,
) -> Result<VisualizationJson<CircuitDetails>, ApiError> {
    let circuit = req.circuit.build(state.config.simulation.max_qubits)?;

    let artifact = publish(
        state.artifacts.as_ref(),
        &state.config.visualization.prefix,
        "circuit_analysis",
        "Circuit analysis",
        &circuit_figure(&circuit),
    )
    .await?;

    Ok(Json(Success::new(VisualizationResponse::new(
        artifact,
        state.artifacts.name(),
        CircuitDetails {
            gate_count: circuit.len(),
            qubit_count: circuit.num_qubits(),
            circuit_depth: circuit.depth(),
        },
    ))))
}

/// POST /api/visualize/results - Measurement histogram.
///
/// Takes explicit `results`, or a `circuit` that is simulated first.
pub async fn results(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<ResultsVisualizationRequest>,
) -> Result<VisualizationJson<ResultsDetails>, ApiError> {
    let counts: Counts = match (req.results, req.circuit) {
        (Some(counts), _) => counts,
        (None, Some(dto)) => {
            let circuit = dto.build(state.config.simulation.max_qubits)?;
            let shots = state.resolve_shots(req.shots)?;
            let backend = state.backend(None).await?;
            backend.run(&circuit, shots).await?.counts
        }
        (None, None) => {
            return Err(ApiError::Validation(
                "either results or circuit is required".into(),
            ));
        }
    };
    if counts.is_empty() {
        return Err(ApiError::Validation("results are empty".into()));
    }

    let artifact = publish(
        state.artifacts.as_ref(),
        &state.config.visualization.prefix,
        "measurement_results",
        "Measurement results",
        &histogram_figure(&counts),
    )
    .await?;

    Ok(Json(Success::new(VisualizationResponse::new(
        artifact,
        state.artifacts.name(),
        ResultsDetails {
            shots: counts.total(),
            histogram: histogram(&counts),
        },
    ))))
}
