//! Explanation endpoints. Both answer 200, with fallback text when the
//! model is unavailable.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::dto::{ExplainCircuitRequest, ExplainRequest, ExplanationResponse, Success};
use crate::error::{ApiError, ApiJson};
use crate::state::AppState;

/// POST /api/ai/explain - Explain a concept.
pub async fn explain(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<ExplainRequest>,
) -> Json<Success<ExplanationResponse>> {
    let explanation = state
        .explainer
        .explain_concept(&req.concept, &req.level)
        .await;
    Json(Success::new(explanation.into()))
}

/// POST /api/ai/explain-circuit - Explain a circuit and optional results.
pub async fn explain_circuit(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<ExplainCircuitRequest>,
) -> Result<Json<Success<ExplanationResponse>>, ApiError> {
    let circuit = req.circuit.build(state.config.simulation.max_qubits)?;
    let explanation = state
        .explainer
        .explain_circuit(&circuit, req.results.as_ref(), &req.level)
        .await;
    Ok(Json(Success::new(explanation.into())))
}
