//! Service banner and health check.

use std::sync::Arc;

use axum::{Json, extract::State};
use serde::Serialize;

use crate::dto::Success;
use crate::state::AppState;

/// Service name reported by the banner and health check.
pub const SERVICE_NAME: &str = "QuantumViz";

const ENDPOINTS: &[&str] = &[
    "GET /api/health",
    "GET /api/backends",
    "POST /api/circuit/simulate",
    "POST /api/circuit/analyze",
    "POST /api/algorithms/{grover,shor,vqe,teleportation,qft}",
    "POST /api/visualize/{bloch,circuit,results}",
    "GET /api/artifacts/{key}",
    "POST /api/ai/explain",
    "POST /api/ai/explain-circuit",
    "GET /api/education/modules",
    "GET /api/education/module/{id}",
];

#[derive(Debug, Serialize)]
pub struct Banner {
    pub service: &'static str,
    pub version: &'static str,
    pub endpoints: &'static [&'static str],
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub backends: Vec<String>,
    pub default_backend: String,
    pub ai_available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_model: Option<String>,
    pub artifact_store: String,
    pub auth_enabled: bool,
}

/// GET / - Service banner.
pub async fn index() -> Json<Success<Banner>> {
    Json(Success::new(Banner {
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        endpoints: ENDPOINTS,
    }))
}

/// GET /api/health - Health check endpoint.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        backends: state.backend_names().await,
        default_backend: state.config.simulation.default_backend.clone(),
        ai_available: state.explainer.model_name().is_some(),
        ai_model: state.explainer.model_name().map(str::to_string),
        artifact_store: state.artifacts.name().to_string(),
        auth_enabled: state.config.server.api_key.is_some(),
    })
}
