//! Backend status and capabilities.

use std::sync::Arc;

use axum::{Json, extract::State};
use serde::Serialize;

use qviz_hal::Capabilities;

use crate::dto::Success;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct BackendSummary {
    pub name: String,
    pub available: bool,
    pub status_message: Option<String>,
    pub capabilities: Capabilities,
}

#[derive(Debug, Serialize)]
pub struct BackendList {
    pub default_backend: String,
    pub backends: Vec<BackendSummary>,
}

/// GET /api/backends - List all registered backends.
pub async fn list_backends(State(state): State<Arc<AppState>>) -> Json<Success<BackendList>> {
    let backends = state.backends.read().await;
    let mut summaries = Vec::with_capacity(backends.len());

    for (name, backend) in backends.iter() {
        let (available, status_message) = match backend.availability().await {
            Ok(a) => (a.is_available, a.status_message),
            Err(e) => (false, Some(e.to_string())),
        };
        summaries.push(BackendSummary {
            name: name.clone(),
            available,
            status_message,
            capabilities: backend.capabilities().clone(),
        });
    }
    summaries.sort_by(|a, b| a.name.cmp(&b.name));

    Json(Success::new(BackendList {
        default_backend: state.config.simulation.default_backend.clone(),
        backends: summaries,
    }))
}
