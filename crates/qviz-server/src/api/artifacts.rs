//! Serves stored visualization pages.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};

use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/artifacts/{*key} - Fetch a stored page.
pub async fn get_artifact(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Result<Response, ApiError> {
    let artifact = state.artifacts.get(&key).await?;
    Ok(([(header::CONTENT_TYPE, artifact.content_type)], artifact.body).into_response())
}
