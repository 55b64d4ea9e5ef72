//! Error types for the HTTP API.

use axum::{
    Json,
    extract::{FromRequest, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use qviz_algo::AlgoError;
use qviz_hal::HalError;
use qviz_ir::IrError;
use qviz_viz::VizError;

/// API error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status and machine-readable kind.
    pub fn status_and_kind(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            ApiError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "unauthorized"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            ApiError::Backend(_) => (StatusCode::BAD_GATEWAY, "backend_error"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    status: &'static str,
    error: &'static str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = self.status_and_kind();
        if status.is_server_error() {
            tracing::error!(error, message = %self, "request failed");
        } else {
            tracing::debug!(error, message = %self, "request rejected");
        }

        let body = Json(ErrorResponse {
            status: "error",
            error,
            message: self.to_string(),
        });

        (status, body).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<IrError> for ApiError {
    fn from(e: IrError) -> Self {
        ApiError::Validation(e.to_string())
    }
}

impl From<HalError> for ApiError {
    fn from(e: HalError) -> Self {
        if e.is_validation() {
            ApiError::Validation(e.to_string())
        } else {
            ApiError::Backend(e.to_string())
        }
    }
}

impl From<AlgoError> for ApiError {
    fn from(e: AlgoError) -> Self {
        match e {
            AlgoError::Backend(e) => e.into(),
            e if e.is_validation() => ApiError::Validation(e.to_string()),
            e => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<VizError> for ApiError {
    fn from(e: VizError) -> Self {
        match e {
            VizError::NotFound(key) => ApiError::NotFound(format!("artifact {key}")),
            e if e.is_validation() => ApiError::Validation(e.to_string()),
            e => ApiError::Backend(e.to_string()),
        }
    }
}

/// JSON body extractor whose rejections are [`ApiError`]s.
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
