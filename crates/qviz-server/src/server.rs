//! Axum server setup and routing.

use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderName, HeaderValue, Method, header},
    middleware,
    routing::{get, post},
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::api;
use crate::auth::{self, API_KEY_HEADER, AuthState};
use crate::error::ApiError;
use crate::state::AppState;

/// Create the Axum router with all routes.
///
/// POST routes sit behind the API key check; GET routes are public.
pub fn create_router(state: Arc<AppState>) -> Router {
    let auth_state = AuthState::new(state.config.server.api_key.clone());

    let protected = Router::new()
        .route("/circuit/simulate", post(api::circuits::simulate))
        .route("/circuit/analyze", post(api::circuits::analyze))
        .route("/algorithms/grover", post(api::algorithms::grover))
        .route("/algorithms/shor", post(api::algorithms::shor))
        .route("/algorithms/vqe", post(api::algorithms::vqe))
        .route(
            "/algorithms/teleportation",
            post(api::algorithms::teleportation),
        )
        .route("/algorithms/qft", post(api::algorithms::qft))
        .route("/visualize/bloch", post(api::visualize::bloch))
        .route("/visualize/circuit", post(api::visualize::circuit))
        .route("/visualize/results", post(api::visualize::results))
        .route("/ai/explain", post(api::ai::explain))
        .route("/ai/explain-circuit", post(api::ai::explain_circuit))
        .route_layer(middleware::from_fn_with_state(
            auth_state,
            auth::require_api_key,
        ));

    let public = Router::new()
        .route("/health", get(api::health::health))
        .route("/backends", get(api::backends::list_backends))
        .route("/artifacts/{*key}", get(api::artifacts::get_artifact))
        .route("/education/modules", get(api::education::list_modules))
        .route("/education/module/{id}", get(api::education::get_module));

    Router::new()
        .route("/", get(api::health::index))
        .nest("/api", public.merge(protected))
        .fallback(not_found)
        .layer(CompressionLayer::new())
        .layer(build_cors_layer(&state.config.server.cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found() -> ApiError {
    ApiError::NotFound("no such route".into())
}

/// CORS for `"*"` or a comma-separated origin list.
fn build_cors_layer(origins: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static(API_KEY_HEADER),
        ]);

    if origins.trim() == "*" {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = o, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(allowed)
}
