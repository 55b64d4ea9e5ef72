//! Integration tests for the QuantumViz API.

use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use qviz_explain::{Explainer, GeminiClient};
use qviz_server::{AppState, Config, create_router};
use serde_json::{Value, json};

// ============================================================================
// Test helpers
// ============================================================================

const API_KEY: &str = "test-key";

fn test_config() -> Config {
    let mut config = Config::default();
    config.simulation.seed = Some(42);
    config
}

fn test_server(state: AppState) -> TestServer {
    let router = create_router(Arc::new(state));
    TestServer::new(router).expect("test server")
}

fn open_server() -> TestServer {
    test_server(AppState::new(test_config()))
}

fn keyed_server() -> TestServer {
    let mut config = test_config();
    config.server.api_key = Some(API_KEY.to_string());
    test_server(AppState::new(config))
}

fn api_key_header() -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static("x-api-key"),
        HeaderValue::from_static(API_KEY),
    )
}

fn bell_circuit() -> Value {
    json!({
        "gates": [
            {"type": "H", "qubit": 0},
            {"type": "CNOT", "qubit": 0, "target": 1}
        ]
    })
}

fn assert_error(body: &Value, kind: &str) {
    assert_eq!(body["status"], "error");
    assert_eq!(body["error"], kind);
    assert!(body["message"].as_str().is_some_and(|m| !m.is_empty()));
}

// ============================================================================
// Banner, health, backends
// ============================================================================

#[tokio::test]
async fn test_banner() {
    let server = open_server();
    let response = server.get("/").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "success");
    assert_eq!(body["service"], "QuantumViz");
    assert!(body["endpoints"].as_array().unwrap().len() > 5);
}

#[tokio::test]
async fn test_health_returns_ok() {
    let server = open_server();
    let response = server.get("/api/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["backends"], json!(["simulator"]));
    assert_eq!(body["ai_available"], false);
    assert_eq!(body["artifact_store"], "memory");
    assert!(body["version"].as_str().is_some());
}

#[tokio::test]
async fn test_list_backends() {
    let server = open_server();
    let response = server.get("/api/backends").await;
    response.assert_status_ok();

    let body: Value = response.json();
    let backends = body["backends"].as_array().unwrap();
    assert_eq!(backends.len(), 1);
    assert_eq!(backends[0]["name"], "simulator");
    assert_eq!(backends[0]["available"], true);
    assert_eq!(backends[0]["capabilities"]["is_simulator"], true);
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let server = open_server();
    let response = server.get("/api/nope").await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_error(&response.json(), "not_found");
}

// ============================================================================
// Simulation
// ============================================================================

#[tokio::test]
async fn test_simulate_bell_state() {
    let server = open_server();
    let response = server
        .post("/api/circuit/simulate")
        .json(&json!({ "circuit": bell_circuit() }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "success");
    assert_eq!(body["shots"], 1024);
    assert_eq!(body["qubit_count"], 2);
    assert_eq!(body["gate_count"], 2);
    assert_eq!(body["backend"], "simulator");

    let results = body["results"].as_object().unwrap();
    let mut total = 0;
    for (bits, count) in results {
        assert!(bits == "00" || bits == "11", "unexpected outcome {bits}");
        let count = count.as_u64().unwrap();
        assert!((450..=580).contains(&count), "{bits}: {count}");
        total += count;
    }
    assert_eq!(total, 1024);
    assert_eq!(body["statistics"]["unique_outcomes"], 2);
}

#[tokio::test]
async fn test_simulate_respects_shots() {
    let server = open_server();
    let response = server
        .post("/api/circuit/simulate")
        .json(&json!({
            "circuit": {"gates": [{"type": "X", "qubit": 2}]},
            "shots": 100
        }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["results"], json!({"001": 100}));
    assert_eq!(body["probabilities"]["001"], 1.0);
}

#[tokio::test]
async fn test_empty_circuit_is_validation_error() {
    let server = open_server();
    let response = server
        .post("/api/circuit/simulate")
        .json(&json!({ "circuit": { "gates": [] } }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_error(&response.json(), "validation_error");
}

#[tokio::test]
async fn test_invalid_gates_are_rejected() {
    let server = open_server();
    let cases = [
        json!({"gates": [{"type": "CNOT", "qubit": 0}]}),
        json!({"gates": [{"type": "CNOT", "qubit": 1, "target": 1}]}),
        json!({"gates": [{"type": "RX", "qubit": 0}]}),
        json!({"gates": [{"type": "H", "qubit": -1}]}),
        json!({"gates": [{"type": "H", "qubit": 64}]}),
    ];
    for circuit in cases {
        let response = server
            .post("/api/circuit/simulate")
            .json(&json!({ "circuit": circuit }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_error(&response.json(), "validation_error");
    }
}

#[tokio::test]
async fn test_bad_shots_and_backend() {
    let server = open_server();
    for body in [
        json!({ "circuit": bell_circuit(), "shots": 0 }),
        json!({ "circuit": bell_circuit(), "shots": 1_000_000 }),
        json!({ "circuit": bell_circuit(), "backend": "ibm" }),
    ] {
        let response = server.post("/api/circuit/simulate").json(&body).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_error(&response.json(), "validation_error");
    }
}

#[tokio::test]
async fn test_malformed_json_is_validation_error() {
    let server = open_server();

    let response = server
        .post("/api/circuit/simulate")
        .bytes(axum::body::Bytes::from_static(b"{\"circuit\": "))
        .content_type("application/json")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_error(&response.json(), "validation_error");

    let response = server
        .post("/api/circuit/simulate")
        .json(&json!({ "shots": 10 }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_error(&response.json(), "validation_error");
}

#[tokio::test]
async fn test_analyze_circuit() {
    let server = open_server();
    let response = server
        .post("/api/circuit/analyze")
        .json(&json!({
            "circuit": {"gates": [
                {"type": "H", "qubit": 0},
                {"type": "H", "qubit": 0},
                {"type": "CNOT", "qubit": 0, "target": 1}
            ]}
        }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "success");
    assert_eq!(body["gate_count"], 3);
    assert_eq!(body["entangling_gates"], 1);
    assert_eq!(body["optimizations"].as_array().unwrap().len(), 1);

    // Empty circuits can be analyzed, unlike simulated.
    let response = server
        .post("/api/circuit/analyze")
        .json(&json!({ "circuit": { "gates": [] } }))
        .await;
    response.assert_status_ok();
}

// ============================================================================
// Authentication
// ============================================================================

#[tokio::test]
async fn test_post_requires_api_key() {
    let server = keyed_server();
    let response = server
        .post("/api/circuit/simulate")
        .json(&json!({ "circuit": bell_circuit() }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_error(&response.json(), "unauthorized");

    let response = server
        .post("/api/circuit/simulate")
        .add_header(
            HeaderName::from_static("x-api-key"),
            HeaderValue::from_static("wrong-key"),
        )
        .json(&json!({ "circuit": bell_circuit() }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_api_key_header_and_bearer_accepted() {
    let server = keyed_server();
    let (name, value) = api_key_header();
    let response = server
        .post("/api/circuit/simulate")
        .add_header(name, value)
        .json(&json!({ "circuit": bell_circuit() }))
        .await;
    response.assert_status_ok();

    let response = server
        .post("/api/ai/explain")
        .add_header(
            axum::http::header::AUTHORIZATION,
            HeaderValue::from_static("Bearer test-key"),
        )
        .json(&json!({}))
        .await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_get_routes_are_public() {
    let server = keyed_server();
    server.get("/api/health").await.assert_status_ok();
    server.get("/api/backends").await.assert_status_ok();
    server.get("/api/education/modules").await.assert_status_ok();
}

// ============================================================================
// Algorithms
// ============================================================================

#[tokio::test]
async fn test_grover_defaults() {
    let server = open_server();
    let response = server.post("/api/algorithms/grover").json(&json!({})).await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["algorithm"], "grover");
    assert_eq!(body["search_space"], 8);
    assert!(body["success_rate"].as_f64().unwrap() > 0.8);
}

#[tokio::test]
async fn test_grover_rejects_bad_search_space() {
    let server = open_server();
    let response = server
        .post("/api/algorithms/grover")
        .json(&json!({ "search_space": 6, "targets": [1] }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_error(&response.json(), "validation_error");
}

#[tokio::test]
async fn test_grover_rejects_runaway_iterations() {
    let server = open_server();
    let response = server
        .post("/api/algorithms/grover")
        .json(&json!({ "search_space": 4096, "targets": [1], "iterations": 4294967295u32 }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_error(&response.json(), "validation_error");
}

#[tokio::test]
async fn test_shor_factors_fifteen() {
    let server = open_server();
    let response = server
        .post("/api/algorithms/shor")
        .json(&json!({ "number": 15, "random_base": 7 }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["algorithm"], "shor");
    assert_eq!(body["success"], true);
    assert_eq!(body["factors"], json!([3, 5]));
}

#[tokio::test]
async fn test_shor_rejects_prime() {
    let server = open_server();
    let response = server
        .post("/api/algorithms/shor")
        .json(&json!({ "number": 17 }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_vqe_finds_ground_state() {
    let server = open_server();
    let response = server.post("/api/algorithms/vqe").json(&json!({})).await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["algorithm"], "vqe");
    assert!((body["energy"].as_f64().unwrap() + 1.0).abs() < 1e-3);
}

#[tokio::test]
async fn test_vqe_rejects_non_square_hamiltonian() {
    let server = open_server();
    let response = server
        .post("/api/algorithms/vqe")
        .json(&json!({ "hamiltonian": [[1.0, 0.0], [0.0]] }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_teleportation_plus_state() {
    let server = open_server();
    let response = server
        .post("/api/algorithms/teleportation")
        .json(&json!({ "message": "+", "shots": 256 }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["algorithm"], "teleportation");
    assert_eq!(body["success"], true);
    assert_eq!(body["backend"], "simulator");
}

#[tokio::test]
async fn test_teleportation_rejects_unknown_message() {
    let server = open_server();
    let response = server
        .post("/api/algorithms/teleportation")
        .json(&json!({ "message": "2" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_qft_fidelity() {
    let server = open_server();
    let response = server
        .post("/api/algorithms/qft")
        .json(&json!({ "num_qubits": 3, "input_state": 5 }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert!((body["fidelity"].as_f64().unwrap() - 1.0).abs() < 1e-9);
}

// ============================================================================
// Visualization
// ============================================================================

#[tokio::test]
async fn test_bloch_visualization_is_served() {
    let server = open_server();
    let response = server
        .post("/api/visualize/bloch")
        .json(&json!({ "qubit_state": [1, 1] }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["store"], "memory");
    assert!((body["bloch"]["x"].as_f64().unwrap() - 1.0).abs() < 1e-9);

    let url = body["visualization_url"].as_str().unwrap();
    assert!(url.starts_with("/api/artifacts/visualizations/bloch_sphere_"));

    let page = server.get(url).await;
    page.assert_status_ok();
    assert!(page.text().contains("Plotly.newPlot"));
}

#[tokio::test]
async fn test_bloch_rejects_zero_state() {
    let server = open_server();
    let response = server
        .post("/api/visualize/bloch")
        .json(&json!({ "qubit_state": [0, 0] }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_circuit_visualization() {
    let server = open_server();
    let response = server
        .post("/api/visualize/circuit")
        .json(&json!({ "circuit": bell_circuit() }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["gate_count"], 2);
    assert!(
        body["key"]
            .as_str()
            .unwrap()
            .starts_with("visualizations/circuit_analysis_")
    );
}

#[tokio::test]
async fn test_results_visualization() {
    let server = open_server();
    let response = server
        .post("/api/visualize/results")
        .json(&json!({ "results": {"11": 3, "00": 1} }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["shots"], 4);
    assert_eq!(body["histogram"][0]["bitstring"], "00");
    assert_eq!(body["histogram"][1]["probability"], 0.75);

    let response = server
        .post("/api/visualize/results")
        .json(&json!({ "circuit": bell_circuit(), "shots": 64 }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["shots"], 64);

    let response = server.post("/api/visualize/results").json(&json!({})).await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_artifact_is_404() {
    let server = open_server();
    let response = server.get("/api/artifacts/visualizations/missing.html").await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_error(&response.json(), "not_found");
}

// ============================================================================
// Explanations
// ============================================================================

#[tokio::test]
async fn test_explain_without_model_uses_fallback() {
    let server = open_server();
    let response = server
        .post("/api/ai/explain")
        .json(&json!({ "concept": "entanglement", "level": "advanced" }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "success");
    assert_eq!(body["concept"], "entanglement");
    assert_eq!(body["level"], "advanced");
    assert_eq!(body["source"], "fallback");
    assert_eq!(body["fallback"], true);
    assert!(!body["explanation"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_explain_with_unreachable_model_still_succeeds() {
    let client = GeminiClient::new("unused", Duration::from_millis(500))
        .unwrap()
        .with_base_url("http://127.0.0.1:1");
    let state =
        AppState::new(test_config()).with_explainer(Explainer::with_model(Arc::new(client)));
    let server = test_server(state);

    let response = server.post("/api/ai/explain").json(&json!({})).await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["concept"], "quantum superposition");
    assert_eq!(body["level"], "beginner");
    assert_eq!(body["fallback"], true);

    let response = server
        .post("/api/ai/explain-circuit")
        .json(&json!({ "circuit": bell_circuit(), "results": {"00": 5, "11": 5} }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["fallback"], true);
    assert!(body["explanation"].as_str().unwrap().contains("2"));
}

#[tokio::test]
async fn test_explain_circuit_rejects_invalid_circuit() {
    let server = open_server();
    let response = server
        .post("/api/ai/explain-circuit")
        .json(&json!({ "circuit": {"gates": [{"type": "SWAP", "qubit": 0}]} }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

// ============================================================================
// Education
// ============================================================================

#[tokio::test]
async fn test_education_modules() {
    let server = open_server();
    let response = server.get("/api/education/modules").await;
    response.assert_status_ok();

    let body: Value = response.json();
    let modules = body["modules"].as_array().unwrap();
    assert_eq!(modules.len(), 4);
    assert_eq!(modules[0]["id"], "superposition");

    let response = server.get("/api/education/module/entanglement").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["module"]["title"], "Quantum Entanglement");
    assert_eq!(
        body["module"]["content"]["mathematics"],
        "|Φ⁺⟩ = (|00⟩ + |11⟩)/√2"
    );
}

#[tokio::test]
async fn test_unknown_education_module_is_404() {
    let server = open_server();
    let response = server.get("/api/education/module/relativity").await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_error(&response.json(), "not_found");
}
