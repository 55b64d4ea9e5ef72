//! Request and response bodies.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use qviz_algo::teleportation::Message;
use qviz_hal::{Counts, ExecutionResult};
use qviz_ir::{Circuit, GateSpec, IrResult};
use qviz_viz::{Amplitude, ArtifactRef, BlochVector};

/// Wraps a response body with `"status": "success"`.
#[derive(Debug, Serialize)]
pub struct Success<T> {
    pub status: &'static str,
    #[serde(flatten)]
    pub body: T,
}

impl<T: Serialize> Success<T> {
    pub fn new(body: T) -> Self {
        Self {
            status: "success",
            body,
        }
    }
}

/// A circuit as sent by clients.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CircuitDto {
    #[serde(default)]
    pub gates: Vec<GateSpec>,
}

impl CircuitDto {
    /// Build a validated circuit whose qubit indices stay below `qubit_limit`.
    pub fn build(&self, qubit_limit: u32) -> IrResult<Circuit> {
        Circuit::from_specs(&self.gates, Some(qubit_limit))
    }
}

#[derive(Debug, Deserialize)]
pub struct SimulateRequest {
    pub circuit: CircuitDto,
    #[serde(default)]
    pub shots: Option<u32>,
    #[serde(default)]
    pub backend: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub circuit: CircuitDto,
}

/// Summary statistics over measurement counts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    pub unique_outcomes: usize,
    pub most_frequent: Option<String>,
    pub most_frequent_count: u64,
    /// Shannon entropy of the outcome distribution.
    pub entropy_bits: f64,
}

impl Statistics {
    pub fn from_counts(counts: &Counts) -> Self {
        let (most_frequent, most_frequent_count) = match counts.most_frequent() {
            Some((bits, n)) => (Some(bits.clone()), n),
            None => (None, 0),
        };
        Self {
            unique_outcomes: counts.len(),
            most_frequent,
            most_frequent_count,
            entropy_bits: counts.entropy(),
        }
    }
}

/// One bar of a measurement histogram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBar {
    pub bitstring: String,
    pub count: u64,
    pub probability: f64,
}

/// Histogram bars sorted by bit-string.
pub fn histogram(counts: &Counts) -> Vec<HistogramBar> {
    let total = counts.total().max(1) as f64;
    counts
        .iter()
        .map(|(bits, &count)| HistogramBar {
            bitstring: bits.clone(),
            count,
            probability: count as f64 / total,
        })
        .collect()
}

/// Formatted simulation result.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub results: Counts,
    pub probabilities: BTreeMap<String, f64>,
    pub circuit_depth: usize,
    pub qubit_count: u32,
    pub gate_count: usize,
    pub shots: u32,
    pub backend: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<u64>,
    pub statistics: Statistics,
    pub histogram: Vec<HistogramBar>,
}

impl SimulationReport {
    pub fn new(circuit: &Circuit, result: ExecutionResult, backend: impl Into<String>) -> Self {
        Self {
            probabilities: result.counts.probabilities(),
            statistics: Statistics::from_counts(&result.counts),
            histogram: histogram(&result.counts),
            circuit_depth: circuit.depth(),
            qubit_count: circuit.num_qubits(),
            gate_count: circuit.len(),
            shots: result.shots,
            backend: backend.into(),
            execution_time_ms: result.execution_time_ms,
            results: result.counts,
        }
    }
}

fn default_search_space() -> usize {
    8
}

fn default_targets() -> Vec<usize> {
    vec![3, 5]
}

#[derive(Debug, Deserialize)]
pub struct GroverRequest {
    #[serde(default = "default_search_space")]
    pub search_space: usize,
    #[serde(default = "default_targets")]
    pub targets: Vec<usize>,
    #[serde(default)]
    pub iterations: Option<u32>,
    #[serde(default)]
    pub shots: Option<u32>,
}

fn default_number() -> u64 {
    15
}

#[derive(Debug, Deserialize)]
pub struct ShorRequest {
    #[serde(default = "default_number")]
    pub number: u64,
    #[serde(default, alias = "random_base")]
    pub base: Option<u64>,
    #[serde(default)]
    pub shots: Option<u32>,
}

fn default_hamiltonian() -> Vec<Vec<f64>> {
    vec![vec![1.0, 0.0], vec![0.0, -1.0]]
}

fn default_ansatz_depth() -> usize {
    3
}

#[derive(Debug, Deserialize)]
pub struct VqeRequest {
    #[serde(default = "default_hamiltonian")]
    pub hamiltonian: Vec<Vec<f64>>,
    #[serde(default = "default_ansatz_depth")]
    pub ansatz_depth: usize,
    #[serde(default)]
    pub max_sweeps: Option<usize>,
    #[serde(default)]
    pub shots: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct TeleportationRequest {
    #[serde(default)]
    pub message: Message,
    #[serde(default)]
    pub backend: Option<String>,
    #[serde(default)]
    pub shots: Option<u32>,
}

fn default_qft_qubits() -> u32 {
    3
}

fn default_qft_input() -> usize {
    1
}

#[derive(Debug, Deserialize)]
pub struct QftRequest {
    #[serde(default = "default_qft_qubits")]
    pub num_qubits: u32,
    #[serde(default = "default_qft_input")]
    pub input_state: usize,
    #[serde(default)]
    pub shots: Option<u32>,
}

/// Algorithm outcome tagged with the algorithm's name.
#[derive(Debug, Serialize)]
pub struct AlgorithmResponse<T> {
    pub algorithm: &'static str,
    #[serde(flatten)]
    pub outcome: T,
}

fn default_qubit_state() -> Vec<Amplitude> {
    vec![Amplitude::Real(1.0), Amplitude::Real(0.0)]
}

#[derive(Debug, Deserialize)]
pub struct BlochRequest {
    #[serde(default = "default_qubit_state")]
    pub qubit_state: Vec<Amplitude>,
}

#[derive(Debug, Deserialize)]
pub struct CircuitVisualizationRequest {
    pub circuit: CircuitDto,
}

/// Either explicit counts, or a circuit to simulate first.
#[derive(Debug, Deserialize)]
pub struct ResultsVisualizationRequest {
    #[serde(default)]
    pub results: Option<Counts>,
    #[serde(default)]
    pub circuit: Option<CircuitDto>,
    #[serde(default)]
    pub shots: Option<u32>,
}

/// A stored visualization.
#[derive(Debug, Serialize)]
pub struct VisualizationResponse<T> {
    pub visualization_url: String,
    pub key: String,
    pub store: String,
    #[serde(flatten)]
    pub details: T,
}

impl<T> VisualizationResponse<T> {
    pub fn new(artifact: ArtifactRef, store: &str, details: T) -> Self {
        Self {
            visualization_url: artifact.url,
            key: artifact.key,
            store: store.to_string(),
            details,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BlochDetails {
    pub bloch: BlochVector,
    pub prob_zero: f64,
    pub prob_one: f64,
}

#[derive(Debug, Serialize)]
pub struct CircuitDetails {
    pub gate_count: usize,
    pub qubit_count: u32,
    pub circuit_depth: usize,
}

#[derive(Debug, Serialize)]
pub struct ResultsDetails {
    pub shots: u64,
    pub histogram: Vec<HistogramBar>,
}

fn default_concept() -> String {
    qviz_explain::DEFAULT_CONCEPT.to_string()
}

fn default_level() -> String {
    qviz_explain::DEFAULT_LEVEL.to_string()
}

#[derive(Debug, Deserialize)]
pub struct ExplainRequest {
    #[serde(default = "default_concept")]
    pub concept: String,
    #[serde(default = "default_level")]
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct ExplainCircuitRequest {
    pub circuit: CircuitDto,
    #[serde(default)]
    pub results: Option<Counts>,
    #[serde(default = "default_level")]
    pub level: String,
}

#[derive(Debug, Serialize)]
pub struct ExplanationResponse {
    pub explanation: String,
    pub concept: String,
    pub level: String,
    pub source: String,
    pub fallback: bool,
}

impl From<qviz_explain::Explanation> for ExplanationResponse {
    fn from(e: qviz_explain::Explanation) -> Self {
        Self {
            fallback: e.is_fallback(),
            explanation: e.text,
            concept: e.concept,
            level: e.level,
            source: e.source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bell_result() -> ExecutionResult {
        let counts: Counts = [("00".to_string(), 510), ("11".to_string(), 514)]
            .into_iter()
            .collect();
        ExecutionResult::new(counts, 1024).with_execution_time(3)
    }

    #[test]
    fn test_simulation_report() {
        let report = SimulationReport::new(&Circuit::bell(), bell_result(), "simulator");
        assert_eq!(report.qubit_count, 2);
        assert_eq!(report.gate_count, 2);
        assert_eq!(report.circuit_depth, 2);
        assert_eq!(report.statistics.unique_outcomes, 2);
        assert_eq!(report.statistics.most_frequent.as_deref(), Some("11"));
        assert!((report.statistics.entropy_bits - 1.0).abs() < 1e-3);
        assert!((report.probabilities["00"] - 510.0 / 1024.0).abs() < 1e-12);
        assert_eq!(report.histogram[0].bitstring, "00");
    }

    #[test]
    fn test_success_wrapper_flattens() {
        let report = SimulationReport::new(&Circuit::bell(), bell_result(), "simulator");
        let value = serde_json::to_value(Success::new(report)).unwrap();
        assert_eq!(value["status"], "success");
        assert_eq!(value["results"], json!({"00": 510, "11": 514}));
        assert_eq!(value["execution_time_ms"], 3);
    }

    #[test]
    fn test_request_defaults() {
        let grover: GroverRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(grover.search_space, 8);
        assert_eq!(grover.targets, vec![3, 5]);

        let shor: ShorRequest = serde_json::from_value(json!({"random_base": 7})).unwrap();
        assert_eq!(shor.number, 15);
        assert_eq!(shor.base, Some(7));

        let teleport: TeleportationRequest = serde_json::from_value(json!({"message": "+"})).unwrap();
        assert_eq!(teleport.message, Message::Plus);

        let explain: ExplainRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(explain.concept, "quantum superposition");
        assert_eq!(explain.level, "beginner");
    }

    #[test]
    fn test_circuit_dto_builds() {
        let dto: CircuitDto = serde_json::from_value(json!({
            "gates": [{"type": "H", "qubit": 0}, {"type": "CNOT", "qubit": 0, "target": 1}]
        }))
        .unwrap();
        let circuit = dto.build(20).unwrap();
        assert_eq!(circuit.num_qubits(), 2);
        assert!(dto.build(1).is_err());

        let bad: CircuitDto =
            serde_json::from_value(json!({"gates": [{"type": "CNOT", "qubit": 0}]})).unwrap();
        assert!(bad.build(20).is_err());
    }
}
