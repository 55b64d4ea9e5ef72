//! Static circuit analysis.
//!
//! Produces a structural summary of a circuit together with findings a
//! learner should look at (redundant gates, idle qubits, deep circuits) and a
//! 0–100 health score.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::circuit::Circuit;
use crate::gate::{Gate, GateKind};
use crate::qubit::QubitId;

/// Circuits longer than this get a depth warning.
pub const MAX_RECOMMENDED_DEPTH: usize = 20;

/// More entangling gates than this get an informational finding.
pub const MAX_RECOMMENDED_ENTANGLING: usize = 5;

/// How serious a finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Worth knowing, nothing wrong.
    Info,
    /// Likely unintended.
    Warning,
    /// The circuit cannot produce a meaningful result.
    Error,
}

impl Severity {
    fn penalty(self) -> u32 {
        match self {
            Severity::Info => 5,
            Severity::Warning => 15,
            Severity::Error => 30,
        }
    }
}

/// A single observation about the circuit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// Severity.
    pub severity: Severity,
    /// Machine-readable category, e.g. `"redundant_gates"`.
    pub category: &'static str,
    /// Human-readable description.
    pub message: String,
    /// Index of the gate the finding refers to, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gate_index: Option<usize>,
    /// What to do about it.
    pub suggestion: String,
}

/// Two gates that cancel each other out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Optimization {
    /// Index of the first gate of the pair.
    pub first: usize,
    /// Index of the second gate of the pair.
    pub second: usize,
    /// The cancelling gate.
    pub gate: Gate,
    /// Human-readable description.
    pub description: String,
}

/// Result of [`analyze`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CircuitAnalysis {
    pub gate_count: usize,
    pub gate_histogram: BTreeMap<GateKind, usize>,
    pub qubit_count: u32,
    pub qubits_used: Vec<QubitId>,
    pub idle_qubits: Vec<QubitId>,
    pub entangling_gates: usize,
    pub depth: usize,
    pub layered_depth: usize,
    pub complexity_score: u32,
    pub findings: Vec<Finding>,
    pub optimizations: Vec<Optimization>,
    pub health_score: u32,
}

/// Analyze a circuit. Empty circuits are accepted and reported as an error
/// finding.
pub fn analyze(circuit: &Circuit) -> CircuitAnalysis {
    let gate_count = circuit.len();
    let qubit_count = circuit.num_qubits();
    let qubits_used = circuit.used_qubits();
    let idle_qubits: Vec<QubitId> = (0..qubit_count)
        .map(QubitId)
        .filter(|q| !qubits_used.contains(q))
        .collect();
    let entangling_gates = circuit
        .gates()
        .iter()
        .filter(|g| g.kind.is_entangling())
        .count();

    let complexity_score =
        (2 * gate_count + 5 * entangling_gates) as u32 + 3 * qubit_count;

    let optimizations = find_cancellations(circuit.gates());
    let findings = collect_findings(circuit, &idle_qubits, entangling_gates, &optimizations);

    let penalty: u32 = findings.iter().map(|f| f.severity.penalty()).sum();
    let health_score = 100u32.saturating_sub(penalty);

    CircuitAnalysis {
        gate_count,
        gate_histogram: circuit.gate_counts(),
        qubit_count,
        qubits_used,
        idle_qubits,
        entangling_gates,
        depth: circuit.depth(),
        layered_depth: circuit.layered_depth(),
        complexity_score,
        findings,
        optimizations,
        health_score,
    }
}

fn collect_findings(
    circuit: &Circuit,
    idle_qubits: &[QubitId],
    entangling_gates: usize,
    optimizations: &[Optimization],
) -> Vec<Finding> {
    let mut findings = Vec::new();

    if circuit.is_empty() {
        findings.push(Finding {
            severity: Severity::Error,
            category: "empty_circuit",
            message: "The circuit contains no gates".into(),
            gate_index: None,
            suggestion: "Add at least one gate, e.g. H on qubit 0".into(),
        });
        return findings;
    }

    for opt in optimizations {
        findings.push(Finding {
            severity: Severity::Warning,
            category: "redundant_gates",
            message: format!(
                "Gates #{} and #{} ({}) cancel each other",
                opt.first, opt.second, opt.gate
            ),
            gate_index: Some(opt.second),
            suggestion: "Remove both gates; together they act as the identity".into(),
        });
    }

    if circuit.depth() > MAX_RECOMMENDED_DEPTH {
        findings.push(Finding {
            severity: Severity::Warning,
            category: "circuit_depth",
            message: format!(
                "Circuit depth ({}) exceeds the recommended maximum ({MAX_RECOMMENDED_DEPTH})",
                circuit.depth()
            ),
            gate_index: None,
            suggestion: "Merge or remove gates to shorten the circuit".into(),
        });
    }

    for qubit in idle_qubits {
        findings.push(Finding {
            severity: Severity::Info,
            category: "idle_qubit",
            message: format!("Qubit {qubit} is allocated but never used"),
            gate_index: None,
            suggestion: "Renumber qubits so indices are contiguous".into(),
        });
    }

    if entangling_gates > MAX_RECOMMENDED_ENTANGLING {
        findings.push(Finding {
            severity: Severity::Info,
            category: "entanglement",
            message: format!("High number of entangling gates ({entangling_gates})"),
            gate_index: None,
            suggestion: "Review CNOT/CZ sequences for redundancy".into(),
        });
    }

    if !circuit.gates().iter().any(|g| g.kind == GateKind::H) {
        findings.push(Finding {
            severity: Severity::Info,
            category: "deterministic",
            message: "No Hadamard gate: the outcome is deterministic".into(),
            gate_index: None,
            suggestion: "Add an H gate to explore superposition".into(),
        });
    }

    findings
}

/// Find pairs of identical self-inverse gates with nothing in between on
/// their qubits.
fn find_cancellations(gates: &[Gate]) -> Vec<Optimization> {
    let width = gates
        .iter()
        .map(|g| g.max_qubit().index() + 1)
        .max()
        .unwrap_or(0);
    let mut last: Vec<Option<usize>> = vec![None; width];
    let mut found = Vec::new();

    for (index, gate) in gates.iter().enumerate() {
        let mut previous = gate.qubits().map(|q| last[q.index()]);
        let candidate = match previous.next().flatten() {
            Some(j) if previous.all(|p| p == Some(j)) => Some(j),
            _ => None,
        };

        match candidate {
            Some(j) if gate.kind.is_self_inverse() && same_operation(&gates[j], gate) => {
                found.push(Optimization {
                    first: j,
                    second: index,
                    gate: *gate,
                    description: format!("Remove the {} pair at #{j} and #{index}", gate.kind),
                });
                for q in gate.qubits() {
                    last[q.index()] = None;
                }
            }
            _ => {
                for q in gate.qubits() {
                    last[q.index()] = Some(index);
                }
            }
        }
    }
    found
}

fn same_operation(a: &Gate, b: &Gate) -> bool {
    if a.kind != b.kind {
        return false;
    }
    match a.kind {
        GateKind::CZ | GateKind::SWAP => {
            (a.qubit == b.qubit && a.target == b.target)
                || (Some(a.qubit) == b.target && a.target == Some(b.qubit))
        }
        _ => a.qubit == b.qubit && a.target == b.target,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bell_is_healthy() {
        let analysis = analyze(&Circuit::bell());
        assert_eq!(analysis.gate_count, 2);
        assert_eq!(analysis.entangling_gates, 1);
        assert_eq!(analysis.complexity_score, 2 * 2 + 5 + 3 * 2);
        assert!(analysis.findings.is_empty());
        assert_eq!(analysis.health_score, 100);
    }

    #[test]
    fn test_double_hadamard_cancels() {
        let mut circuit = Circuit::new();
        circuit
            .h(QubitId(0))
            .unwrap()
            .x(QubitId(1))
            .unwrap()
            .h(QubitId(0))
            .unwrap();
        let analysis = analyze(&circuit);
        assert_eq!(analysis.optimizations.len(), 1);
        assert_eq!(analysis.optimizations[0].first, 0);
        assert_eq!(analysis.optimizations[0].second, 2);
        assert_eq!(analysis.health_score, 85);
    }

    #[test]
    fn test_intervening_gate_blocks_cancellation() {
        let mut circuit = Circuit::new();
        circuit
            .h(QubitId(0))
            .unwrap()
            .cnot(QubitId(0), QubitId(1))
            .unwrap()
            .h(QubitId(0))
            .unwrap();
        assert!(analyze(&circuit).optimizations.is_empty());
    }

    #[test]
    fn test_t_gates_do_not_cancel() {
        let mut circuit = Circuit::new();
        circuit.t(QubitId(0)).unwrap().t(QubitId(0)).unwrap();
        assert!(analyze(&circuit).optimizations.is_empty());
    }

    #[test]
    fn test_symmetric_swap_cancels() {
        let mut circuit = Circuit::new();
        circuit
            .swap(QubitId(0), QubitId(1))
            .unwrap()
            .swap(QubitId(1), QubitId(0))
            .unwrap();
        assert_eq!(analyze(&circuit).optimizations.len(), 1);
    }

    #[test]
    fn test_idle_qubits_and_empty() {
        let mut circuit = Circuit::new();
        circuit.h(QubitId(2)).unwrap();
        let analysis = analyze(&circuit);
        assert_eq!(analysis.idle_qubits, vec![QubitId(0), QubitId(1)]);

        let empty = analyze(&Circuit::new());
        assert_eq!(empty.findings[0].severity, Severity::Error);
        assert_eq!(empty.health_score, 70);
    }
}
