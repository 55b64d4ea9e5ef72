//! High-level circuit builder API.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::{IrError, IrResult};
use crate::gate::{Gate, GateKind, GateSpec};
use crate::qubit::QubitId;

/// A quantum circuit: an ordered list of gates.
///
/// Gates are validated on [`Circuit::append`]; once appended they are never
/// modified. The qubit count is derived from the highest index any gate
/// references. There is no `Deserialize`: circuits from the wire go through
/// [`Circuit::from_specs`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Circuit {
    gates: Vec<Gate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    qubit_limit: Option<u32>,
}

impl Circuit {
    /// Create a new empty circuit with no qubit limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty circuit that rejects qubit indices `>= limit`.
    pub fn with_qubit_limit(limit: u32) -> Self {
        Self {
            gates: Vec::new(),
            qubit_limit: Some(limit),
        }
    }

    /// Build a circuit from wire gate descriptions.
    ///
    /// Errors carry the position of the first offending gate.
    pub fn from_specs<'a, I>(specs: I, qubit_limit: Option<u32>) -> IrResult<Self>
    where
        I: IntoIterator<Item = &'a GateSpec>,
    {
        let mut circuit = Self {
            gates: Vec::new(),
            qubit_limit,
        };
        for (index, spec) in specs.into_iter().enumerate() {
            let gate = Gate::try_from(spec).map_err(|e| e.at_gate(index))?;
            circuit.append(gate).map_err(|e| e.at_gate(index))?;
        }
        Ok(circuit)
    }

    /// Append a gate after validating it.
    ///
    /// A rejected gate leaves the circuit unchanged.
    pub fn append(&mut self, gate: Gate) -> IrResult<&mut Self> {
        gate.validate()?;
        if let Some(limit) = self.qubit_limit {
            if let Some(qubit) = gate.qubits().find(|q| q.0 >= limit) {
                return Err(IrError::QubitOutOfRange { qubit, limit });
            }
        }
        self.gates.push(gate);
        Ok(self)
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Gate::single(GateKind::H, qubit))
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Gate::single(GateKind::X, qubit))
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Gate::single(GateKind::Y, qubit))
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Gate::single(GateKind::Z, qubit))
    }

    /// Apply T gate.
    pub fn t(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Gate::single(GateKind::T, qubit))
    }

    // =========================================================================
    // Two-qubit gates
    // =========================================================================

    /// Apply CNOT with `control` and `target`.
    pub fn cnot(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.append(Gate::pair(GateKind::CNOT, control, target))
    }

    /// Apply controlled-Z.
    pub fn cz(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.append(Gate::pair(GateKind::CZ, control, target))
    }

    /// Swap two qubits.
    pub fn swap(&mut self, a: QubitId, b: QubitId) -> IrResult<&mut Self> {
        self.append(Gate::pair(GateKind::SWAP, a, b))
    }

    // =========================================================================
    // Common circuits
    // =========================================================================

    /// Two-qubit Bell state preparation: H(0), CNOT(0, 1).
    pub fn bell() -> Self {
        Self::ghz(2)
    }

    /// GHZ state preparation on `n` qubits.
    pub fn ghz(n: u32) -> Self {
        let mut gates = Vec::with_capacity(n as usize);
        if n > 0 {
            gates.push(Gate::single(GateKind::H, 0));
        }
        for i in 1..n {
            gates.push(Gate::pair(GateKind::CNOT, i - 1, i));
        }
        Self {
            gates,
            qubit_limit: None,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The gates, in application order.
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Number of gates.
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// Whether the circuit has no gates.
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// The qubit limit this circuit was created with, if any.
    pub fn qubit_limit(&self) -> Option<u32> {
        self.qubit_limit
    }

    /// Number of qubits: highest referenced index plus one, 0 when empty.
    pub fn num_qubits(&self) -> u32 {
        self.gates
            .iter()
            .map(|g| g.max_qubit().0 + 1)
            .max()
            .unwrap_or(0)
    }

    /// Circuit depth, counted as the number of gates.
    pub fn depth(&self) -> usize {
        self.gates.len()
    }

    /// Depth with gates on disjoint qubits scheduled into the same layer.
    pub fn layered_depth(&self) -> usize {
        self.layers().len()
    }

    /// ASAP layering: each gate lands one layer after the latest gate that
    /// shares a qubit with it. Returns gate indices per layer.
    pub fn layers(&self) -> Vec<Vec<usize>> {
        let mut frontier = vec![0usize; self.num_qubits() as usize];
        let mut layers: Vec<Vec<usize>> = Vec::new();
        for (index, gate) in self.gates.iter().enumerate() {
            let layer = gate.qubits().map(|q| frontier[q.index()]).max().unwrap_or(0);
            for q in gate.qubits() {
                frontier[q.index()] = layer + 1;
            }
            if layers.len() <= layer {
                layers.push(Vec::new());
            }
            layers[layer].push(index);
        }
        layers
    }

    /// Number of gates of each kind.
    pub fn gate_counts(&self) -> BTreeMap<GateKind, usize> {
        let mut counts = BTreeMap::new();
        for gate in &self.gates {
            *counts.entry(gate.kind).or_insert(0) += 1;
        }
        counts
    }

    /// Number of two-qubit gates.
    pub fn num_two_qubit_gates(&self) -> usize {
        self.gates.iter().filter(|g| g.kind.is_two_qubit()).count()
    }

    /// Distinct qubits touched by at least one gate, ascending.
    pub fn used_qubits(&self) -> Vec<QubitId> {
        let mut used = vec![false; self.num_qubits() as usize];
        for q in self.gates.iter().flat_map(Gate::qubits) {
            used[q.index()] = true;
        }
        used.iter()
            .enumerate()
            .filter(|(_, u)| **u)
            .map(|(i, _)| QubitId(i as u32))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decoded_gates_are_validated_on_append() {
        let gate: Gate = serde_json::from_str(r#"{"type": "CNOT", "qubit": 0}"#).unwrap();
        let mut circuit = Circuit::new();
        assert!(circuit.append(gate).is_err());

        let gate: Gate = serde_json::from_str(r#"{"type": "H", "qubit": 5}"#).unwrap();
        let mut circuit = Circuit::with_qubit_limit(2);
        assert!(matches!(
            circuit.append(gate),
            Err(IrError::QubitOutOfRange { .. })
        ));
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_bell_circuit() {
        let circuit = Circuit::bell();
        assert_eq!(circuit.num_qubits(), 2);
        assert_eq!(circuit.depth(), 2);
        assert_eq!(circuit.gates()[1], Gate::pair(GateKind::CNOT, 0, 1));
    }

    #[test]
    fn test_empty_circuit() {
        let circuit = Circuit::new();
        assert!(circuit.is_empty());
        assert_eq!(circuit.num_qubits(), 0);
        assert_eq!(circuit.depth(), 0);
        assert_eq!(circuit.layered_depth(), 0);
    }

    #[test]
    fn test_num_qubits_from_max_index() {
        let mut circuit = Circuit::new();
        circuit.h(QubitId(4)).unwrap();
        assert_eq!(circuit.num_qubits(), 5);
        assert_eq!(circuit.used_qubits(), vec![QubitId(4)]);
    }

    #[test]
    fn test_rejected_gate_leaves_circuit_unchanged() {
        let mut circuit = Circuit::new();
        circuit.h(QubitId(0)).unwrap();
        let err = circuit.cnot(QubitId(1), QubitId(1)).unwrap_err();
        assert!(matches!(err, IrError::SameQubit { .. }));
        assert_eq!(circuit.len(), 1);
    }

    #[test]
    fn test_qubit_limit() {
        let mut circuit = Circuit::with_qubit_limit(2);
        circuit.cnot(QubitId(0), QubitId(1)).unwrap();
        let err = circuit.swap(QubitId(0), QubitId(2)).unwrap_err();
        assert_eq!(
            err,
            IrError::QubitOutOfRange {
                qubit: QubitId(2),
                limit: 2
            }
        );
    }

    #[test]
    fn test_layered_depth() {
        let mut circuit = Circuit::new();
        circuit
            .h(QubitId(0))
            .unwrap()
            .h(QubitId(1))
            .unwrap()
            .cnot(QubitId(0), QubitId(1))
            .unwrap()
            .x(QubitId(2))
            .unwrap();
        assert_eq!(circuit.depth(), 4);
        assert_eq!(circuit.layered_depth(), 2);
        assert_eq!(circuit.layers(), vec![vec![0, 1, 3], vec![2]]);
    }

    #[test]
    fn test_from_specs_reports_index() {
        let specs = vec![
            GateSpec::new("H", 0, None),
            GateSpec::new("CNOT", 0, Some(1)),
            GateSpec::new("FOO", 0, None),
        ];
        let err = Circuit::from_specs(&specs, None).unwrap_err();
        match err {
            IrError::AtGate { index, source } => {
                assert_eq!(index, 2);
                assert!(matches!(*source, IrError::UnknownGate(_)));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_gate_counts() {
        let circuit = Circuit::ghz(4);
        let counts = circuit.gate_counts();
        assert_eq!(counts.get(&GateKind::H), Some(&1));
        assert_eq!(counts.get(&GateKind::CNOT), Some(&3));
        assert_eq!(circuit.num_two_qubit_gates(), 3);
    }
}
