//! Property tests for circuit invariants.

use proptest::prelude::*;
use qviz_ir::{Circuit, Gate, GateKind, GateSpec, IrError, QubitId};

fn arb_gate(max_qubit: u32) -> impl Strategy<Value = Gate> {
    let single = (0..5usize, 0..max_qubit).prop_map(|(k, q)| Gate::single(GateKind::ALL[k], q));
    let pair = (5..8usize, 0..max_qubit, 1..max_qubit).prop_map(move |(k, q, offset)| {
        Gate::pair(GateKind::ALL[k], q, (q + offset) % max_qubit)
    });
    prop_oneof![single, pair]
}

proptest! {
    #[test]
    fn num_qubits_is_max_index_plus_one(gates in prop::collection::vec(arb_gate(8), 1..40)) {
        let mut circuit = Circuit::new();
        for gate in &gates {
            circuit.append(*gate).unwrap();
        }
        let max = gates.iter().map(|g| g.max_qubit().0).max().unwrap();
        prop_assert_eq!(circuit.num_qubits(), max + 1);
        prop_assert_eq!(circuit.depth(), gates.len());
        prop_assert!(circuit.layered_depth() <= circuit.depth());
        prop_assert!(circuit.layered_depth() >= 1);
    }

    #[test]
    fn same_qubit_two_qubit_gates_are_rejected(k in 5..8usize, q in 0..16u32) {
        let mut circuit = Circuit::bell();
        let before = circuit.clone();
        let err = circuit.append(Gate::pair(GateKind::ALL[k], q, q)).unwrap_err();
        let is_same_qubit = matches!(err, IrError::SameQubit { .. });
        prop_assert!(is_same_qubit);
        prop_assert_eq!(circuit, before);
    }

    #[test]
    fn negative_indices_are_rejected(q in i64::MIN..0) {
        let specs = vec![GateSpec::new("H", q, None)];
        let err = Circuit::from_specs(&specs, None).unwrap_err();
        prop_assert_eq!(err, IrError::InvalidQubitIndex(q).at_gate(0));
    }

    #[test]
    fn qubit_limit_is_enforced(limit in 1..10u32, q in 0..20u32) {
        let mut circuit = Circuit::with_qubit_limit(limit);
        let result = circuit.h(QubitId(q)).map(|_| ());
        if q < limit {
            prop_assert!(result.is_ok());
        } else {
            prop_assert_eq!(result, Err(IrError::QubitOutOfRange { qubit: QubitId(q), limit }));
        }
    }
}
