//! Sampling properties of the simulator backend.

use qviz_adapter_sim::{SimulatorBackend, SimulatorConfig};
use qviz_hal::{Backend, DEFAULT_SHOTS};
use qviz_ir::{Circuit, GateKind, QubitId};

fn seeded(seed: u64) -> SimulatorBackend {
    SimulatorBackend::with_config(SimulatorConfig {
        seed: Some(seed),
        ..SimulatorConfig::default()
    })
}

#[tokio::test]
async fn bell_counts_are_balanced() {
    for seed in [1, 2, 3, 4, 5] {
        let result = seeded(seed).run(&Circuit::bell(), DEFAULT_SHOTS).await.unwrap();
        let zeros = result.counts.get("00");
        let ones = result.counts.get("11");
        assert_eq!(zeros + ones, u64::from(DEFAULT_SHOTS));
        assert!((450..=580).contains(&zeros), "seed {seed}: 00 = {zeros}");
        assert!((450..=580).contains(&ones), "seed {seed}: 11 = {ones}");
    }
}

#[tokio::test]
async fn keys_have_circuit_width_and_counts_sum_to_shots() {
    let backend = seeded(11);
    let mut circuit = Circuit::new();
    for q in 0..5 {
        circuit.h(QubitId(q)).unwrap();
    }
    circuit.cz(QubitId(0), QubitId(4)).unwrap();

    let result = backend.run(&circuit, 2000).await.unwrap();
    assert_eq!(result.counts.total(), 2000);
    assert!(result.counts.iter().all(|(k, _)| k.len() == 5));
}

#[tokio::test]
async fn every_gate_kind_runs() {
    let backend = seeded(3);
    let mut circuit = Circuit::new();
    for kind in GateKind::ALL {
        let gate = if kind.is_two_qubit() {
            qviz_ir::Gate::pair(kind, QubitId(0), QubitId(1))
        } else {
            qviz_ir::Gate::single(kind, QubitId(0))
        };
        circuit.append(gate).unwrap();
    }
    let result = backend.run(&circuit, 64).await.unwrap();
    assert_eq!(result.counts.total(), 64);
}
