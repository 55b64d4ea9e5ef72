//! Cross-module checks for the algorithm demos.

use qviz_adapter_sim::Statevector;
use qviz_algo::grover::{self, GroverParams};
use qviz_algo::shor::{self, ShorParams};
use qviz_algo::{qft, vqe};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn grover_counts_use_register_width() {
    let mut rng = StdRng::seed_from_u64(21);
    let params = GroverParams {
        search_space: 32,
        targets: vec![7],
        shots: 500,
        ..GroverParams::default()
    };
    let outcome = grover::run(&params, &mut rng).unwrap();

    assert_eq!(outcome.counts.total(), 500);
    assert!(outcome.counts.iter().all(|(k, _)| k.len() == 5));
    assert_eq!(outcome.target_bitstrings, vec!["00111"]);
    assert!(outcome.success_rate > 0.9);
}

#[test]
fn grover_explicit_iterations_are_honored() {
    let mut rng = StdRng::seed_from_u64(2);
    let params = GroverParams {
        search_space: 4,
        targets: vec![1],
        iterations: Some(2),
        ..GroverParams::default()
    };
    let outcome = grover::run(&params, &mut rng).unwrap();
    assert_eq!(outcome.iterations, 2);
    assert_eq!(outcome.optimal_iterations, 1);
    // Overshooting N = 4 rotates away from the target.
    assert!(outcome.theoretical_success < 0.5);
}

#[test]
fn shor_random_base_always_factors_fifteen() {
    for seed in 0..10 {
        let mut rng = StdRng::seed_from_u64(seed);
        let outcome = shor::run(&ShorParams::default(), &mut rng).unwrap();
        if let Some((p, q)) = outcome.factors {
            assert_eq!(p * q, 15);
            assert!(p > 1 && q > 1);
        }
        if let Some(r) = outcome.period {
            assert_eq!(shor::mod_pow(outcome.base, r, 15), 1);
        }
    }
}

#[test]
fn inverse_qft_recovers_periodic_peaks() {
    // Period 4 on 4 qubits: peaks at multiples of 16 / 4.
    let mut amps = vec![num_complex::Complex64::new(0.0, 0.0); 16];
    for x in (1..16).step_by(4) {
        amps[x] = num_complex::Complex64::new(1.0, 0.0);
    }
    let mut state = Statevector::from_amplitudes(amps).unwrap();
    qft::apply_inverse_qft(&mut state, 4);

    let probs = state.probabilities();
    for peak in [0, 4, 8, 12] {
        assert!((probs[peak] - 0.25).abs() < 1e-9, "peak {peak}: {}", probs[peak]);
    }
}

#[test]
fn vqe_outcome_serializes() {
    let mut rng = StdRng::seed_from_u64(4);
    let params = vqe::VqeParams::from_rows(&[vec![0.0, 1.0], vec![1.0, 0.0]], 1).unwrap();
    let outcome = vqe::run(&params, &mut rng).unwrap();
    assert!((outcome.energy + 1.0).abs() < 1e-6);

    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["num_qubits"], 1);
    assert!(json["energy_history"].as_array().is_some_and(|h| !h.is_empty()));
}
