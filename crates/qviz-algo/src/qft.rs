//! Quantum Fourier transform.
//!
//! Registers are little-endian: qubit `j` carries bit `j` of the register
//! value. With that convention the circuits below map
//! `|x⟩ → 2^{-n/2} Σ_y e^{2πi·xy/2^n} |y⟩`.

use num_complex::Complex64;
use rand::Rng;
use serde::Serialize;
use std::f64::consts::PI;

use qviz_adapter_sim::Statevector;
use qviz_hal::Counts;

use crate::error::{AlgoError, AlgoResult};
use crate::check_shots;

/// Largest register the QFT demo accepts.
pub const MAX_QFT_QUBITS: u32 = 10;

/// Apply the QFT to the first `n` qubits of `state`.
pub fn apply_qft(state: &mut Statevector, n: usize) {
    for j in (0..n).rev() {
        state.apply_h(j);
        for k in (0..j).rev() {
            state.apply_cp(k, j, PI / f64::from(1u32 << (j - k)));
        }
    }
    apply_reversal(state, n);
}

/// Apply the inverse QFT to the first `n` qubits of `state`.
pub fn apply_inverse_qft(state: &mut Statevector, n: usize) {
    apply_reversal(state, n);
    for j in 0..n {
        for k in 0..j {
            state.apply_cp(k, j, -PI / f64::from(1u32 << (j - k)));
        }
        state.apply_h(j);
    }
}

fn apply_reversal(state: &mut Statevector, n: usize) {
    for i in 0..n / 2 {
        state.apply_swap(i, n - 1 - i);
    }
}

/// Number of gates the QFT circuit on `n` qubits uses.
pub fn gate_count(n: usize) -> usize {
    n + n * n.saturating_sub(1) / 2 + n / 2
}

/// Analytic QFT of the basis state `|x⟩` on `n` qubits.
pub fn analytic_qft(n: usize, x: usize) -> Vec<Complex64> {
    let size = 1usize << n;
    let norm = 1.0 / (size as f64).sqrt();
    (0..size)
        .map(|y| {
            let angle = 2.0 * PI * ((x * y) % size) as f64 / size as f64;
            Complex64::from_polar(norm, angle)
        })
        .collect()
}

/// Result of the QFT demo.
#[derive(Debug, Clone, Serialize)]
pub struct QftOutcome {
    pub num_qubits: u32,
    pub input_state: usize,
    pub input_bitstring: String,
    pub gate_count: usize,
    /// Overlap between the simulated and the analytic output state.
    pub fidelity: f64,
    pub counts: Counts,
    pub shots: u32,
}

/// Run the QFT on the basis state `|input⟩` and sample the result.
pub fn run<R: Rng + ?Sized>(
    num_qubits: u32,
    input: usize,
    shots: u32,
    rng: &mut R,
) -> AlgoResult<QftOutcome> {
    if !(1..=MAX_QFT_QUBITS).contains(&num_qubits) {
        return Err(AlgoError::invalid(format!(
            "num_qubits must be between 1 and {MAX_QFT_QUBITS}, got {num_qubits}"
        )));
    }
    check_shots(shots)?;
    let n = num_qubits as usize;
    let mut state = Statevector::basis(n, input).map_err(|_| {
        AlgoError::invalid(format!(
            "input_state must be below 2^{num_qubits} = {}, got {input}",
            1usize << n
        ))
    })?;
    let input_bitstring = state.bitstring(input);

    apply_qft(&mut state, n);

    let expected = Statevector::from_amplitudes(analytic_qft(n, input))?;
    let fidelity = state.fidelity(&expected);
    let counts = state.sample_counts(shots, rng)?;

    Ok(QftOutcome {
        num_qubits,
        input_state: input,
        input_bitstring,
        gate_count: gate_count(n),
        fidelity,
        counts,
        shots,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_qft_matches_analytic() {
        for n in 1..=5usize {
            for x in [0, 1, (1 << n) - 1] {
                let mut state = Statevector::basis(n, x).unwrap();
                apply_qft(&mut state, n);
                let expected = Statevector::from_amplitudes(analytic_qft(n, x)).unwrap();
                assert!(
                    (state.fidelity(&expected) - 1.0).abs() < 1e-9,
                    "n={n} x={x}"
                );
            }
        }
    }

    #[test]
    fn test_inverse_undoes_forward() {
        let n = 4;
        let mut state = Statevector::basis(n, 11).unwrap();
        apply_qft(&mut state, n);
        apply_inverse_qft(&mut state, n);
        assert!((state.probabilities()[11] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_run_validates() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(run(0, 0, 10, &mut rng).is_err());
        assert!(run(11, 0, 10, &mut rng).is_err());
        assert!(run(3, 8, 10, &mut rng).is_err());
        assert!(run(3, 1, 0, &mut rng).is_err());

        let outcome = run(3, 5, 256, &mut rng).unwrap();
        assert!((outcome.fidelity - 1.0).abs() < 1e-9);
        assert_eq!(outcome.counts.total(), 256);
        assert_eq!(outcome.input_bitstring, "101");
        assert_eq!(outcome.gate_count, 3 + 3 + 1);
    }
}
