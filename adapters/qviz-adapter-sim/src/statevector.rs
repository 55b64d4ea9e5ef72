//! Statevector simulation engine.
//!
//! Basis index bit `q` holds the value of qubit `q`. Bit-strings produced by
//! [`Statevector::bitstring`] put qubit 0 first, so index `0b01` (qubit 0 set)
//! reads `"10"`.

use num_complex::Complex64;
use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};
use std::f64::consts::{FRAC_1_SQRT_2, PI};

use qviz_hal::Counts;
use qviz_ir::{Circuit, Gate, GateKind};

use crate::error::{SimError, SimResult};

/// Amplitudes below this norm are treated as zero.
const NORM_EPSILON: f64 = 1e-12;

/// A pure quantum state over `n` qubits.
#[derive(Debug, Clone, PartialEq)]
pub struct Statevector {
    amplitudes: Vec<Complex64>,
    num_qubits: usize,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        let size = 1 << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Computational basis state |index⟩.
    pub fn basis(num_qubits: usize, index: usize) -> SimResult<Self> {
        let size = 1usize << num_qubits;
        if index >= size {
            return Err(SimError::IndexOutOfRange { index, size });
        }
        let mut sv = Self::new(num_qubits);
        sv.amplitudes[0] = Complex64::new(0.0, 0.0);
        sv.amplitudes[index] = Complex64::new(1.0, 0.0);
        Ok(sv)
    }

    /// Build a state from raw amplitudes, normalizing them.
    ///
    /// The length must be a non-zero power of two and the vector must not be
    /// all zeros.
    pub fn from_amplitudes(amplitudes: Vec<Complex64>) -> SimResult<Self> {
        let len = amplitudes.len();
        if len == 0 || !len.is_power_of_two() {
            return Err(SimError::InvalidLength(len));
        }
        let norm = amplitudes.iter().map(Complex64::norm_sqr).sum::<f64>().sqrt();
        if norm < NORM_EPSILON {
            return Err(SimError::ZeroNorm);
        }
        Ok(Self {
            amplitudes: amplitudes.into_iter().map(|a| a / norm).collect(),
            num_qubits: len.trailing_zeros() as usize,
        })
    }

    /// Run a circuit from |0...0⟩ on exactly `circuit.num_qubits()` qubits.
    pub fn from_circuit(circuit: &Circuit) -> Self {
        let mut sv = Self::new(circuit.num_qubits() as usize);
        sv.apply_circuit(circuit);
        sv
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// The amplitudes, indexed by basis state.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Born-rule probability of each basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex64::norm_sqr).collect()
    }

    /// Probability that measuring `qubit` yields 1.
    pub fn probability_of_one(&self, qubit: usize) -> f64 {
        let mask = 1 << qubit;
        self.amplitudes
            .iter()
            .enumerate()
            .filter(|(i, _)| i & mask != 0)
            .map(|(_, a)| a.norm_sqr())
            .sum()
    }

    /// Squared overlap |⟨self|other⟩|². Zero if the sizes differ.
    pub fn fidelity(&self, other: &Statevector) -> f64 {
        if self.amplitudes.len() != other.amplitudes.len() {
            return 0.0;
        }
        self.amplitudes
            .iter()
            .zip(&other.amplitudes)
            .map(|(a, b)| a.conj() * b)
            .sum::<Complex64>()
            .norm_sqr()
    }

    /// Apply every gate of a circuit in order.
    pub fn apply_circuit(&mut self, circuit: &Circuit) {
        for gate in circuit.gates() {
            self.apply(gate);
        }
    }

    /// Apply a single gate. The gate's qubits must be below `num_qubits()`.
    pub fn apply(&mut self, gate: &Gate) {
        let q = gate.qubit.index();
        debug_assert!(gate.max_qubit().index() < self.num_qubits);
        match (gate.kind, gate.target.map(|t| t.index())) {
            (GateKind::H, _) => self.apply_h(q),
            (GateKind::X, _) => self.apply_x(q),
            (GateKind::Y, _) => self.apply_y(q),
            (GateKind::Z, _) => self.apply_z(q),
            (GateKind::T, _) => self.apply_t(q),
            (GateKind::CNOT, Some(t)) => self.apply_cx(q, t),
            (GateKind::CZ, Some(t)) => self.apply_cz(q, t),
            (GateKind::SWAP, Some(t)) => self.apply_swap(q, t),
            // Validated circuits never carry a two-qubit gate without target.
            (GateKind::CNOT | GateKind::CZ | GateKind::SWAP, None) => {}
        }
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Pauli-X.
    pub fn apply_x(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                self.amplitudes.swap(i, i | mask);
            }
        }
    }

    /// Pauli-Y.
    pub fn apply_y(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        let i_val = Complex64::new(0.0, 1.0);
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let tmp = self.amplitudes[i];
                self.amplitudes[i] = -i_val * self.amplitudes[j];
                self.amplitudes[j] = i_val * tmp;
            }
        }
    }

    /// Pauli-Z.
    pub fn apply_z(&mut self, qubit: usize) {
        self.apply_phase(qubit, PI);
    }

    /// Hadamard.
    pub fn apply_h(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = FRAC_1_SQRT_2 * (a + b);
                self.amplitudes[j] = FRAC_1_SQRT_2 * (a - b);
            }
        }
    }

    /// T = phase(π/4).
    pub fn apply_t(&mut self, qubit: usize) {
        self.apply_phase(qubit, PI / 4.0);
    }

    /// Phase gate diag(1, e^{iθ}).
    pub fn apply_phase(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let phase = Complex64::from_polar(1.0, theta);
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & mask != 0 {
                *amp *= phase;
            }
        }
    }

    /// Rotation about Y.
    pub fn apply_ry(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = c * a - s * b;
                self.amplitudes[j] = s * a + c * b;
            }
        }
    }

    /// Rotation about Z.
    pub fn apply_rz(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let phase_0 = Complex64::from_polar(1.0, -theta / 2.0);
        let phase_1 = Complex64::from_polar(1.0, theta / 2.0);
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            *amp *= if i & mask == 0 { phase_0 } else { phase_1 };
        }
    }

    // =========================================================================
    // Two-qubit gates
    // =========================================================================

    /// Controlled-NOT.
    pub fn apply_cx(&mut self, control: usize, target: usize) {
        let ctrl_mask = 1 << control;
        let tgt_mask = 1 << target;
        for i in 0..self.amplitudes.len() {
            if (i & ctrl_mask != 0) && (i & tgt_mask == 0) {
                self.amplitudes.swap(i, i | tgt_mask);
            }
        }
    }

    /// Controlled-Z.
    pub fn apply_cz(&mut self, control: usize, target: usize) {
        self.apply_cp(control, target, PI);
    }

    /// Controlled phase diag(1, 1, 1, e^{iθ}).
    pub fn apply_cp(&mut self, control: usize, target: usize, theta: f64) {
        let mask = (1 << control) | (1 << target);
        let phase = Complex64::from_polar(1.0, theta);
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & mask == mask {
                *amp *= phase;
            }
        }
    }

    /// SWAP.
    pub fn apply_swap(&mut self, q1: usize, q2: usize) {
        let mask1 = 1 << q1;
        let mask2 = 1 << q2;
        for i in 0..self.amplitudes.len() {
            if (i & mask1 != 0) && (i & mask2 == 0) {
                let j = (i & !mask1) | mask2;
                self.amplitudes.swap(i, j);
            }
        }
    }

    /// Negate the amplitude of one basis state.
    ///
    /// `flip_phase(2^n - 1)` is a multi-controlled Z on all qubits.
    pub fn flip_phase(&mut self, index: usize) {
        if let Some(amp) = self.amplitudes.get_mut(index) {
            *amp = -*amp;
        }
    }

    // =========================================================================
    // Measurement
    // =========================================================================

    /// Draw `shots` basis indices from the Born-rule distribution.
    pub fn sample_indices<R: Rng + ?Sized>(&self, shots: u32, rng: &mut R) -> SimResult<Vec<usize>> {
        let dist = WeightedIndex::new(self.probabilities())
            .map_err(|e| SimError::Sampling(e.to_string()))?;
        Ok((0..shots).map(|_| dist.sample(rng)).collect())
    }

    /// Sample `shots` measurements of every qubit.
    pub fn sample_counts<R: Rng + ?Sized>(&self, shots: u32, rng: &mut R) -> SimResult<Counts> {
        let mut tally = vec![0u64; self.amplitudes.len()];
        for index in self.sample_indices(shots, rng)? {
            tally[index] += 1;
        }
        let mut counts = Counts::new();
        for (index, n) in tally.into_iter().enumerate().filter(|(_, n)| *n > 0) {
            counts.add(self.bitstring(index), n);
        }
        Ok(counts)
    }

    /// Bit-string for a basis index, qubit 0 first.
    pub fn bitstring(&self, index: usize) -> String {
        (0..self.num_qubits)
            .map(|q| if index >> q & 1 == 1 { '1' } else { '0' })
            .collect()
    }

    /// Inverse of [`Statevector::bitstring`].
    pub fn index_of(bitstring: &str) -> Option<usize> {
        bitstring.chars().enumerate().try_fold(0usize, |acc, (q, c)| match c {
            '0' => Some(acc),
            '1' => Some(acc | 1 << q),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qviz_ir::QubitId;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn approx_eq(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-10
    }

    #[test]
    fn test_initial_state() {
        let sv = Statevector::new(2);
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(1.0, 0.0)));
        assert!(sv.amplitudes[1..].iter().all(|a| a.norm() == 0.0));
    }

    #[test]
    fn test_hadamard() {
        let mut sv = Statevector::new(1);
        sv.apply_h(0);
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(FRAC_1_SQRT_2, 0.0)));
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(FRAC_1_SQRT_2, 0.0)));
    }

    #[test]
    fn test_bell_state() {
        let sv = Statevector::from_circuit(&Circuit::bell());
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(FRAC_1_SQRT_2, 0.0)));
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[2], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[3], Complex64::new(FRAC_1_SQRT_2, 0.0)));
    }

    #[test]
    fn test_y_and_t() {
        let mut sv = Statevector::new(1);
        sv.apply_y(0);
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(0.0, 1.0)));

        let mut sv = Statevector::new(1);
        sv.apply_x(0);
        sv.apply_t(0);
        assert!(approx_eq(
            sv.amplitudes[1],
            Complex64::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2)
        ));
    }

    #[test]
    fn test_swap_moves_excitation() {
        let mut circuit = Circuit::new();
        circuit
            .x(QubitId(0))
            .unwrap()
            .swap(QubitId(0), QubitId(2))
            .unwrap();
        let sv = Statevector::from_circuit(&circuit);
        assert!(approx_eq(sv.amplitudes[0b100], Complex64::new(1.0, 0.0)));
        assert_eq!(sv.bitstring(0b100), "001");
    }

    #[test]
    fn test_cz_phase() {
        let mut sv = Statevector::new(2);
        sv.apply_h(0);
        sv.apply_h(1);
        sv.apply_cz(0, 1);
        assert!(approx_eq(sv.amplitudes[3], Complex64::new(-0.5, 0.0)));
    }

    #[test]
    fn test_flip_phase_and_fidelity() {
        let mut a = Statevector::new(1);
        a.apply_h(0);
        let mut b = a.clone();
        b.flip_phase(1);
        assert!(a.fidelity(&b).abs() < 1e-12);
        assert!((a.fidelity(&a) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_from_amplitudes_normalizes() {
        let sv = Statevector::from_amplitudes(vec![
            Complex64::new(3.0, 0.0),
            Complex64::new(0.0, 4.0),
        ])
        .unwrap();
        assert_eq!(sv.num_qubits(), 1);
        assert!((sv.probabilities()[0] - 0.36).abs() < 1e-12);
        assert!((sv.probability_of_one(0) - 0.64).abs() < 1e-12);

        assert!(matches!(
            Statevector::from_amplitudes(vec![Complex64::new(0.0, 0.0); 2]),
            Err(SimError::ZeroNorm)
        ));
        assert!(matches!(
            Statevector::from_amplitudes(vec![Complex64::new(1.0, 0.0); 3]),
            Err(SimError::InvalidLength(3))
        ));
    }

    #[test]
    fn test_bitstring_roundtrip() {
        let sv = Statevector::new(3);
        for i in 0..8 {
            assert_eq!(Statevector::index_of(&sv.bitstring(i)), Some(i));
        }
        assert_eq!(Statevector::index_of("1x"), None);
    }

    #[test]
    fn test_sample_deterministic() {
        let mut sv = Statevector::new(2);
        sv.apply_x(1);
        let mut rng = StdRng::seed_from_u64(7);
        let counts = sv.sample_counts(100, &mut rng).unwrap();
        assert_eq!(counts.get("01"), 100);
        assert_eq!(counts.len(), 1);
    }
}
