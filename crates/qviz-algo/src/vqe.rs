//! Variational quantum eigensolver.
//!
//! The ansatz is hardware-efficient: `depth` layers of an Ry rotation on
//! every qubit followed by a CNOT ladder, then a closing Ry layer. Its
//! `n · (depth + 1)` angles are optimized with Rotosolve, which minimizes the
//! energy exactly along one angle at a time from three evaluations.
//!
//! Hamiltonian rows and columns are basis indices in the simulator's
//! little-endian order: bit `q` of the index is qubit `q`.

use ndarray::{Array1, Array2};
use rand::Rng;
use serde::Serialize;
use std::f64::consts::{FRAC_PI_2, PI};
use tracing::debug;

use qviz_adapter_sim::Statevector;
use qviz_hal::Counts;

use crate::check_shots;
use crate::error::{AlgoError, AlgoResult};

/// Largest register the VQE demo accepts.
pub const MAX_VQE_QUBITS: usize = 6;

/// Largest ansatz depth the VQE demo accepts.
pub const MAX_ANSATZ_DEPTH: usize = 10;

/// Most Rotosolve sweeps a request may ask for.
pub const MAX_SWEEPS: usize = 200;

const SYMMETRY_TOLERANCE: f64 = 1e-9;

/// Parameters for a VQE run.
#[derive(Debug, Clone)]
pub struct VqeParams {
    pub hamiltonian: Array2<f64>,
    pub ansatz_depth: usize,
    pub max_sweeps: usize,
    /// Stop once a sweep lowers the energy by less than this.
    pub tolerance: f64,
    pub shots: u32,
}

impl Default for VqeParams {
    fn default() -> Self {
        Self {
            hamiltonian: ndarray::array![[1.0, 0.0], [0.0, -1.0]],
            ansatz_depth: 3,
            max_sweeps: 50,
            tolerance: 1e-8,
            shots: qviz_hal::DEFAULT_SHOTS,
        }
    }
}

impl VqeParams {
    /// Build parameters from nested rows, as received over the wire.
    pub fn from_rows(rows: &[Vec<f64>], ansatz_depth: usize) -> AlgoResult<Self> {
        let dim = rows.len();
        if rows.iter().any(|row| row.len() != dim) {
            return Err(AlgoError::invalid("hamiltonian must be a square matrix"));
        }
        let flat: Vec<f64> = rows.iter().flatten().copied().collect();
        let hamiltonian = Array2::from_shape_vec((dim, dim), flat)
            .map_err(|e| AlgoError::invalid(format!("hamiltonian: {e}")))?;
        Ok(Self {
            hamiltonian,
            ansatz_depth,
            ..Self::default()
        })
    }
}

/// Outcome of a VQE run.
#[derive(Debug, Clone, Serialize)]
pub struct VqeOutcome {
    pub num_qubits: usize,
    pub ansatz_depth: usize,
    pub num_parameters: usize,
    /// Variational ground-state energy estimate.
    pub energy: f64,
    /// Smallest eigenvalue of the Hamiltonian.
    pub exact_energy: f64,
    pub error: f64,
    pub parameters: Vec<f64>,
    pub sweeps: usize,
    pub converged: bool,
    /// Energy after each sweep, starting with the initial guess.
    pub energy_history: Vec<f64>,
    /// Measurements of the optimized ansatz state.
    pub counts: Counts,
    pub shots: u32,
}

fn validate(params: &VqeParams) -> AlgoResult<usize> {
    let h = &params.hamiltonian;
    let (rows, cols) = h.dim();
    if rows != cols {
        return Err(AlgoError::invalid("hamiltonian must be a square matrix"));
    }
    if rows < 2 || !rows.is_power_of_two() || rows > 1 << MAX_VQE_QUBITS {
        return Err(AlgoError::invalid(format!(
            "hamiltonian dimension must be 2^n with 1 <= n <= {MAX_VQE_QUBITS}, got {rows}"
        )));
    }
    if h.iter().any(|v| !v.is_finite()) {
        return Err(AlgoError::invalid("hamiltonian entries must be finite"));
    }
    if (h - &h.t()).iter().any(|d| d.abs() > SYMMETRY_TOLERANCE) {
        return Err(AlgoError::invalid("hamiltonian must be symmetric"));
    }
    if !(1..=MAX_ANSATZ_DEPTH).contains(&params.ansatz_depth) {
        return Err(AlgoError::invalid(format!(
            "ansatz_depth must be between 1 and {MAX_ANSATZ_DEPTH}, got {}",
            params.ansatz_depth
        )));
    }
    if !(1..=MAX_SWEEPS).contains(&params.max_sweeps) {
        return Err(AlgoError::invalid(format!(
            "max_sweeps must be between 1 and {MAX_SWEEPS}, got {}",
            params.max_sweeps
        )));
    }
    check_shots(params.shots)?;
    Ok(rows.trailing_zeros() as usize)
}

/// Prepare the ansatz state for the given angles.
pub fn ansatz_state(num_qubits: usize, depth: usize, angles: &[f64]) -> Statevector {
    let mut state = Statevector::new(num_qubits);
    let mut angles = angles.iter().copied();
    for layer in 0..=depth {
        for q in 0..num_qubits {
            state.apply_ry(q, angles.next().unwrap_or(0.0));
        }
        if layer < depth {
            for q in 1..num_qubits {
                state.apply_cx(q - 1, q);
            }
        }
    }
    state
}

/// Expectation value `⟨ψ|H|ψ⟩` for a real symmetric `H`.
pub fn expectation(hamiltonian: &Array2<f64>, state: &Statevector) -> f64 {
    let re: Array1<f64> = state.amplitudes().iter().map(|a| a.re).collect();
    let im: Array1<f64> = state.amplitudes().iter().map(|a| a.im).collect();
    re.dot(&hamiltonian.dot(&re)) + im.dot(&hamiltonian.dot(&im))
}

/// Smallest eigenvalue of a real symmetric matrix by cyclic Jacobi rotations.
pub fn min_eigenvalue(matrix: &Array2<f64>) -> f64 {
    let mut a = matrix.clone();
    let n = a.nrows();
    for _ in 0..100 {
        let off: f64 = (0..n)
            .flat_map(|p| (0..n).filter(move |&q| q != p).map(move |q| (p, q)))
            .map(|(p, q)| a[[p, q]] * a[[p, q]])
            .sum();
        if off < 1e-20 {
            break;
        }
        for p in 0..n {
            for q in p + 1..n {
                if a[[p, q]].abs() < 1e-300 {
                    continue;
                }
                let theta = (a[[q, q]] - a[[p, p]]) / (2.0 * a[[p, q]]);
                let sign = if theta >= 0.0 { 1.0 } else { -1.0 };
                let t = sign / (theta.abs() + (theta * theta + 1.0).sqrt());
                let c = 1.0 / (t * t + 1.0).sqrt();
                let s = t * c;
                for k in 0..n {
                    let (akp, akq) = (a[[k, p]], a[[k, q]]);
                    a[[k, p]] = c * akp - s * akq;
                    a[[k, q]] = s * akp + c * akq;
                }
                for k in 0..n {
                    let (apk, aqk) = (a[[p, k]], a[[q, k]]);
                    a[[p, k]] = c * apk - s * aqk;
                    a[[q, k]] = s * apk + c * aqk;
                }
            }
        }
    }
    a.diag().iter().copied().fold(f64::INFINITY, f64::min)
}

fn wrap_angle(theta: f64) -> f64 {
    let wrapped = (theta + PI).rem_euclid(2.0 * PI) - PI;
    if wrapped <= -PI { wrapped + 2.0 * PI } else { wrapped }
}

/// Run VQE from random initial angles.
pub fn run<R: Rng + ?Sized>(params: &VqeParams, rng: &mut R) -> AlgoResult<VqeOutcome> {
    let n = validate(params)?;
    let depth = params.ansatz_depth;
    let h = &params.hamiltonian;
    let energy_at = |angles: &[f64]| expectation(h, &ansatz_state(n, depth, angles));

    let num_parameters = n * (depth + 1);
    let mut angles: Vec<f64> = (0..num_parameters).map(|_| rng.gen_range(-PI..PI)).collect();
    let mut energy = energy_at(&angles);
    let mut history = vec![energy];
    let mut converged = false;
    let mut sweeps = 0;

    while sweeps < params.max_sweeps {
        sweeps += 1;
        for i in 0..num_parameters {
            let theta = angles[i];
            let e0 = energy_at(&angles);
            angles[i] = theta + FRAC_PI_2;
            let e_plus = energy_at(&angles);
            angles[i] = theta - FRAC_PI_2;
            let e_minus = energy_at(&angles);
            let best = theta - FRAC_PI_2 - (2.0 * e0 - e_plus - e_minus).atan2(e_plus - e_minus);
            angles[i] = wrap_angle(best);
        }
        let next = energy_at(&angles);
        history.push(next);
        let improvement = energy - next;
        energy = next;
        if improvement.abs() < params.tolerance {
            converged = true;
            break;
        }
    }

    let exact_energy = min_eigenvalue(h);
    let counts = ansatz_state(n, depth, &angles).sample_counts(params.shots, rng)?;
    debug!(n, depth, sweeps, energy, exact_energy, "vqe finished");

    Ok(VqeOutcome {
        num_qubits: n,
        ansatz_depth: depth,
        num_parameters,
        energy,
        exact_energy,
        error: (energy - exact_energy).abs(),
        parameters: angles,
        sweeps,
        converged,
        energy_history: history,
        counts,
        shots: params.shots,
    })
}
