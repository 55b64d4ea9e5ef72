//! Grover search over an unstructured space of `2^n` items.

use rand::Rng;
use serde::Serialize;
use std::collections::BTreeSet;
use std::f64::consts::FRAC_PI_4;
use tracing::debug;

use qviz_adapter_sim::Statevector;
use qviz_hal::Counts;

use crate::check_shots;
use crate::error::{AlgoError, AlgoResult};

/// Largest search space the demo accepts.
pub const MAX_SEARCH_SPACE: usize = 1 << 12;

/// Most oracle + diffusion rounds a request may ask for. The optimum for
/// the largest space with one target is 50.
pub const MAX_GROVER_ITERATIONS: u32 = 128;

/// Parameters for a Grover run.
#[derive(Debug, Clone)]
pub struct GroverParams {
    pub search_space: usize,
    pub targets: Vec<usize>,
    /// Number of oracle + diffusion rounds; optimal when `None`.
    pub iterations: Option<u32>,
    pub shots: u32,
}

impl Default for GroverParams {
    fn default() -> Self {
        Self {
            search_space: 8,
            targets: vec![3, 5],
            iterations: None,
            shots: qviz_hal::DEFAULT_SHOTS,
        }
    }
}

/// Outcome of a Grover run.
#[derive(Debug, Clone, Serialize)]
pub struct GroverOutcome {
    pub num_qubits: u32,
    pub search_space: usize,
    pub targets: Vec<usize>,
    /// Targets as measured bit-strings.
    pub target_bitstrings: Vec<String>,
    pub iterations: u32,
    pub optimal_iterations: u32,
    pub counts: Counts,
    pub shots: u32,
    /// Fraction of shots that landed on a target.
    pub success_rate: f64,
    /// Success probability of the final state before sampling.
    pub theoretical_success: f64,
    pub most_frequent: Option<String>,
}

/// `max(1, ⌊π/4 · √(N/M)⌋)`.
pub fn optimal_iterations(search_space: usize, marked: usize) -> u32 {
    if marked == 0 {
        return 1;
    }
    let ratio = search_space as f64 / marked as f64;
    ((FRAC_PI_4 * ratio.sqrt()).floor() as u32).max(1)
}

/// Bit-string of item `value` in an `n`-qubit register, qubit 0 most significant.
pub fn encode_target(value: usize, num_qubits: usize) -> String {
    format!("{value:0num_qubits$b}")
}

fn validate(params: &GroverParams) -> AlgoResult<Vec<usize>> {
    let n = params.search_space;
    if !n.is_power_of_two() || !(2..=MAX_SEARCH_SPACE).contains(&n) {
        return Err(AlgoError::invalid(format!(
            "search_space must be a power of two between 2 and {MAX_SEARCH_SPACE}, got {n}"
        )));
    }
    if params.targets.is_empty() {
        return Err(AlgoError::invalid("at least one target is required"));
    }
    if let Some(t) = params.targets.iter().find(|&&t| t >= n) {
        return Err(AlgoError::invalid(format!(
            "target {t} is outside the search space of {n}"
        )));
    }
    let distinct: BTreeSet<usize> = params.targets.iter().copied().collect();
    if distinct.len() != params.targets.len() {
        return Err(AlgoError::invalid("targets must be distinct"));
    }
    if distinct.len() == n {
        return Err(AlgoError::invalid("every item is marked; nothing to search"));
    }
    if let Some(iterations) = params.iterations {
        if !(1..=MAX_GROVER_ITERATIONS).contains(&iterations) {
            return Err(AlgoError::invalid(format!(
                "iterations must be between 1 and {MAX_GROVER_ITERATIONS}, got {iterations}"
            )));
        }
    }
    check_shots(params.shots)?;
    Ok(distinct.into_iter().collect())
}

fn apply_h_all(state: &mut Statevector) {
    for q in 0..state.num_qubits() {
        state.apply_h(q);
    }
}

fn apply_x_all(state: &mut Statevector) {
    for q in 0..state.num_qubits() {
        state.apply_x(q);
    }
}

/// Reflection about the uniform superposition.
fn apply_diffusion(state: &mut Statevector) {
    let all_ones = (1usize << state.num_qubits()) - 1;
    apply_h_all(state);
    apply_x_all(state);
    state.flip_phase(all_ones);
    apply_x_all(state);
    apply_h_all(state);
}

/// Run Grover search and sample the result.
pub fn run<R: Rng + ?Sized>(params: &GroverParams, rng: &mut R) -> AlgoResult<GroverOutcome> {
    let targets = validate(params)?;
    let n = params.search_space.trailing_zeros() as usize;
    let optimal = optimal_iterations(params.search_space, targets.len());
    let iterations = params.iterations.unwrap_or(optimal);

    let target_bitstrings: Vec<String> = targets.iter().map(|&t| encode_target(t, n)).collect();
    let marked: Vec<usize> = target_bitstrings
        .iter()
        .filter_map(|s| Statevector::index_of(s))
        .collect();

    let mut state = Statevector::new(n);
    apply_h_all(&mut state);
    for _ in 0..iterations {
        for &index in &marked {
            state.flip_phase(index);
        }
        apply_diffusion(&mut state);
    }

    let probabilities = state.probabilities();
    let theoretical_success = marked.iter().map(|&i| probabilities[i]).sum();
    let counts = state.sample_counts(params.shots, rng)?;

    let hits: u64 = target_bitstrings.iter().map(|s| counts.get(s)).sum();
    let success_rate = hits as f64 / f64::from(params.shots);
    debug!(n, iterations, success_rate, "grover search finished");

    Ok(GroverOutcome {
        num_qubits: n as u32,
        search_space: params.search_space,
        targets,
        target_bitstrings,
        iterations,
        optimal_iterations: optimal,
        most_frequent: counts.most_frequent().map(|(k, _)| k.clone()),
        counts,
        shots: params.shots,
        success_rate,
        theoretical_success,
    })
}
