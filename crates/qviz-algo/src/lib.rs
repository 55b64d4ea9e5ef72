//! QuantumViz algorithm demos.
//!
//! Textbook algorithms sized for teaching, each returning measurement counts
//! alongside the quantities a student would want to inspect:
//!
//! | Module | Algorithm | Runs on |
//! |--------|-----------|---------|
//! | [`grover`] | Grover search | state-vector engine |
//! | [`shor`] | Shor period finding | state-vector engine |
//! | [`vqe`] | VQE with Rotosolve | state-vector engine |
//! | [`teleportation`] | Teleportation | any [`qviz_hal::Backend`] |
//! | [`qft`] | Quantum Fourier transform | state-vector engine |
//!
//! Randomness is injected by the caller, so a seeded RNG gives reproducible
//! runs.
//!
//! # Example
//!
//! ```rust
//! use qviz_algo::grover::{self, GroverParams};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let mut rng = StdRng::seed_from_u64(1);
//! let outcome = grover::run(&GroverParams::default(), &mut rng).unwrap();
//! assert!(outcome.success_rate > 0.9);
//! ```

pub mod error;
pub mod grover;
pub mod qft;
pub mod shor;
pub mod teleportation;
pub mod vqe;

pub use error::{AlgoError, AlgoResult};

/// Shot ceiling shared by the engine-backed demos.
pub const MAX_SHOTS: u32 = 100_000;

pub(crate) fn check_shots(shots: u32) -> AlgoResult<()> {
    if shots == 0 || shots > MAX_SHOTS {
        return Err(AlgoError::invalid(format!(
            "shots must be between 1 and {MAX_SHOTS}, got {shots}"
        )));
    }
    Ok(())
}
