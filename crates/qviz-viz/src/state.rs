//! Single-qubit states and their Bloch vectors.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use crate::error::{VizError, VizResult};

const NORM_EPSILON: f64 = 1e-12;

/// An amplitude on the wire: a real number or a `[re, im]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amplitude {
    Real(f64),
    Complex([f64; 2]),
}

impl From<Amplitude> for Complex64 {
    fn from(a: Amplitude) -> Self {
        match a {
            Amplitude::Real(re) => Complex64::new(re, 0.0),
            Amplitude::Complex([re, im]) => Complex64::new(re, im),
        }
    }
}

/// A normalized single-qubit state `α|0⟩ + β|1⟩`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QubitState {
    alpha: Complex64,
    beta: Complex64,
}

impl QubitState {
    /// Normalize `α|0⟩ + β|1⟩`. The zero vector is rejected.
    pub fn new(alpha: Complex64, beta: Complex64) -> VizResult<Self> {
        if !(alpha.re.is_finite() && alpha.im.is_finite() && beta.re.is_finite() && beta.im.is_finite())
        {
            return Err(VizError::InvalidState("amplitudes must be finite".into()));
        }
        let norm = (alpha.norm_sqr() + beta.norm_sqr()).sqrt();
        if norm < NORM_EPSILON {
            return Err(VizError::InvalidState("state vector has zero norm".into()));
        }
        Ok(Self {
            alpha: alpha / norm,
            beta: beta / norm,
        })
    }

    /// Build from exactly two wire amplitudes.
    pub fn from_amplitudes(amplitudes: &[Amplitude]) -> VizResult<Self> {
        match amplitudes {
            [a, b] => Self::new((*a).into(), (*b).into()),
            other => Err(VizError::InvalidState(format!(
                "expected 2 amplitudes, got {}",
                other.len()
            ))),
        }
    }

    /// |0⟩.
    pub fn zero() -> Self {
        Self {
            alpha: Complex64::new(1.0, 0.0),
            beta: Complex64::new(0.0, 0.0),
        }
    }

    pub fn alpha(&self) -> Complex64 {
        self.alpha
    }

    pub fn beta(&self) -> Complex64 {
        self.beta
    }

    /// Probability of measuring 0.
    pub fn prob_zero(&self) -> f64 {
        self.alpha.norm_sqr()
    }

    /// Probability of measuring 1.
    pub fn prob_one(&self) -> f64 {
        self.beta.norm_sqr()
    }

    /// Point on the Bloch sphere.
    pub fn bloch(&self) -> BlochVector {
        let cross = self.alpha.conj() * self.beta;
        let x = 2.0 * cross.re;
        let y = 2.0 * cross.im;
        let z = self.alpha.norm_sqr() - self.beta.norm_sqr();
        let theta = z.clamp(-1.0, 1.0).acos();
        let phi = if x.hypot(y) < NORM_EPSILON {
            0.0
        } else {
            y.atan2(x).rem_euclid(TAU)
        };
        BlochVector { x, y, z, theta, phi }
    }
}

/// Cartesian and spherical coordinates of a state on the Bloch sphere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BlochVector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Polar angle from |0⟩, in `[0, π]`.
    pub theta: f64,
    /// Azimuth from +x, in `[0, 2π)`.
    pub phi: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2, PI};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_basis_states() {
        let zero = QubitState::zero().bloch();
        assert!(close(zero.z, 1.0) && close(zero.theta, 0.0));

        let one = QubitState::from_amplitudes(&[Amplitude::Real(0.0), Amplitude::Real(1.0)])
            .unwrap()
            .bloch();
        assert!(close(one.z, -1.0) && close(one.theta, PI));
    }

    #[test]
    fn test_equator_states() {
        let plus = QubitState::from_amplitudes(&[Amplitude::Real(1.0), Amplitude::Real(1.0)])
            .unwrap();
        assert!(close(plus.prob_zero(), 0.5));
        let b = plus.bloch();
        assert!(close(b.x, 1.0) && close(b.z, 0.0) && close(b.phi, 0.0));

        let plus_i = QubitState::from_amplitudes(&[
            Amplitude::Real(FRAC_1_SQRT_2),
            Amplitude::Complex([0.0, FRAC_1_SQRT_2]),
        ])
        .unwrap()
        .bloch();
        assert!(close(plus_i.y, 1.0) && close(plus_i.phi, FRAC_PI_2));
    }

    #[test]
    fn test_global_phase_is_ignored() {
        let a = QubitState::new(Complex64::new(0.6, 0.0), Complex64::new(0.8, 0.0)).unwrap();
        let b = QubitState::new(Complex64::new(0.0, 0.6), Complex64::new(0.0, 0.8)).unwrap();
        let (va, vb) = (a.bloch(), b.bloch());
        assert!(close(va.x, vb.x) && close(va.y, vb.y) && close(va.z, vb.z));
    }

    #[test]
    fn test_rejects_invalid_states() {
        assert!(QubitState::from_amplitudes(&[Amplitude::Real(0.0), Amplitude::Real(0.0)]).is_err());
        assert!(QubitState::from_amplitudes(&[Amplitude::Real(1.0)]).is_err());
        assert!(QubitState::new(Complex64::new(f64::NAN, 0.0), Complex64::new(1.0, 0.0)).is_err());
    }

    #[test]
    fn test_amplitude_wire_forms() {
        let parsed: Vec<Amplitude> = serde_json::from_str("[0.5, [0.1, -0.2]]").unwrap();
        assert_eq!(parsed[0], Amplitude::Real(0.5));
        assert_eq!(parsed[1], Amplitude::Complex([0.1, -0.2]));
    }
}
