//! Shor's algorithm: factoring by quantum period finding.
//!
//! The modular-exponentiation oracle is not built gate by gate. The counting
//! register is prepared directly in the state it holds after the work register
//! has been measured, i.e. a uniform superposition over every `x` with
//! `a^x mod n = a^{x0} mod n`. The inverse QFT and the sampling that follow are
//! exact.

use rand::Rng;
use serde::Serialize;
use tracing::debug;

use num_complex::Complex64;
use qviz_adapter_sim::Statevector;
use qviz_hal::Counts;

use crate::check_shots;
use crate::error::{AlgoError, AlgoResult};
use crate::qft::apply_inverse_qft;

/// Smallest number the demo factors.
pub const MIN_NUMBER: u64 = 15;

/// Largest number the demo factors.
pub const MAX_NUMBER: u64 = 255;

/// Parameters for a Shor run.
#[derive(Debug, Clone)]
pub struct ShorParams {
    pub number: u64,
    /// Base of the modular exponentiation; drawn at random when `None`.
    pub base: Option<u64>,
    pub shots: u32,
}

impl Default for ShorParams {
    fn default() -> Self {
        Self {
            number: 15,
            base: None,
            shots: qviz_hal::DEFAULT_SHOTS,
        }
    }
}

/// How the factors were obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShorMethod {
    /// The number is even.
    EvenNumber,
    /// The number is `b^k` for some integer `b`.
    PerfectPower,
    /// The base already shares a factor with the number.
    LuckyBase,
    /// Period finding on the simulated register.
    PeriodFinding,
}

/// A measured phase and the period candidate derived from it.
#[derive(Debug, Clone, Serialize)]
pub struct PhaseEstimate {
    pub bitstring: String,
    pub value: usize,
    pub count: u64,
    /// `value / 2^t`.
    pub phase: f64,
    /// Smallest verified period consistent with this phase.
    pub period: Option<u64>,
}

/// Outcome of a Shor run.
#[derive(Debug, Clone, Serialize)]
pub struct ShorOutcome {
    pub number: u64,
    pub base: u64,
    pub method: ShorMethod,
    pub counting_qubits: u32,
    pub period: Option<u64>,
    pub factors: Option<(u64, u64)>,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counts: Option<Counts>,
    /// Most frequent outcomes with their continued-fraction analysis.
    pub estimates: Vec<PhaseEstimate>,
    pub shots: u32,
}

impl ShorOutcome {
    fn classical(number: u64, base: u64, method: ShorMethod, p: u64, shots: u32) -> Self {
        let (p, q) = ordered(p, number / p);
        Self {
            number,
            base,
            method,
            counting_qubits: 0,
            period: None,
            factors: Some((p, q)),
            success: true,
            counts: None,
            estimates: Vec::new(),
            shots,
        }
    }
}

fn ordered(a: u64, b: u64) -> (u64, u64) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Greatest common divisor.
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// `base^exp mod modulus`.
pub fn mod_pow(base: u64, mut exp: u64, modulus: u64) -> u64 {
    if modulus == 1 {
        return 0;
    }
    let mut result = 1u64;
    let mut b = base % modulus;
    while exp > 0 {
        if exp & 1 == 1 {
            result = result * b % modulus;
        }
        b = b * b % modulus;
        exp >>= 1;
    }
    result
}

/// Trial-division primality test.
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    (2..).take_while(|d| d * d <= n).all(|d| n % d != 0)
}

/// Smallest `b` with `b^k = n` for some `k ≥ 2`.
fn perfect_power_root(n: u64) -> Option<u64> {
    (2..=u64::BITS - n.leading_zeros()).find_map(|k| {
        let guess = (n as f64).powf(1.0 / f64::from(k)).round() as u64;
        [guess.saturating_sub(1), guess, guess + 1]
            .into_iter()
            .find(|&b| b > 1 && b.checked_pow(k) == Some(n))
    })
}

/// Denominators of the continued-fraction convergents of `numerator / denominator`
/// that do not exceed `limit`.
pub fn convergent_denominators(numerator: u64, denominator: u64, limit: u64) -> Vec<u64> {
    let (mut num, mut den) = (numerator, denominator);
    let (mut k2, mut k1) = (1u64, 0u64);
    let mut out = Vec::new();
    while den != 0 {
        let a = num / den;
        (num, den) = (den, num - a * den);
        let k = a.saturating_mul(k1).saturating_add(k2);
        (k2, k1) = (k1, k);
        if k > limit {
            break;
        }
        if out.last() != Some(&k) {
            out.push(k);
        }
    }
    out
}

fn verified_period(candidates: &[u64], base: u64, number: u64) -> Option<u64> {
    candidates.iter().filter(|&&d| d > 1).find_map(|&d| {
        (1..)
            .map(|m| d * m)
            .take_while(|&r| r <= number)
            .find(|&r| mod_pow(base, r, number) == 1)
    })
}

/// Factors from a period, when `r` is even and `a^{r/2} ≢ −1 (mod n)`.
pub fn factors_from_period(base: u64, period: u64, number: u64) -> Option<(u64, u64)> {
    if period % 2 != 0 {
        return None;
    }
    let half = mod_pow(base, period / 2, number);
    if half == number - 1 {
        return None;
    }
    [gcd(half + number - 1, number), gcd(half + 1, number)]
        .into_iter()
        .find(|&f| f > 1 && f < number)
        .map(|f| ordered(f, number / f))
}

fn validate(params: &ShorParams) -> AlgoResult<()> {
    let n = params.number;
    if !(MIN_NUMBER..=MAX_NUMBER).contains(&n) {
        return Err(AlgoError::invalid(format!(
            "number must be between {MIN_NUMBER} and {MAX_NUMBER}, got {n}"
        )));
    }
    if is_prime(n) {
        return Err(AlgoError::invalid(format!("{n} is prime and has no factors")));
    }
    if let Some(a) = params.base {
        if !(2..n).contains(&a) {
            return Err(AlgoError::invalid(format!(
                "base must be between 2 and {}, got {a}",
                n - 1
            )));
        }
    }
    check_shots(params.shots)
}

/// Factor `params.number`.
pub fn run<R: Rng + ?Sized>(params: &ShorParams, rng: &mut R) -> AlgoResult<ShorOutcome> {
    validate(params)?;
    let n = params.number;
    let base = params.base.unwrap_or_else(|| rng.gen_range(2..n - 1));
    let shots = params.shots;

    if n % 2 == 0 {
        return Ok(ShorOutcome::classical(n, base, ShorMethod::EvenNumber, 2, shots));
    }
    if let Some(root) = perfect_power_root(n) {
        return Ok(ShorOutcome::classical(n, base, ShorMethod::PerfectPower, root, shots));
    }
    let shared = gcd(base, n);
    if shared > 1 {
        return Ok(ShorOutcome::classical(n, base, ShorMethod::LuckyBase, shared, shots));
    }

    let t = 2 * (u64::BITS - (n - 1).leading_zeros());
    let size = 1usize << t;

    // Register state after measuring the work register with result a^x0.
    let x0 = rng.gen_range(0..size) as u64;
    let observed = mod_pow(base, x0, n);
    let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
    let mut value = 1u64;
    for amp in amplitudes.iter_mut() {
        if value == observed {
            *amp = Complex64::new(1.0, 0.0);
        }
        value = value * base % n;
    }
    let mut state = Statevector::from_amplitudes(amplitudes)?;
    apply_inverse_qft(&mut state, t as usize);
    let counts = state.sample_counts(shots, rng)?;

    let mut ranked: Vec<(&String, u64)> = counts.iter().map(|(k, v)| (k, *v)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let mut estimates = Vec::new();
    let mut period = None;
    for (bitstring, count) in ranked {
        let Some(value) = Statevector::index_of(bitstring) else {
            continue;
        };
        let candidates = convergent_denominators(value as u64, size as u64, n);
        let found = if value == 0 {
            None
        } else {
            verified_period(&candidates, base, n)
        };
        if period.is_none() {
            period = found;
        }
        if estimates.len() < 8 {
            estimates.push(PhaseEstimate {
                bitstring: bitstring.clone(),
                value,
                count,
                phase: value as f64 / size as f64,
                period: found,
            });
        }
    }

    let factors = period.and_then(|r| factors_from_period(base, r, n));
    debug!(n, base, ?period, ?factors, "period finding finished");

    Ok(ShorOutcome {
        number: n,
        base,
        method: ShorMethod::PeriodFinding,
        counting_qubits: t,
        period,
        factors,
        success: factors.is_some(),
        counts: Some(counts),
        estimates,
        shots,
    })
}
