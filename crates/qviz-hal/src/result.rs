//! Execution results.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Measurement counts keyed by bit-string.
///
/// Character `i` of a key is the measured value of qubit `i`, so qubit 0 is
/// the leftmost character. Keys are kept sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Counts(BTreeMap<String, u64>);

impl Counts {
    /// Create empty counts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` observations of `bitstring`.
    pub fn add(&mut self, bitstring: impl Into<String>, count: u64) {
        *self.0.entry(bitstring.into()).or_insert(0) += count;
    }

    /// Count for a bit-string, 0 if never observed.
    pub fn get(&self, bitstring: &str) -> u64 {
        self.0.get(bitstring).copied().unwrap_or(0)
    }

    /// Total number of observations.
    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    /// Number of distinct outcomes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no outcome was recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(bitstring, count)` in bit-string order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &u64)> {
        self.0.iter()
    }

    /// The most frequent outcome. Ties go to the lexicographically smallest
    /// bit-string.
    pub fn most_frequent(&self) -> Option<(&String, u64)> {
        self.0
            .iter()
            .fold(None, |best: Option<(&String, u64)>, (k, &v)| match best {
                Some((_, bv)) if bv >= v => best,
                _ => Some((k, v)),
            })
    }

    /// Relative frequencies, `count / total`.
    pub fn probabilities(&self) -> BTreeMap<String, f64> {
        let total = self.total();
        if total == 0 {
            return BTreeMap::new();
        }
        self.0
            .iter()
            .map(|(k, &v)| (k.clone(), v as f64 / total as f64))
            .collect()
    }

    /// Shannon entropy of the empirical distribution, in bits.
    pub fn entropy(&self) -> f64 {
        self.probabilities()
            .values()
            .filter(|p| **p > 0.0)
            .map(|p| -p * p.log2())
            .sum()
    }

    /// The underlying map.
    pub fn as_map(&self) -> &BTreeMap<String, u64> {
        &self.0
    }
}

impl FromIterator<(String, u64)> for Counts {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let mut counts = Counts::new();
        for (k, v) in iter {
            counts.add(k, v);
        }
        counts
    }
}

impl<'a> IntoIterator for &'a Counts {
    type Item = (&'a String, &'a u64);
    type IntoIter = std::collections::btree_map::Iter<'a, String, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Result of running a circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Measurement counts.
    pub counts: Counts,
    /// Number of shots executed.
    pub shots: u32,
    /// Wall-clock execution time, if the backend reports it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<u64>,
}

impl ExecutionResult {
    /// Create a result.
    pub fn new(counts: Counts, shots: u32) -> Self {
        Self {
            counts,
            shots,
            execution_time_ms: None,
        }
    }

    /// Attach an execution time.
    pub fn with_execution_time(mut self, ms: u64) -> Self {
        self.execution_time_ms = Some(ms);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bell_counts() -> Counts {
        [("00".to_string(), 512), ("11".to_string(), 512)]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_counts_basics() {
        let mut counts = bell_counts();
        counts.add("00", 1);
        assert_eq!(counts.get("00"), 513);
        assert_eq!(counts.get("01"), 0);
        assert_eq!(counts.total(), 1025);
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn test_most_frequent_tie_breaks_low() {
        let counts = bell_counts();
        let (key, count) = counts.most_frequent().unwrap();
        assert_eq!(key, "00");
        assert_eq!(count, 512);
        assert!(Counts::new().most_frequent().is_none());
    }

    #[test]
    fn test_entropy() {
        assert!((bell_counts().entropy() - 1.0).abs() < 1e-12);

        let mut single = Counts::new();
        single.add("0", 10);
        assert_eq!(single.entropy(), 0.0);
        assert_eq!(Counts::new().entropy(), 0.0);
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let probs = bell_counts().probabilities();
        let sum: f64 = probs.values().sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let json = serde_json::to_value(bell_counts()).unwrap();
        assert_eq!(json, serde_json::json!({"00": 512, "11": 512}));
    }
}
