//! Backend capability introspection.

use qviz_ir::GateKind;
use serde::{Deserialize, Serialize};

/// What a backend can run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    /// Name of the backend.
    pub name: String,
    /// Number of qubits available.
    pub num_qubits: u32,
    /// Maximum number of shots per job.
    pub max_shots: u32,
    /// Whether this is a simulator (`true`) or real hardware (`false`).
    pub is_simulator: bool,
    /// Gates the backend executes natively.
    pub gates: Vec<GateKind>,
}

impl Capabilities {
    /// Capabilities for a simulator supporting every gate.
    pub fn simulator(name: impl Into<String>, num_qubits: u32, max_shots: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            max_shots,
            is_simulator: true,
            gates: GateKind::ALL.to_vec(),
        }
    }

    /// Whether `kind` is in the supported gate set.
    pub fn supports(&self, kind: GateKind) -> bool {
        self.gates.contains(&kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulator_supports_all_gates() {
        let caps = Capabilities::simulator("sim", 20, 100_000);
        assert!(caps.is_simulator);
        assert!(GateKind::ALL.iter().all(|g| caps.supports(*g)));
    }
}
