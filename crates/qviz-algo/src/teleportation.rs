//! Quantum teleportation of a single-qubit message.
//!
//! Qubit 0 holds the message, qubits 1 and 2 share a Bell pair, and qubit 2
//! (Bob) receives the state. The classically controlled corrections are
//! replaced by their deferred-measurement equivalents, a CNOT from qubit 1
//! and a CZ from qubit 0, so the whole protocol is one circuit in the
//! QuantumViz gate set and can run on any [`Backend`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use qviz_hal::{Backend, Counts};
use qviz_ir::{Circuit, QubitId};

use crate::check_shots;
use crate::error::{AlgoError, AlgoResult};

const MESSAGE: QubitId = QubitId(0);
const ALICE: QubitId = QubitId(1);
const BOB: QubitId = QubitId(2);

/// State to teleport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Message {
    #[default]
    #[serde(rename = "0")]
    Zero,
    #[serde(rename = "1")]
    One,
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "-")]
    Minus,
}

impl Message {
    /// Wire form of the message.
    pub fn as_str(self) -> &'static str {
        match self {
            Message::Zero => "0",
            Message::One => "1",
            Message::Plus => "+",
            Message::Minus => "-",
        }
    }

    /// Whether Bob measures in the X basis.
    pub fn is_hadamard_basis(self) -> bool {
        matches!(self, Message::Plus | Message::Minus)
    }

    /// Bit Bob should read in the message's basis.
    pub fn expected_bit(self) -> char {
        match self {
            Message::Zero | Message::Plus => '0',
            Message::One | Message::Minus => '1',
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Message {
    type Err = AlgoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "0" => Ok(Message::Zero),
            "1" => Ok(Message::One),
            "+" => Ok(Message::Plus),
            "-" => Ok(Message::Minus),
            other => Err(AlgoError::invalid(format!(
                "message must be one of 0, 1, +, -; got {other:?}"
            ))),
        }
    }
}

/// Outcome of a teleportation run.
#[derive(Debug, Clone, Serialize)]
pub struct TeleportationOutcome {
    pub message: Message,
    pub measurement_basis: &'static str,
    pub expected_bit: char,
    pub circuit: Circuit,
    /// Full three-qubit measurement counts.
    pub counts: Counts,
    /// Counts of Bob's qubit alone.
    pub bob_counts: Counts,
    /// Fraction of shots where Bob read the expected bit.
    pub fidelity: f64,
    pub success: bool,
    pub backend: String,
    pub shots: u32,
}

/// Build the teleportation circuit for a message.
pub fn circuit(message: Message) -> AlgoResult<Circuit> {
    let mut c = Circuit::new();
    match message {
        Message::Zero => {}
        Message::One => {
            c.x(MESSAGE)?;
        }
        Message::Plus => {
            c.h(MESSAGE)?;
        }
        Message::Minus => {
            c.x(MESSAGE)?.h(MESSAGE)?;
        }
    }

    c.h(ALICE)?.cnot(ALICE, BOB)?;
    c.cnot(MESSAGE, ALICE)?.h(MESSAGE)?;
    c.cnot(ALICE, BOB)?.cz(MESSAGE, BOB)?;

    if message.is_hadamard_basis() {
        c.h(BOB)?;
    }
    Ok(c)
}

/// Teleport `message` and check Bob's measurements.
pub async fn run(
    backend: &dyn Backend,
    message: Message,
    shots: u32,
) -> AlgoResult<TeleportationOutcome> {
    check_shots(shots)?;
    let circuit = circuit(message)?;
    let result = backend.run(&circuit, shots).await?;

    let bob = BOB.index();
    let mut bob_counts = Counts::new();
    for (bitstring, &count) in &result.counts {
        if let Some(bit) = bitstring.chars().nth(bob) {
            bob_counts.add(bit.to_string(), count);
        }
    }

    let expected_bit = message.expected_bit();
    let hits = bob_counts.get(&expected_bit.to_string());
    let total = result.counts.total();
    let fidelity = if total == 0 {
        0.0
    } else {
        hits as f64 / total as f64
    };
    debug!(%message, fidelity, backend = backend.name(), "teleportation finished");

    Ok(TeleportationOutcome {
        message,
        measurement_basis: if message.is_hadamard_basis() { "X" } else { "Z" },
        expected_bit,
        circuit,
        success: total > 0 && hits == total,
        counts: result.counts,
        bob_counts,
        fidelity,
        backend: backend.name().to_string(),
        shots: result.shots,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use qviz_adapter_sim::{SimulatorBackend, SimulatorConfig};

    fn backend() -> SimulatorBackend {
        SimulatorBackend::with_config(SimulatorConfig {
            seed: Some(17),
            ..SimulatorConfig::default()
        })
    }

    #[test]
    fn test_message_parsing() {
        assert_eq!("+".parse::<Message>().unwrap(), Message::Plus);
        assert_eq!(" 1 ".parse::<Message>().unwrap(), Message::One);
        assert!("2".parse::<Message>().unwrap_err().is_validation());
        assert_eq!(serde_json::to_string(&Message::Minus).unwrap(), "\"-\"");
    }

    #[test]
    fn test_circuit_shape() {
        let c = circuit(Message::Zero).unwrap();
        assert_eq!(c.num_qubits(), 3);
        assert_eq!(c.len(), 6);
        assert_eq!(circuit(Message::Minus).unwrap().len(), 9);
    }

    #[tokio::test]
    async fn test_every_message_teleports() {
        let backend = backend();
        for message in [Message::Zero, Message::One, Message::Plus, Message::Minus] {
            let outcome = run(&backend, message, 512).await.unwrap();
            assert!(outcome.success, "{message}: {:?}", outcome.bob_counts);
            assert!((outcome.fidelity - 1.0).abs() < 1e-12);
            assert_eq!(outcome.counts.total(), 512);
            assert_eq!(outcome.bob_counts.len(), 1);
            assert_eq!(outcome.backend, "simulator");
        }
    }

    #[tokio::test]
    async fn test_rejects_zero_shots() {
        let err = run(&backend(), Message::One, 0).await.unwrap_err();
        assert!(err.is_validation());
    }
}
