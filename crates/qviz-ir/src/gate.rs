//! Gate types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{IrError, IrResult};
use crate::qubit::QubitId;

/// The fixed set of gates a circuit may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GateKind {
    /// Hadamard gate.
    H,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,
    /// T gate (fourth root of Z).
    T,
    /// Controlled-NOT gate.
    #[serde(alias = "CX")]
    CNOT,
    /// Controlled-Z gate.
    CZ,
    /// SWAP gate.
    SWAP,
}

impl GateKind {
    /// Every supported gate, in canonical order.
    pub const ALL: [GateKind; 8] = [
        GateKind::H,
        GateKind::X,
        GateKind::Y,
        GateKind::Z,
        GateKind::T,
        GateKind::CNOT,
        GateKind::CZ,
        GateKind::SWAP,
    ];

    /// Canonical wire name.
    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            GateKind::H => "H",
            GateKind::X => "X",
            GateKind::Y => "Y",
            GateKind::Z => "Z",
            GateKind::T => "T",
            GateKind::CNOT => "CNOT",
            GateKind::CZ => "CZ",
            GateKind::SWAP => "SWAP",
        }
    }

    /// Number of qubits the gate acts on.
    #[inline]
    pub fn num_qubits(self) -> u32 {
        if self.is_two_qubit() { 2 } else { 1 }
    }

    /// Whether the gate needs a target qubit.
    #[inline]
    pub fn is_two_qubit(self) -> bool {
        matches!(self, GateKind::CNOT | GateKind::CZ | GateKind::SWAP)
    }

    /// Whether the gate creates correlations between qubits.
    #[inline]
    pub fn is_entangling(self) -> bool {
        matches!(self, GateKind::CNOT | GateKind::CZ)
    }

    /// Whether applying the gate twice on the same operands is the identity.
    #[inline]
    pub fn is_self_inverse(self) -> bool {
        !matches!(self, GateKind::T)
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GateKind {
    type Err = IrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "H" => Ok(GateKind::H),
            "X" => Ok(GateKind::X),
            "Y" => Ok(GateKind::Y),
            "Z" => Ok(GateKind::Z),
            "T" => Ok(GateKind::T),
            "CNOT" | "CX" => Ok(GateKind::CNOT),
            "CZ" => Ok(GateKind::CZ),
            "SWAP" => Ok(GateKind::SWAP),
            _ => Err(IrError::UnknownGate(s.to_string())),
        }
    }
}

/// A single gate application.
///
/// For controlled gates `qubit` is the control and `target` the target;
/// for SWAP the two are interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Gate {
    /// Gate kind.
    #[serde(rename = "type")]
    pub kind: GateKind,
    /// First (or only) qubit.
    pub qubit: QubitId,
    /// Second qubit for two-qubit gates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<QubitId>,
}

impl Gate {
    /// A single-qubit gate.
    pub fn single(kind: GateKind, qubit: impl Into<QubitId>) -> Self {
        Self {
            kind,
            qubit: qubit.into(),
            target: None,
        }
    }

    /// A two-qubit gate.
    pub fn pair(kind: GateKind, qubit: impl Into<QubitId>, target: impl Into<QubitId>) -> Self {
        Self {
            kind,
            qubit: qubit.into(),
            target: Some(target.into()),
        }
    }

    /// Check the gate's arity and operand distinctness.
    pub fn validate(&self) -> IrResult<()> {
        match (self.kind.is_two_qubit(), self.target) {
            (true, None) => Err(IrError::MissingTarget {
                kind: self.kind,
                qubit: self.qubit,
            }),
            (true, Some(target)) if target == self.qubit => Err(IrError::SameQubit {
                kind: self.kind,
                qubit: self.qubit,
            }),
            (false, Some(_)) => Err(IrError::UnexpectedTarget { kind: self.kind }),
            _ => Ok(()),
        }
    }

    /// Qubits the gate touches, in operand order.
    pub fn qubits(&self) -> impl Iterator<Item = QubitId> + use<> {
        std::iter::once(self.qubit).chain(self.target)
    }

    /// Highest qubit index the gate touches.
    pub fn max_qubit(&self) -> QubitId {
        self.target.map_or(self.qubit, |t| t.max(self.qubit))
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.target {
            Some(target) => write!(f, "{} {}, {}", self.kind, self.qubit, target),
            None => write!(f, "{} {}", self.kind, self.qubit),
        }
    }
}

/// Gate as it arrives on the wire: untyped name and signed indices.
///
/// Conversion into a [`Gate`] is where unknown names and negative indices
/// are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateSpec {
    /// Gate name, e.g. `"H"` or `"CNOT"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// First (or only) qubit index.
    pub qubit: i64,
    /// Target qubit index for two-qubit gates.
    #[serde(default)]
    pub target: Option<i64>,
}

impl GateSpec {
    /// Convenience constructor.
    pub fn new(kind: impl Into<String>, qubit: i64, target: Option<i64>) -> Self {
        Self {
            kind: kind.into(),
            qubit,
            target,
        }
    }
}

impl TryFrom<&GateSpec> for Gate {
    type Error = IrError;

    fn try_from(spec: &GateSpec) -> Result<Self, Self::Error> {
        let kind: GateKind = spec.kind.parse()?;
        let qubit = QubitId::try_from(spec.qubit)?;
        let target = spec.target.map(QubitId::try_from).transpose()?;
        Ok(Gate {
            kind,
            qubit,
            target,
        })
    }
}
