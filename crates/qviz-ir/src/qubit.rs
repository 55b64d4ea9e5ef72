//! Qubit addressing.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::IrError;

/// Index of a qubit within a circuit.
///
/// Unsigned by construction, so a `QubitId` is always non-negative. Wire
/// formats carry signed integers; use [`QubitId::try_from`] on an `i64` to
/// get a validation error instead of a silent wrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QubitId(pub u32);

impl QubitId {
    /// The index as a `usize`, for addressing state vectors.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}

impl TryFrom<i64> for QubitId {
    type Error = IrError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u32::try_from(value)
            .map(QubitId)
            .map_err(|_| IrError::InvalidQubitIndex(value))
    }
}
