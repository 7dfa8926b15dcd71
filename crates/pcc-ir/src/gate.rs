//! Gate definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{IrError, IrResult};
use crate::qubit::QubitId;

/// A gate of a layered circuit.
///
/// Arity is part of the gate's identity: a pair never turns into a release
/// marker or back. Pairs are unordered, so `(q0, q1)` and `(q1, q0)` compare
/// and hash equal, but the stored orientation is kept for output.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum Gate {
    /// Two-site interaction between distinct qubits.
    Pair(QubitId, QubitId),
    /// End of a qubit's logical lifetime. The site must be reinitialized
    /// before it is reused.
    Release(QubitId),
}

impl Gate {
    /// Create a two-site gate, rejecting self-loops.
    pub fn pair(a: impl Into<QubitId>, b: impl Into<QubitId>) -> IrResult<Self> {
        let (a, b) = (a.into(), b.into());
        if a == b {
            return Err(IrError::InvalidGate {
                gate: format!("({a}, {b})"),
                reason: "both endpoints name the same qubit".into(),
            });
        }
        Ok(Gate::Pair(a, b))
    }

    /// Create a release marker.
    pub fn release(qubit: impl Into<QubitId>) -> Self {
        Gate::Release(qubit.into())
    }

    /// Number of qubits the gate acts on.
    #[inline]
    pub fn arity(&self) -> usize {
        match self {
            Gate::Pair(..) => 2,
            Gate::Release(_) => 1,
        }
    }

    /// Check if this is a release marker.
    #[inline]
    pub fn is_release(&self) -> bool {
        matches!(self, Gate::Release(_))
    }

    /// The qubits the gate acts on, in stored order.
    pub fn qubits(&self) -> impl Iterator<Item = QubitId> + use<> {
        let ends = match *self {
            Gate::Pair(a, b) => [Some(a), Some(b)],
            Gate::Release(q) => [Some(q), None],
        };
        ends.into_iter().flatten()
    }

    /// Check if the gate acts on `qubit`.
    pub fn touches(&self, qubit: QubitId) -> bool {
        self.qubits().any(|q| q == qubit)
    }

    /// Rewrite the gate's qubits with a fallible mapping, keeping its arity
    /// and orientation.
    pub fn try_map_qubits<E>(
        &self,
        mut f: impl FnMut(QubitId) -> Result<QubitId, E>,
    ) -> Result<Self, E> {
        Ok(match *self {
            Gate::Pair(a, b) => Gate::Pair(f(a)?, f(b)?),
            Gate::Release(q) => Gate::Release(f(q)?),
        })
    }

    /// Orientation-free key used for equality and hashing.
    fn key(&self) -> (QubitId, Option<QubitId>) {
        match *self {
            Gate::Pair(a, b) if a <= b => (a, Some(b)),
            Gate::Pair(a, b) => (b, Some(a)),
            Gate::Release(q) => (q, None),
        }
    }
}

impl PartialEq for Gate {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Gate {}

impl Hash for Gate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gate::Pair(a, b) => write!(f, "({a}, {b})"),
            Gate::Release(q) => write!(f, "reset({q})"),
        }
    }
}
