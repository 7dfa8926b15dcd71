//! Support sets.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::qubit::QubitId;

/// A set of qubits whose final state is of interest.
///
/// Also used for frozen sets, i.e. qubits that must never be released.
/// Iteration is in ascending id order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Support {
    qubits: BTreeSet<QubitId>,
}

impl Support {
    /// Create an empty support.
    pub fn new() -> Self {
        Self::default()
    }

    /// Support made of one qubit.
    pub fn single(qubit: impl Into<QubitId>) -> Self {
        let mut support = Self::new();
        support.insert(qubit);
        support
    }

    /// Add a qubit. Returns false if it was already present.
    pub fn insert(&mut self, qubit: impl Into<QubitId>) -> bool {
        self.qubits.insert(qubit.into())
    }

    /// Check membership.
    #[inline]
    pub fn contains(&self, qubit: QubitId) -> bool {
        self.qubits.contains(&qubit)
    }

    /// Number of qubits.
    pub fn len(&self) -> usize {
        self.qubits.len()
    }

    /// Check if the support is empty.
    pub fn is_empty(&self) -> bool {
        self.qubits.is_empty()
    }

    /// Largest qubit id, if any.
    pub fn max(&self) -> Option<QubitId> {
        self.qubits.last().copied()
    }

    /// Iterate in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = QubitId> + '_ {
        self.qubits.iter().copied()
    }

    /// Check that every qubit of `self` is also in `other`.
    pub fn is_subset(&self, other: &Support) -> bool {
        self.qubits.is_subset(&other.qubits)
    }
}

impl<Q: Into<QubitId>> FromIterator<Q> for Support {
    fn from_iter<I: IntoIterator<Item = Q>>(iter: I) -> Self {
        Self {
            qubits: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<BTreeSet<QubitId>> for Support {
    fn from(qubits: BTreeSet<QubitId>) -> Self {
        Self { qubits }
    }
}
