//! Bitset of live qubits used by the backward cone sweep.

use bitvec::prelude::*;

use pcc_ir::{QubitId, Support};

/// A set of qubits backed by a growable bitset.
///
/// Membership tests are O(1); the set grows on insert when an id exceeds
/// the initial bound.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiveSet {
    bits: BitVec<usize, Lsb0>,
}

impl LiveSet {
    /// Empty set sized for ids below `bound`.
    pub fn with_bound(bound: usize) -> Self {
        Self {
            bits: BitVec::repeat(false, bound),
        }
    }

    /// Set holding every qubit of `support`.
    pub fn from_support(support: &Support, bound: usize) -> Self {
        let bound = support.max().map_or(bound, |q| bound.max(q.index() + 1));
        let mut set = Self::with_bound(bound);
        for qubit in support.iter() {
            set.insert(qubit);
        }
        set
    }

    /// Check membership.
    #[inline]
    pub fn contains(&self, qubit: QubitId) -> bool {
        self.bits.get(qubit.index()).is_some_and(|bit| *bit)
    }

    /// Add a qubit. Returns true if it was not present before.
    pub fn insert(&mut self, qubit: QubitId) -> bool {
        let index = qubit.index();
        if index >= self.bits.len() {
            self.bits.resize(index + 1, false);
        }
        let fresh = !self.bits[index];
        self.bits.set(index, true);
        fresh
    }

    /// Number of qubits in the set.
    pub fn len(&self) -> usize {
        self.bits.count_ones()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Iterate in ascending id order.
    #[allow(clippy::cast_possible_truncation)]
    pub fn iter(&self) -> impl Iterator<Item = QubitId> + '_ {
        self.bits.iter_ones().map(|index| QubitId(index as u32))
    }
}
