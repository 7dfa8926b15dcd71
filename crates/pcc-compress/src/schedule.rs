//! Schedules produced by the greedy rearranger.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use pcc_ir::{Gate, Layer, QubitId};

/// One element of a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduleItem {
    /// Gates executed together, in the relative order of the source circuit.
    Block(Layer),
    /// End of a logical qubit's lifetime.
    Release(QubitId),
}

/// An ordered sequence of blocks and release markers.
///
/// Consuming the items left to right is a valid execution order of the
/// circuit the schedule was built from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    items: Vec<ScheduleItem>,
}

impl Schedule {
    /// Create an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a block.
    pub fn push_block(&mut self, layer: Layer) {
        self.items.push(ScheduleItem::Block(layer));
    }

    /// Append a release marker.
    pub fn push_release(&mut self, qubit: QubitId) {
        self.items.push(ScheduleItem::Release(qubit));
    }

    /// The items in execution order.
    pub fn items(&self) -> &[ScheduleItem] {
        &self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the schedule has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of blocks.
    pub fn num_blocks(&self) -> usize {
        self.items
            .iter()
            .filter(|item| matches!(item, ScheduleItem::Block(_)))
            .count()
    }

    /// Number of release markers.
    pub fn num_releases(&self) -> usize {
        self.items.len() - self.num_blocks()
    }

    /// Gates of all blocks in execution order.
    pub fn gates(&self) -> impl Iterator<Item = &Gate> {
        self.items.iter().flat_map(|item| match item {
            ScheduleItem::Block(layer) => layer.as_slice(),
            ScheduleItem::Release(_) => &[][..],
        })
    }

    /// Distinct logical qubits named by blocks or release markers.
    pub fn qubits(&self) -> BTreeSet<QubitId> {
        let mut qubits: BTreeSet<QubitId> = self.gates().flat_map(Gate::qubits).collect();
        qubits.extend(self.items.iter().filter_map(|item| match item {
            ScheduleItem::Release(q) => Some(*q),
            ScheduleItem::Block(_) => None,
        }));
        qubits
    }

    /// One past the largest logical qubit id, or 0 for an empty schedule.
    pub fn qubit_bound(&self) -> usize {
        self.qubits().last().map_or(0, |q| q.index() + 1)
    }
}

impl From<Vec<ScheduleItem>> for Schedule {
    fn from(items: Vec<ScheduleItem>) -> Self {
        Self { items }
    }
}
