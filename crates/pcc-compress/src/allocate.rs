//! Physical slot allocation for rearranged schedules.
//!
//! Slots come from a free stack that initially pops `0, 1, 2, ...`. A
//! released slot is pushed back on top and handed to the next qubit that
//! needs one, so a fresh slot is only opened when every slot opened so far
//! is in use. The number of distinct slots is therefore also the peak
//! number of slots in use at once.

use bitvec::prelude::*;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use pcc_ir::{Circuit, Gate, Layer, QubitId};

use crate::error::{CompressError, CompressResult};
use crate::schedule::{Schedule, ScheduleItem};

/// A compressed circuit and its metrics.
///
/// Qubit ids in `circuit` name physical slots. Release layers hold a single
/// [`Gate::Release`] telling the simulator to reinitialize that slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Compressed {
    /// Layers over physical slots.
    pub circuit: Circuit,
    /// Number of distinct physical slots.
    pub width: usize,
    /// Number of emitted layers, gate blocks and release layers alike.
    pub depth: usize,
}

impl Compressed {
    /// Space-time volume of the compressed circuit.
    pub fn volume(&self) -> usize {
        self.width * self.depth
    }
}

/// Logical-to-physical slot assignment for one schedule walk.
#[derive(Debug)]
pub struct SlotAllocator {
    /// Free slots, next one on top.
    available: Vec<u32>,
    /// Current slot of every live logical qubit.
    assignment: FxHashMap<QubitId, u32>,
    /// Slots handed out at least once.
    opened: BitVec<usize, Lsb0>,
    /// Largest number of slots simultaneously in use.
    peak: usize,
}

impl SlotAllocator {
    /// Allocator for logical ids below `bound`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn new(bound: usize) -> Self {
        Self {
            available: (0..bound as u32).rev().collect(),
            assignment: FxHashMap::default(),
            opened: BitVec::repeat(false, bound),
            peak: 0,
        }
    }

    /// Current slot of `qubit`, if it holds one.
    pub fn slot_of(&self, qubit: QubitId) -> Option<QubitId> {
        self.assignment.get(&qubit).copied().map(QubitId)
    }

    /// Slot of `qubit`, assigning the next free one on first use.
    pub fn acquire(&mut self, qubit: QubitId) -> CompressResult<QubitId> {
        if let Some(&slot) = self.assignment.get(&qubit) {
            return Ok(QubitId(slot));
        }

        let Some(slot) = self.available.pop() else {
            let bound = self.opened.len();
            error!(%qubit, bound, "Slot pool exhausted");
            return Err(CompressError::AllocatorExhausted { qubit, bound });
        };

        self.assignment.insert(qubit, slot);
        self.opened.set(slot as usize, true);
        self.peak = self.peak.max(self.assignment.len());
        Ok(QubitId(slot))
    }

    /// Free the slot of `qubit` so that a later qubit can reuse it.
    pub fn release(&mut self, qubit: QubitId) -> CompressResult<QubitId> {
        let slot = self
            .assignment
            .remove(&qubit)
            .ok_or(CompressError::UnassignedRelease { qubit })?;
        self.available.push(slot);
        Ok(QubitId(slot))
    }

    /// Number of slots currently in use.
    pub fn in_use(&self) -> usize {
        self.assignment.len()
    }

    /// Number of distinct slots handed out so far.
    pub fn opened(&self) -> usize {
        self.opened.count_ones()
    }

    /// Largest number of slots simultaneously in use so far.
    pub fn peak(&self) -> usize {
        self.peak
    }
}

/// Map a schedule onto as few physical slots as the release markers allow.
///
/// Each non-empty block becomes one layer; each release marker becomes a
/// layer with a single release gate on the freed slot.
pub fn compress(schedule: &Schedule) -> CompressResult<Compressed> {
    let mut allocator = SlotAllocator::new(schedule.qubit_bound());
    let mut circuit = Circuit::new();

    for item in schedule.items() {
        match item {
            ScheduleItem::Block(layer) => {
                if layer.is_empty() {
                    continue;
                }
                let mapped = layer
                    .iter()
                    .map(|gate| gate.try_map_qubits(|q| allocator.acquire(q)))
                    .collect::<CompressResult<Layer>>()?;
                circuit.push_layer(mapped);
            }
            ScheduleItem::Release(qubit) => {
                let slot = allocator.release(*qubit)?;
                circuit.push_layer(vec![Gate::Release(slot)]);
            }
        }
    }

    let compressed = Compressed {
        width: allocator.opened(),
        depth: circuit.depth(),
        circuit,
    };

    debug!(
        width = compressed.width,
        peak = allocator.peak(),
        depth = compressed.depth,
        "Slot allocation completed"
    );

    Ok(compressed)
}
