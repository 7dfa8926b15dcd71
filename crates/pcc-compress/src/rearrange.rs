//! Greedy rearrangement of a circuit into a schedule of causal cones.
//!
//! At each step the qubit whose past causal cone in the remaining circuit
//! is narrowest is retired: its cone is emitted layer by layer, removed from
//! the remaining circuit, and the qubit is released unless frozen. Keeping
//! the number of simultaneously live qubits small at every step is a proxy
//! for the peak slot count of the compressed circuit; it is not an optimum.
//!
//! Every step recomputes the cone width of every remaining qubit, which is
//! quadratic-ish in circuit size. An incremental variant may pick a
//! different schedule among equal-cost ones.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, error};

use pcc_ir::{Circuit, QubitId, Support};

use crate::cone::{ancestor_width, past_causal_cone};
use crate::error::{CompressError, CompressResult};
use crate::schedule::Schedule;

/// Rule for choosing among qubits with equally narrow cones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Prefer the smallest qubit id.
    #[default]
    LowestId,
    /// Prefer the largest qubit id.
    HighestId,
}

/// Rearrange `circuit` with the default tie-break (lowest id).
pub fn rearrange(circuit: &Circuit, frozen: &Support) -> CompressResult<Schedule> {
    rearrange_with(circuit, frozen, TieBreak::default())
}

/// Rearrange `circuit` into a schedule of cone blocks and release markers.
///
/// Qubits in `frozen` never receive a release marker.
pub fn rearrange_with(
    circuit: &Circuit,
    frozen: &Support,
    tie_break: TieBreak,
) -> CompressResult<Schedule> {
    let mut remaining = circuit.clone();
    let mut schedule = Schedule::new();
    let mut step = 0_usize;

    loop {
        let candidates = remaining.qubits();
        if candidates.is_empty() {
            break;
        }

        let (selected, width) = match select_narrowest(&remaining, &candidates, tie_break) {
            Some((qubit, width)) if width > 0 => (qubit, width),
            _ => {
                error!(
                    step,
                    remaining = remaining.num_gates(),
                    "No candidate qubit has a non-empty causal cone"
                );
                return Err(CompressError::NoProgress {
                    remaining: remaining.num_gates(),
                });
            }
        };

        let cone = past_causal_cone(&remaining, &Support::single(selected));
        remaining = remaining.subtract(&cone)?;

        for layer in cone.into_layers() {
            if !layer.is_empty() {
                schedule.push_block(layer);
            }
        }
        if !frozen.contains(selected) {
            schedule.push_release(selected);
        }

        debug!(
            step,
            qubit = %selected,
            width,
            remaining = remaining.num_gates(),
            "Retired causal cone"
        );
        step += 1;
    }

    debug!(
        steps = step,
        blocks = schedule.num_blocks(),
        releases = schedule.num_releases(),
        "Rearrangement completed"
    );

    Ok(schedule)
}

/// Candidate with the narrowest cone in `remaining`, ties broken by
/// `tie_break`. Candidates are visited in ascending id order.
fn select_narrowest(
    remaining: &Circuit,
    candidates: &BTreeSet<QubitId>,
    tie_break: TieBreak,
) -> Option<(QubitId, usize)> {
    let mut best: Option<(QubitId, usize)> = None;
    for &qubit in candidates {
        let width = ancestor_width(remaining, &Support::single(qubit));
        let better = match (best, tie_break) {
            (None, _) => true,
            (Some((_, best_width)), TieBreak::LowestId) => width < best_width,
            (Some((_, best_width)), TieBreak::HighestId) => width <= best_width,
        };
        if better {
            best = Some((qubit, width));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::ScheduleItem;
    use pcc_ir::Gate;

    fn pair(a: u32, b: u32) -> Gate {
        Gate::pair(a, b).unwrap()
    }

    #[test]
    fn test_empty_circuit() {
        let schedule = rearrange(&Circuit::with_depth(3), &Support::new()).unwrap();
        assert!(schedule.is_empty());
    }

    #[test]
    fn test_disjoint_pairs() {
        let circuit = Circuit::from_pairs([vec![(0, 1)], vec![(2, 3)]]).unwrap();
        let schedule = rearrange(&circuit, &Support::new()).unwrap();

        // Every qubit has width 2; q0 wins the tie and takes (0, 1) with it.
        // q1 is then gone from the circuit, so q2 is next.
        assert_eq!(
            schedule.items(),
            &[
                ScheduleItem::Block(vec![pair(0, 1)]),
                ScheduleItem::Release(QubitId(0)),
                ScheduleItem::Block(vec![pair(2, 3)]),
                ScheduleItem::Release(QubitId(2)),
            ]
        );
    }

    #[test]
    fn test_highest_id_tie_break() {
        let circuit = Circuit::from_pairs([vec![(0, 1)], vec![(2, 3)]]).unwrap();
        let schedule = rearrange_with(&circuit, &Support::new(), TieBreak::HighestId).unwrap();
        assert_eq!(
            schedule.items(),
            &[
                ScheduleItem::Block(vec![pair(2, 3)]),
                ScheduleItem::Release(QubitId(3)),
                ScheduleItem::Block(vec![pair(0, 1)]),
                ScheduleItem::Release(QubitId(1)),
            ]
        );
    }

    #[test]
    fn test_frozen_never_released() {
        let circuit = Circuit::from_pairs([vec![(0, 1)], vec![(2, 3)]]).unwrap();
        let frozen: Support = [0_u32, 2].into_iter().collect();
        let schedule = rearrange(&circuit, &frozen).unwrap();

        assert_eq!(schedule.num_releases(), 0);
        assert_eq!(schedule.num_blocks(), 2);
    }

    #[test]
    fn test_narrowest_cone_first() {
        // q0 is idle after the first layer, so its cone is a single gate.
        // Every other qubit's cone reaches back through the chain.
        let circuit = Circuit::from_pairs([vec![(0, 1)], vec![(1, 2)], vec![(2, 3)]]).unwrap();
        let schedule = rearrange(&circuit, &Support::new()).unwrap();

        assert_eq!(schedule.items()[0], ScheduleItem::Block(vec![pair(0, 1)]));
        assert_eq!(schedule.items()[1], ScheduleItem::Release(QubitId(0)));
        assert_eq!(schedule.gates().count(), 3);
    }

    #[test]
    fn test_blocks_keep_layer_order() {
        let circuit = Circuit::from_pairs([vec![(0, 1)], vec![(0, 1)], vec![(0, 1)]]).unwrap();
        let schedule = rearrange(&circuit, &Support::new()).unwrap();

        // A single cone holding all three layers, emitted as three blocks
        assert_eq!(schedule.num_blocks(), 3);
        assert_eq!(schedule.num_releases(), 1);
        assert_eq!(schedule.items()[3], ScheduleItem::Release(QubitId(0)));
    }
}
