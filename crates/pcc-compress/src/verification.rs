//! Verification that a schedule is a valid execution order of its circuit.
//!
//! Gates on the same qubit are causally ordered by layer, and gates on
//! different qubits only through shared qubits. Gates of one layer are not
//! ordered among themselves. A schedule therefore reproduces the circuit
//! exactly when every qubit sees its source layers in order, each layer's
//! gates on that qubit as one contiguous group in any order. Release markers
//! must come after the last gate on their qubit.

use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use tracing::debug;

use pcc_ir::{Circuit, Gate, QubitId};

use crate::error::{CompressError, CompressResult};
use crate::schedule::{Schedule, ScheduleItem};

/// Result of schedule verification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationResult {
    /// Whether the verification passed.
    pub passed: bool,
    /// Number of qubits verified.
    pub qubits_checked: usize,
    /// Number of gates verified.
    pub gates_checked: usize,
    /// Number of release markers found.
    pub releases_found: usize,
}

/// Gates of one source layer acting on a qubit.
struct LayerGroup {
    layer: usize,
    gates: Vec<Gate>,
}

/// Source gates of every qubit, grouped by layer in causal order.
fn source_wires(circuit: &Circuit) -> BTreeMap<QubitId, Vec<LayerGroup>> {
    let mut wires: BTreeMap<QubitId, Vec<LayerGroup>> = BTreeMap::new();
    for (layer, gates) in circuit.layers().iter().enumerate() {
        for gate in gates {
            for qubit in gate.qubits() {
                let groups = wires.entry(qubit).or_default();
                match groups.last_mut() {
                    Some(group) if group.layer == layer => group.gates.push(*gate),
                    _ => groups.push(LayerGroup {
                        layer,
                        gates: vec![*gate],
                    }),
                }
            }
        }
    }
    wires
}

/// Gate sequence seen by every qubit, in execution order.
fn scheduled_wires<'a>(gates: impl Iterator<Item = &'a Gate>) -> BTreeMap<QubitId, Vec<Gate>> {
    let mut wires: BTreeMap<QubitId, Vec<Gate>> = BTreeMap::new();
    for gate in gates {
        for qubit in gate.qubits() {
            wires.entry(qubit).or_default().push(*gate);
        }
    }
    wires
}

/// Check that `schedule` executes exactly the gates of `circuit` in an order
/// compatible with its layers, and that no qubit is used after release.
pub fn verify_schedule(circuit: &Circuit, schedule: &Schedule) -> CompressResult<VerificationResult> {
    let expected = source_wires(circuit);
    let actual = scheduled_wires(schedule.gates());

    for (&qubit, groups) in &expected {
        let scheduled = actual.get(&qubit).map_or(&[][..], Vec::as_slice);
        check_wire(qubit, groups, scheduled)?;
    }
    if let Some((&qubit, wire)) = actual.iter().find(|(q, _)| !expected.contains_key(*q)) {
        return Err(CompressError::OrderViolation {
            qubit,
            detail: format!("{} scheduled gates on a qubit absent from the source", wire.len()),
        });
    }

    let mut released = BTreeMap::new();
    for (position, item) in schedule.items().iter().enumerate() {
        match item {
            ScheduleItem::Release(qubit) => {
                if released.insert(*qubit, position).is_some() {
                    return Err(CompressError::OrderViolation {
                        qubit: *qubit,
                        detail: format!("released twice, again at item {position}"),
                    });
                }
            }
            ScheduleItem::Block(layer) => {
                let reused = layer
                    .iter()
                    .flat_map(Gate::qubits)
                    .find_map(|q| released.get(&q).map(|&at| (q, at)));
                if let Some((qubit, at)) = reused {
                    return Err(CompressError::OrderViolation {
                        qubit,
                        detail: format!("used at item {position} after release at item {at}"),
                    });
                }
            }
        }
    }

    let result = VerificationResult {
        passed: true,
        qubits_checked: expected.len(),
        gates_checked: circuit.num_gates(),
        releases_found: released.len(),
    };

    debug!(
        "Schedule verification passed: {} qubits checked, {} gates, {} releases",
        result.qubits_checked, result.gates_checked, result.releases_found
    );

    Ok(result)
}

/// Match the scheduled gates of `qubit` against its source layers, one
/// contiguous group per layer.
fn check_wire(qubit: QubitId, groups: &[LayerGroup], scheduled: &[Gate]) -> CompressResult<()> {
    let mut rest = scheduled;
    for group in groups {
        if rest.len() < group.gates.len() {
            return Err(CompressError::OrderViolation {
                qubit,
                detail: format!(
                    "{} gates of layer {} on this qubit, only {} left in the schedule",
                    group.gates.len(),
                    group.layer,
                    rest.len()
                ),
            });
        }
        let (chunk, tail) = rest.split_at(group.gates.len());
        if !same_gates(&group.gates, chunk) {
            return Err(CompressError::OrderViolation {
                qubit,
                detail: format!(
                    "gates of layer {} are not scheduled together after earlier layers",
                    group.layer
                ),
            });
        }
        rest = tail;
    }
    if !rest.is_empty() {
        return Err(CompressError::OrderViolation {
            qubit,
            detail: format!("{} scheduled gates missing from the source", rest.len()),
        });
    }
    Ok(())
}

/// Multiset equality of two gate lists.
fn same_gates(expected: &[Gate], actual: &[Gate]) -> bool {
    let mut counts: FxHashMap<&Gate, isize> = FxHashMap::default();
    for gate in expected {
        *counts.entry(gate).or_default() += 1;
    }
    for gate in actual {
        *counts.entry(gate).or_default() -= 1;
    }
    counts.values().all(|&count| count == 0)
}
