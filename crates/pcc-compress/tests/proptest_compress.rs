//! Property-based tests for cone extraction and compression.
//!
//! Random circuits come in two shapes: layers of qubit-disjoint pairs, as in
//! a brickwork circuit, and layers whose pairs may share qubits or repeat.

use pcc_compress::{
    Compressor, ScheduleItem, SlotAllocator, ancestor_width, compress, past_causal_cone,
    rearrange, verify_schedule,
};
use pcc_ir::{Circuit, Support};
use proptest::prelude::*;

/// One layer of disjoint pairs over `0..num_qubits`.
fn arb_layer(num_qubits: u32) -> impl Strategy<Value = Vec<(u32, u32)>> {
    (
        Just((0..num_qubits).collect::<Vec<_>>()).prop_shuffle(),
        0..=(num_qubits as usize / 2),
    )
        .prop_map(|(order, pairs)| {
            order
                .chunks_exact(2)
                .take(pairs)
                .map(|chunk| (chunk[0], chunk[1]))
                .collect()
        })
}

/// One layer of up to four pairs over `0..num_qubits`, qubits may repeat.
fn arb_shared_layer(num_qubits: u32) -> impl Strategy<Value = Vec<(u32, u32)>> {
    prop::collection::vec(
        (0..num_qubits, 0..num_qubits).prop_filter("Endpoints must differ", |(a, b)| a != b),
        0..=4,
    )
}

fn build(layers: Vec<Vec<(u32, u32)>>, support: Vec<u32>) -> (Circuit, Support) {
    let circuit = Circuit::from_pairs(layers).expect("no self-loops");
    (circuit, support.into_iter().collect())
}

/// A brickwork circuit on 2-8 qubits with up to 8 layers, and a support of
/// up to three of its qubits.
fn arb_circuit_and_support() -> impl Strategy<Value = (Circuit, Support)> {
    (2_u32..=8).prop_flat_map(|num_qubits| {
        (
            prop::collection::vec(arb_layer(num_qubits), 0..=8),
            prop::collection::vec(0..num_qubits, 0..=3),
        )
            .prop_map(|(layers, support)| build(layers, support))
    })
}

/// Like [`arb_circuit_and_support`], with layers that share qubits.
fn arb_shared_circuit_and_support() -> impl Strategy<Value = (Circuit, Support)> {
    (2_u32..=6).prop_flat_map(|num_qubits| {
        (
            prop::collection::vec(arb_shared_layer(num_qubits), 0..=6),
            prop::collection::vec(0..num_qubits, 0..=3),
        )
            .prop_map(|(layers, support)| build(layers, support))
    })
}

proptest! {
    /// Extracting the cone of a cone changes nothing.
    #[test]
    fn test_cone_is_idempotent((circuit, support) in arb_circuit_and_support()) {
        let cone = past_causal_cone(&circuit, &support);
        prop_assert_eq!(past_causal_cone(&cone, &support), cone.clone());
        prop_assert_eq!(cone.depth(), circuit.depth());
    }

    /// The cone only keeps gates of the source layer it came from.
    #[test]
    fn test_cone_is_sub_circuit((circuit, support) in arb_circuit_and_support()) {
        let cone = past_causal_cone(&circuit, &support);
        for (kept, source) in cone.layers().iter().zip(circuit.layers()) {
            for gate in kept {
                prop_assert!(source.contains(gate));
            }
        }
        let rest = circuit.subtract(&cone).expect("same depth");
        prop_assert_eq!(rest.num_gates() + cone.num_gates(), circuit.num_gates());
    }

    /// The ancestor width counts exactly the qubits of the cone.
    #[test]
    fn test_width_matches_cone_qubits((circuit, support) in arb_circuit_and_support()) {
        let cone = past_causal_cone(&circuit, &support);
        prop_assert_eq!(ancestor_width(&circuit, &support), cone.qubits().len());
    }

    /// Rearrangement keeps every gate and respects the causal order.
    #[test]
    fn test_rearrangement_is_valid_order((circuit, support) in arb_circuit_and_support()) {
        let schedule = rearrange(&circuit, &support).expect("rearrangement failed");
        prop_assert_eq!(schedule.gates().count(), circuit.num_gates());

        let result = verify_schedule(&circuit, &schedule).expect("verification failed");
        prop_assert!(result.passed);

        for item in schedule.items() {
            if let ScheduleItem::Release(qubit) = item {
                prop_assert!(!support.contains(*qubit), "frozen qubit released");
            }
        }
    }

    /// The number of distinct slots equals the peak number in use and never
    /// exceeds the number of logical qubits.
    #[test]
    fn test_slot_count_is_peak((circuit, support) in arb_circuit_and_support()) {
        let cone = past_causal_cone(&circuit, &support);
        let schedule = rearrange(&cone, &support).expect("rearrangement failed");
        let compressed = compress(&schedule).expect("compression failed");

        let mut allocator = SlotAllocator::new(schedule.qubit_bound());
        for item in schedule.items() {
            match item {
                ScheduleItem::Block(layer) => {
                    for qubit in layer.iter().flat_map(|gate| gate.qubits()) {
                        allocator.acquire(qubit).expect("slot available");
                    }
                }
                ScheduleItem::Release(qubit) => {
                    allocator.release(*qubit).expect("qubit holds a slot");
                }
            }
        }

        prop_assert_eq!(compressed.width, allocator.peak());
        prop_assert!(compressed.width <= cone.qubits().len());
        prop_assert_eq!(compressed.circuit.qubit_bound(), compressed.width);
    }

    /// The same input always yields the same report.
    #[test]
    fn test_compression_is_deterministic((circuit, support) in arb_circuit_and_support()) {
        let first = Compressor::default().run(&circuit, &support).expect("first run failed");
        let second = Compressor::default().run(&circuit, &support).expect("second run failed");

        prop_assert_eq!(
            first.to_json().expect("serialize"),
            second.to_json().expect("serialize")
        );
    }

    /// Without release markers every logical qubit keeps its own slot.
    #[test]
    fn test_no_release_uses_one_slot_per_qubit((circuit, _) in arb_circuit_and_support()) {
        let frozen: Support = circuit.qubits().into_iter().collect();
        let report = Compressor::default()
            .compress_frozen(&circuit, &frozen)
            .expect("compression failed");

        prop_assert_eq!(report.releases, 0);
        prop_assert_eq!(report.width, report.logical_qubits);
    }

    /// Fewer slots than qubits is only possible when some qubit was released.
    #[test]
    fn test_slot_savings_need_releases((circuit, support) in arb_shared_circuit_and_support()) {
        let report = Compressor::default().run(&circuit, &support).expect("compression failed");
        prop_assert!(report.width <= report.logical_qubits);
        if report.width < report.logical_qubits {
            prop_assert!(report.releases > 0);
        }
    }

    #[test]
    fn test_shared_cone_is_idempotent((circuit, support) in arb_shared_circuit_and_support()) {
        let cone = past_causal_cone(&circuit, &support);
        prop_assert_eq!(past_causal_cone(&cone, &support), cone.clone());
        prop_assert_eq!(ancestor_width(&circuit, &support), cone.qubits().len());
    }

    /// Subtracting a cone keeps every other gate, repeated gates included.
    #[test]
    fn test_shared_cone_conserves_gates((circuit, support) in arb_shared_circuit_and_support()) {
        let cone = past_causal_cone(&circuit, &support);
        let rest = circuit.subtract(&cone).expect("same depth");
        prop_assert_eq!(rest.num_gates() + cone.num_gates(), circuit.num_gates());
        prop_assert_eq!(rest.subtract(&rest).expect("same depth").num_gates(), 0);
    }

    /// Layers with shared qubits still rearrange into a verified order.
    #[test]
    fn test_shared_rearrangement_is_valid_order(
        (circuit, support) in arb_shared_circuit_and_support()
    ) {
        let schedule = rearrange(&circuit, &support).expect("rearrangement failed");
        prop_assert_eq!(schedule.gates().count(), circuit.num_gates());
        let result = verify_schedule(&circuit, &schedule).expect("verification failed");
        prop_assert!(result.passed);

        let report = Compressor::default().compress_frozen(&circuit, &support);
        prop_assert!(report.is_ok());
    }
}
