//! Past causal cone extraction.
//!
//! Both queries share one backward sweep over the layers. A gate is kept as
//! soon as one of its endpoints is live, and all of its endpoints become live.
//! Within a layer gates are visited in stored order, so the live set may grow
//! mid-layer when a layer is not gate-disjoint.

use pcc_ir::{Circuit, Gate, Layer, Support};

use crate::live::LiveSet;

/// Sweep `circuit` backwards from `support`, calling `keep` with the layer
/// index of every gate in the cone. Returns the qubits touched by kept gates.
fn sweep(circuit: &Circuit, support: &Support, mut keep: impl FnMut(usize, &Gate)) -> LiveSet {
    let bound = circuit.qubit_bound();
    let mut live = LiveSet::from_support(support, bound);
    let mut reached = LiveSet::with_bound(bound);

    for (index, layer) in circuit.layers().iter().enumerate().rev() {
        for gate in layer {
            if gate.qubits().any(|q| live.contains(q)) {
                for qubit in gate.qubits() {
                    live.insert(qubit);
                    reached.insert(qubit);
                }
                keep(index, gate);
            }
        }
    }

    reached
}

/// The minimal sub-circuit that can influence `support`.
///
/// The result has the same number of layers as `circuit`; layers outside the
/// cone are empty. Support qubits absent from the circuit have no effect.
pub fn past_causal_cone(circuit: &Circuit, support: &Support) -> Circuit {
    let mut layers = vec![Layer::new(); circuit.depth()];
    sweep(circuit, support, |index, gate| layers[index].push(*gate));
    Circuit::from(layers)
}

/// Number of qubits in the past causal cone of `support`, without building
/// the cone. Agrees with `past_causal_cone(circuit, support).qubits().len()`.
pub fn ancestor_width(circuit: &Circuit, support: &Support) -> usize {
    sweep(circuit, support, |_, _| {}).len()
}
