//! Layered circuit representation.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::{IrError, IrResult};
use crate::gate::Gate;
use crate::qubit::QubitId;

/// Gates sharing one causal time step.
///
/// Gates inside a layer are not causally comparable to each other; only
/// layers are ordered.
pub type Layer = Vec<Gate>;

/// A circuit as an ordered list of layers.
///
/// Layer index order is causal order: earlier layers happen first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Circuit {
    layers: Vec<Layer>,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a circuit with `depth` empty layers.
    pub fn with_depth(depth: usize) -> Self {
        Self {
            layers: vec![Layer::new(); depth],
        }
    }

    /// Create a circuit from layers, rejecting self-referential pairs.
    pub fn from_layers(layers: Vec<Layer>) -> IrResult<Self> {
        let circuit = Self { layers };
        circuit.validate()?;
        Ok(circuit)
    }

    /// Create a circuit from layers of raw `(a, b)` pairs.
    pub fn from_pairs<L, P>(layers: L) -> IrResult<Self>
    where
        L: IntoIterator<Item = P>,
        P: IntoIterator<Item = (u32, u32)>,
    {
        let mut circuit = Self::new();
        for pairs in layers {
            let layer = pairs
                .into_iter()
                .map(|(a, b)| Gate::pair(a, b))
                .collect::<IrResult<Layer>>()?;
            circuit.push_layer(layer);
        }
        Ok(circuit)
    }

    /// Append a layer at the end of the circuit.
    pub fn push_layer(&mut self, layer: Layer) -> &mut Self {
        self.layers.push(layer);
        self
    }

    /// Add a two-site gate to an existing layer.
    pub fn add_pair(
        &mut self,
        layer: usize,
        a: impl Into<QubitId>,
        b: impl Into<QubitId>,
    ) -> IrResult<&mut Self> {
        let gate = Gate::pair(a, b)?;
        let depth = self.layers.len();
        let target = self
            .layers
            .get_mut(layer)
            .ok_or(IrError::LayerOutOfRange { layer, depth })?;
        target.push(gate);
        Ok(self)
    }

    /// Add a release marker to an existing layer.
    pub fn add_release(&mut self, layer: usize, qubit: impl Into<QubitId>) -> IrResult<&mut Self> {
        let depth = self.layers.len();
        let target = self
            .layers
            .get_mut(layer)
            .ok_or(IrError::LayerOutOfRange { layer, depth })?;
        target.push(Gate::release(qubit));
        Ok(self)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The layers in causal order.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Consume the circuit and return its layers.
    pub fn into_layers(self) -> Vec<Layer> {
        self.layers
    }

    /// Number of layers, empty ones included.
    pub fn depth(&self) -> usize {
        self.layers.len()
    }

    /// Number of non-empty layers.
    pub fn active_depth(&self) -> usize {
        self.layers.iter().filter(|l| !l.is_empty()).count()
    }

    /// Total number of gates.
    pub fn num_gates(&self) -> usize {
        self.layers.iter().map(Vec::len).sum()
    }

    /// Check if the circuit has no gates at all.
    pub fn is_empty(&self) -> bool {
        self.layers.iter().all(Vec::is_empty)
    }

    /// Iterate over all gates in causal order.
    pub fn gates(&self) -> impl Iterator<Item = &Gate> {
        self.layers.iter().flatten()
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Distinct qubits appearing anywhere in the circuit, pair endpoints and
    /// release markers alike. Empty for a circuit without gates.
    pub fn qubits(&self) -> BTreeSet<QubitId> {
        self.gates().flat_map(Gate::qubits).collect()
    }

    /// Largest qubit id in the circuit.
    pub fn max_qubit(&self) -> Option<QubitId> {
        self.gates().flat_map(Gate::qubits).max()
    }

    /// One past the largest qubit id, or 0 for an empty circuit.
    pub fn qubit_bound(&self) -> usize {
        self.max_qubit().map_or(0, |q| q.index() + 1)
    }

    /// Width of the circuit executed as is: the largest summed gate arity of
    /// any single layer.
    pub fn uncompressed_width(&self) -> usize {
        self.layers
            .iter()
            .map(|layer| layer.iter().map(Gate::arity).sum::<usize>())
            .max()
            .unwrap_or(0)
    }

    /// Total number of gate endpoints. Every endpoint is one location where
    /// a noise channel acts.
    pub fn endpoint_count(&self) -> usize {
        self.gates().map(Gate::arity).sum()
    }

    /// Remove, layer by layer, the gates of `other` from `self`.
    ///
    /// Gates are matched by value within corresponding layers, one occurrence
    /// in `self` per occurrence in `other`. `other` is expected to be a
    /// sub-circuit of `self`.
    pub fn subtract(&self, other: &Circuit) -> IrResult<Circuit> {
        if self.depth() != other.depth() {
            return Err(IrError::ShapeMismatch {
                left: self.depth(),
                right: other.depth(),
            });
        }

        let layers = self
            .layers
            .iter()
            .zip(&other.layers)
            .map(|(mine, theirs)| {
                if theirs.is_empty() {
                    return mine.clone();
                }
                let mut removed: FxHashMap<&Gate, usize> = FxHashMap::default();
                for gate in theirs {
                    *removed.entry(gate).or_default() += 1;
                }
                mine.iter()
                    .filter(|gate| match removed.get_mut(gate) {
                        Some(count) if *count > 0 => {
                            *count -= 1;
                            false
                        }
                        _ => true,
                    })
                    .copied()
                    .collect()
            })
            .collect();

        Ok(Circuit { layers })
    }

    /// Reject pairs whose endpoints coincide.
    pub fn validate(&self) -> IrResult<()> {
        for gate in self.gates() {
            if let Gate::Pair(a, b) = gate {
                if a == b {
                    return Err(IrError::InvalidGate {
                        gate: gate.to_string(),
                        reason: "both endpoints name the same qubit".into(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Reject self-referential pairs and any qubit id `>= bound`.
    pub fn validate_bound(&self, bound: usize) -> IrResult<()> {
        self.validate()?;
        for gate in self.gates() {
            if let Some(q) = gate.qubits().find(|q| q.index() >= bound) {
                return Err(IrError::InvalidGate {
                    gate: gate.to_string(),
                    reason: format!("{q} is outside the circuit bound {bound}"),
                });
            }
        }
        Ok(())
    }
}

impl From<Vec<Layer>> for Circuit {
    /// Wrap layers without validation.
    fn from(layers: Vec<Layer>) -> Self {
        Self { layers }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn disjoint_pairs() -> Circuit {
        Circuit::from_pairs([vec![(0, 1)], vec![(2, 3)]]).unwrap()
    }

    #[test]
    fn test_new_circuit() {
        let circuit = Circuit::new();
        assert_eq!(circuit.depth(), 0);
        assert!(circuit.is_empty());
        assert!(circuit.qubits().is_empty());
        assert_eq!(circuit.qubit_bound(), 0);
        assert_eq!(circuit.uncompressed_width(), 0);
    }

    #[test]
    fn test_qubits_include_releases() {
        let mut circuit = Circuit::with_depth(2);
        circuit.add_pair(0, 0_u32, 2_u32).unwrap();
        circuit.add_release(1, 5_u32).unwrap();

        let qubits: Vec<_> = circuit.qubits().into_iter().collect();
        assert_eq!(qubits, vec![QubitId(0), QubitId(2), QubitId(5)]);
        assert_eq!(circuit.qubit_bound(), 6);
        assert_eq!(circuit.num_gates(), 2);
        assert_eq!(circuit.endpoint_count(), 3);
    }

    #[test]
    fn test_add_pair_out_of_depth() {
        let mut circuit = Circuit::with_depth(1);
        assert!(matches!(
            circuit.add_pair(3, 0_u32, 1_u32),
            Err(IrError::LayerOutOfRange { layer: 3, depth: 1 })
        ));
        assert!(matches!(
            circuit.add_release(1, 0_u32),
            Err(IrError::LayerOutOfRange { layer: 1, depth: 1 })
        ));
    }

    #[test]
    fn test_from_pairs_rejects_self_loop() {
        let result = Circuit::from_pairs([vec![(0, 1), (2, 2)]]);
        assert!(matches!(result, Err(IrError::InvalidGate { .. })));
    }

    #[test]
    fn test_validate_unchecked_layers() {
        let circuit = Circuit::from(vec![vec![Gate::Pair(QubitId(4), QubitId(4))]]);
        assert!(matches!(
            circuit.validate(),
            Err(IrError::InvalidGate { .. })
        ));
    }

    #[test]
    fn test_validate_bound() {
        let circuit = disjoint_pairs();
        assert!(circuit.validate_bound(4).is_ok());
        assert!(matches!(
            circuit.validate_bound(3),
            Err(IrError::InvalidGate { .. })
        ));
    }

    #[test]
    fn test_subtract() {
        let circuit = disjoint_pairs();
        let first = Circuit::from_pairs([vec![(1, 0)], vec![]]).unwrap();

        let rest = circuit.subtract(&first).unwrap();
        assert_eq!(rest.depth(), 2);
        assert!(rest.layers()[0].is_empty());
        assert_eq!(rest.layers()[1], vec![Gate::pair(2_u32, 3_u32).unwrap()]);
    }

    #[test]
    fn test_subtract_removes_one_copy_per_match() {
        let circuit = Circuit::from_pairs([vec![(1, 2), (0, 1), (1, 2)]]).unwrap();
        let cone = Circuit::from_pairs([vec![(0, 1), (2, 1)]]).unwrap();

        let rest = circuit.subtract(&cone).unwrap();
        assert_eq!(rest.layers()[0], vec![Gate::pair(1_u32, 2_u32).unwrap()]);
        assert_eq!(rest.num_gates() + cone.num_gates(), circuit.num_gates());
    }

    #[test]
    fn test_subtract_shape_mismatch() {
        let two = Circuit::with_depth(2);
        let three = Circuit::with_depth(3);
        let result = two.subtract(&three);
        assert!(matches!(
            result,
            Err(IrError::ShapeMismatch { left: 2, right: 3 })
        ));
    }

    #[test]
    fn test_uncompressed_width() {
        let circuit = Circuit::from_pairs([vec![(0, 1), (2, 3)], vec![(1, 2)]]).unwrap();
        assert_eq!(circuit.uncompressed_width(), 4);
        assert_eq!(circuit.active_depth(), 2);
    }

    #[test]
    fn test_serde_roundtrip() {
        let circuit = disjoint_pairs();
        let json = serde_json::to_string(&circuit).unwrap();
        let back: Circuit = serde_json::from_str(&json).unwrap();
        assert_eq!(back, circuit);
    }

    proptest! {
        #[test]
        fn test_subtract_self_empties_every_layer(
            layers in prop::collection::vec(
                prop::collection::vec((0_u32..6, 0_u32..6), 0..4),
                0..6,
            )
        ) {
            let layers: Vec<Vec<(u32, u32)>> = layers
                .into_iter()
                .map(|l| l.into_iter().filter(|(a, b)| a != b).collect())
                .collect();
            let circuit = Circuit::from_pairs(layers).unwrap();
            let rest = circuit.subtract(&circuit).unwrap();
            prop_assert_eq!(rest.depth(), circuit.depth());
            prop_assert!(rest.is_empty());
        }
    }
}
