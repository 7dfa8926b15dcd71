//! Error types for the IR crate.

use thiserror::Error;

/// Errors that can occur in IR operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Two circuits with different layer counts were combined layer by layer.
    #[error("Circuit shape mismatch: {left} layers vs {right} layers")]
    ShapeMismatch {
        /// Layer count of the left operand.
        left: usize,
        /// Layer count of the right operand.
        right: usize,
    },

    /// A gate was added to a layer index past the end of the circuit.
    #[error("Layer {layer} is out of range for a circuit of depth {depth}")]
    LayerOutOfRange {
        /// Requested layer index.
        layer: usize,
        /// Number of layers in the circuit.
        depth: usize,
    },

    /// Gate is self-referential or names a qubit outside the circuit bound.
    #[error("Invalid gate {gate}: {reason}")]
    InvalidGate {
        /// Rendered gate.
        gate: String,
        /// What is wrong with it.
        reason: String,
    },
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
