//! Error types for the compression crate.

use pcc_ir::QubitId;
use thiserror::Error;

/// Errors that can occur during compression.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompressError {
    /// Error from the IR crate.
    #[error("IR error: {0}")]
    Ir(#[from] pcc_ir::IrError),

    /// The rearranger found qubits left but no candidate with a non-empty cone.
    #[error("Rearrangement made no progress with {remaining} gates left")]
    NoProgress { remaining: usize },

    /// The slot allocator ran out of physical slots.
    #[error("No physical slot left for {qubit} (bound {bound})")]
    AllocatorExhausted { qubit: QubitId, bound: usize },

    /// A release marker named a qubit that holds no slot.
    #[error("Release of {qubit} which holds no physical slot")]
    UnassignedRelease { qubit: QubitId },

    /// A schedule does not reproduce the causal order of its source circuit.
    #[error("Schedule violates causal order on {qubit}: {detail}")]
    OrderViolation { qubit: QubitId, detail: String },
}

impl CompressError {
    /// Internal-consistency failures that point at a bug in the rearranger
    /// or allocator rather than at bad input.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            CompressError::NoProgress { .. }
                | CompressError::AllocatorExhausted { .. }
                | CompressError::UnassignedRelease { .. }
                | CompressError::OrderViolation { .. }
        )
    }
}

/// Result type for compression operations.
pub type CompressResult<T> = Result<T, CompressError>;
