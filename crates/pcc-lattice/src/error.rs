//! Error types for the lattice generators.

use pcc_ir::IrError;
use thiserror::Error;

/// Errors that can occur while generating lattice circuits.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LatticeError {
    /// Scale index outside `1..=scales`.
    #[error("Scale {scale} is outside 1..={scales}")]
    ScaleOutOfRange { scale: u32, scales: u32 },

    /// Too many scales for site ids to fit in a `u32`.
    #[error("{scales} scales exceed the supported maximum of {max}")]
    TooManyScales { scales: u32, max: u32 },

    /// Coordinate outside a `side x side` lattice.
    #[error("Coordinate ({x}, {y}) is outside a lattice of side {side}")]
    CoordOutOfRange { x: u32, y: u32, side: u32 },

    /// Error from the IR crate.
    #[error("IR error: {0}")]
    Ir(#[from] IrError),
}

/// Result type for lattice operations.
pub type LatticeResult<T> = Result<T, LatticeError>;
