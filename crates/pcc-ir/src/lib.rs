//! Circuit model for past-causal-cone compression.
//!
//! This crate provides the data structures shared by the lattice generators
//! and the compressor: layered circuits of two-site gates and release
//! markers, plus support sets naming the outputs of interest.
//!
//! # Core Components
//!
//! - [`QubitId`]: dense identifier of a logical site (or, after compression,
//!   of a physical slot)
//! - [`Gate`]: a two-site interaction or a release marker
//! - [`Layer`] and [`Circuit`]: layers are ordered causally, gates inside a
//!   layer are not
//! - [`Support`]: unordered set of output qubits, also used for frozen sets
//!
//! # Example
//!
//! ```rust
//! use pcc_ir::{Circuit, QubitId};
//!
//! let circuit = Circuit::from_pairs([vec![(0, 1)], vec![(2, 3)]]).unwrap();
//! assert_eq!(circuit.depth(), 2);
//! assert_eq!(circuit.qubits().len(), 4);
//! assert_eq!(circuit.max_qubit(), Some(QubitId(3)));
//!
//! let first = Circuit::from_pairs([vec![(0, 1)], vec![]]).unwrap();
//! let rest = circuit.subtract(&first).unwrap();
//! assert_eq!(rest.num_gates(), 1);
//! ```

pub mod circuit;
pub mod error;
pub mod gate;
pub mod qubit;
pub mod support;

pub use circuit::{Circuit, Layer};
pub use error::{IrError, IrResult};
pub use gate::Gate;
pub use qubit::QubitId;
pub use support::Support;
