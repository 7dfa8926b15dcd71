//! DMERA circuit generators.
//!
//! Deep multi-scale entanglement renormalization (DMERA) circuits act on a
//! lattice of `2^n` sites per dimension. Coarse scales touch a sparse subset
//! of sites and every finer scale doubles the density, so the past causal
//! cone of a few neighbouring sites stays narrow.
//!
//! - [`chain`]: periodic 1D chains
//! - [`square`]: periodic 2D square lattices, flattened with
//!   [`linear_index`]
//!
//! # Example
//!
//! ```rust
//! use pcc_lattice::{dmera_1d, neighbor_pair_1d};
//!
//! let circuit = dmera_1d(3, 2).unwrap();
//! assert_eq!(circuit.depth(), 6);
//!
//! let support = neighbor_pair_1d(0, 3).unwrap();
//! assert_eq!(support.len(), 2);
//! ```

pub mod chain;
pub mod error;
pub mod square;

pub use chain::{MAX_SCALES_1D, dmera_1d, even_bonds_1d, neighbor_pair_1d, odd_bonds_1d, sites_1d};
pub use error::{LatticeError, LatticeResult};
pub use square::{
    Axis, Coord, MAX_SCALES_2D, dmera_2d, even_bonds_2d, linear_index, neighbor_pair_2d,
    odd_bonds_2d, patch_2d, sites_2d, validate_2d,
};
