//! Past-causal-cone circuit compression.
//!
//! Local observables of a layered circuit only depend on the gates in their
//! past causal cone. This crate extracts that cone, reorders it so that
//! qubits can be retired early, and maps the reordered circuit onto a small
//! set of physical slots that are reset and reused.
//!
//! # Pipeline
//!
//! ```text
//! Circuit + Support
//!       │
//!       ▼
//! past_causal_cone ──► rearrange ──► verify_schedule ──► compress
//!   (reduced)          (Schedule)     (causal order)     (Compressed)
//! ```
//!
//! # Example
//!
//! ```rust
//! use pcc_compress::{CompressorBuilder, TieBreak};
//! use pcc_ir::{Circuit, Support};
//!
//! let circuit = Circuit::from_pairs([vec![(0, 1), (2, 3)], vec![(1, 2)]]).unwrap();
//! let support: Support = [1_u32].into_iter().collect();
//!
//! let report = CompressorBuilder::new()
//!     .with_tie_break(TieBreak::LowestId)
//!     .build()
//!     .run(&circuit, &support)
//!     .unwrap();
//!
//! assert!(report.width <= report.logical_qubits);
//! println!("width {} depth {}", report.width, report.depth);
//! ```

pub mod allocate;
pub mod compressor;
pub mod cone;
pub mod error;
pub mod live;
pub mod rearrange;
pub mod schedule;
pub mod verification;

pub use allocate::{Compressed, SlotAllocator, compress};
pub use compressor::{
    CompressionReport, Compressor, CompressorBuilder, CompressorConfig, optimal_width,
    reduced_depth,
};
pub use cone::{ancestor_width, past_causal_cone};
pub use error::{CompressError, CompressResult};
pub use live::LiveSet;
pub use rearrange::{TieBreak, rearrange, rearrange_with};
pub use schedule::{Schedule, ScheduleItem};
pub use verification::{VerificationResult, verify_schedule};
