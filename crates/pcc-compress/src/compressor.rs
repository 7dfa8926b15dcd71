//! End-to-end compression pipeline and its configuration.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use pcc_ir::{Circuit, Gate, Support};

use crate::allocate::compress;
use crate::cone::past_causal_cone;
use crate::error::CompressResult;
use crate::rearrange::{TieBreak, rearrange_with};
use crate::schedule::Schedule;
use crate::verification::verify_schedule;

/// Settings of a [`Compressor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressorConfig {
    /// Rule for equally narrow cones in the rearranger.
    pub tie_break: TieBreak,
    /// Keep the support qubits alive (never release them).
    pub freeze_support: bool,
    /// Check every schedule against its circuit before allocation.
    pub verify: bool,
}

impl Default for CompressorConfig {
    fn default() -> Self {
        Self {
            tie_break: TieBreak::LowestId,
            freeze_support: true,
            verify: true,
        }
    }
}

/// Metrics and artifacts of one compression run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressionReport {
    /// Past causal cone of the support (or the input itself).
    pub reduced: Circuit,
    /// Rearranged schedule of the reduced circuit.
    pub schedule: Schedule,
    /// Compressed circuit over physical slots.
    pub compressed: Circuit,
    /// Distinct logical qubits of the reduced circuit.
    pub logical_qubits: usize,
    /// Largest summed gate arity of any reduced layer.
    pub uncompressed_width: usize,
    /// Distinct physical slots of the compressed circuit.
    pub width: usize,
    /// Layers of the compressed circuit.
    pub depth: usize,
    /// `width * depth`.
    pub volume: usize,
    /// Two-site gates of the compressed circuit.
    pub gates: usize,
    /// Release layers of the compressed circuit.
    pub releases: usize,
}

impl CompressionReport {
    /// Serialize the report as JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Runs cone extraction, rearrangement, verification and slot allocation.
#[derive(Debug, Clone, Default)]
pub struct Compressor {
    config: CompressorConfig,
}

impl Compressor {
    /// Create a compressor with the given settings.
    pub fn new(config: CompressorConfig) -> Self {
        Self { config }
    }

    /// The active settings.
    pub fn config(&self) -> &CompressorConfig {
        &self.config
    }

    /// Compress the past causal cone of `support` in `circuit`.
    #[instrument(skip_all, fields(layers = circuit.depth(), support = support.len()))]
    pub fn run(&self, circuit: &Circuit, support: &Support) -> CompressResult<CompressionReport> {
        circuit.validate()?;

        let reduced = past_causal_cone(circuit, support);
        debug!(
            "Causal cone kept {} of {} gates",
            reduced.num_gates(),
            circuit.num_gates()
        );

        let frozen = if self.config.freeze_support {
            support.clone()
        } else {
            Support::new()
        };
        self.compress_reduced(reduced, &frozen)
    }

    /// Compress `circuit` as a whole, never releasing the `frozen` qubits.
    #[instrument(skip_all, fields(layers = circuit.depth(), frozen = frozen.len()))]
    pub fn compress_frozen(
        &self,
        circuit: &Circuit,
        frozen: &Support,
    ) -> CompressResult<CompressionReport> {
        circuit.validate()?;
        self.compress_reduced(circuit.clone(), frozen)
    }

    fn compress_reduced(
        &self,
        reduced: Circuit,
        frozen: &Support,
    ) -> CompressResult<CompressionReport> {
        let schedule = rearrange_with(&reduced, frozen, self.config.tie_break)?;
        if self.config.verify {
            verify_schedule(&reduced, &schedule)?;
        }
        let compressed = compress(&schedule)?;

        let releases = compressed
            .circuit
            .gates()
            .filter(|gate| gate.is_release())
            .count();
        let gates = compressed
            .circuit
            .gates()
            .filter(|gate| matches!(gate, Gate::Pair(..)))
            .count();

        let report = CompressionReport {
            logical_qubits: reduced.qubits().len(),
            uncompressed_width: reduced.uncompressed_width(),
            width: compressed.width,
            depth: compressed.depth,
            volume: compressed.volume(),
            gates,
            releases,
            reduced,
            schedule,
            compressed: compressed.circuit,
        };

        info!(
            "Compressed {} logical qubits to width {}, depth {}",
            report.logical_qubits, report.width, report.depth
        );

        Ok(report)
    }
}

/// Builder for [`Compressor`].
#[derive(Debug, Clone, Default)]
pub struct CompressorBuilder {
    config: CompressorConfig,
}

impl CompressorBuilder {
    /// Create a builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all settings.
    #[must_use]
    pub fn with_config(mut self, config: CompressorConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the tie-break rule of the rearranger.
    #[must_use]
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.config.tie_break = tie_break;
        self
    }

    /// Choose whether support qubits are frozen.
    #[must_use]
    pub fn with_freeze_support(mut self, freeze: bool) -> Self {
        self.config.freeze_support = freeze;
        self
    }

    /// Choose whether schedules are verified before allocation.
    #[must_use]
    pub fn with_verification(mut self, verify: bool) -> Self {
        self.config.verify = verify;
        self
    }

    /// Build the compressor.
    pub fn build(self) -> Compressor {
        Compressor::new(self.config)
    }
}

/// Width of `circuit` after compression with `frozen` kept alive.
pub fn optimal_width(circuit: &Circuit, frozen: &Support) -> CompressResult<usize> {
    Ok(Compressor::default().compress_frozen(circuit, frozen)?.width)
}

/// Depth of `circuit` after compression with `frozen` kept alive.
pub fn reduced_depth(circuit: &Circuit, frozen: &Support) -> CompressResult<usize> {
    Ok(Compressor::default().compress_frozen(circuit, frozen)?.depth)
}
