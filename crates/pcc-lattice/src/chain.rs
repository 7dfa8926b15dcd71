//! DMERA circuits on a periodic chain of `2^n` sites.
//!
//! Scale `s` (with `s = 1` the coarsest) involves every `2^(n-s)`-th site of
//! the chain. Each scale contributes `d` layers that alternate between the
//! even and the odd nearest-neighbour bonds of its sites.

use pcc_ir::{Circuit, Gate, IrResult, Layer, QubitId, Support};

use crate::error::{LatticeError, LatticeResult};

/// Largest number of scales a chain may have.
pub const MAX_SCALES_1D: u32 = 31;

pub(crate) fn check_scales(scales: u32, max: u32) -> LatticeResult<()> {
    if scales > max {
        return Err(LatticeError::TooManyScales { scales, max });
    }
    Ok(())
}

pub(crate) fn check_scale(scales: u32, scale: u32, max: u32) -> LatticeResult<()> {
    check_scales(scales, max)?;
    if scale == 0 || scale > scales {
        return Err(LatticeError::ScaleOutOfRange { scale, scales });
    }
    Ok(())
}

/// Sites present up to scale `s` of an `n`-scale chain, in chain order.
pub fn sites_1d(n: u32, s: u32) -> LatticeResult<Vec<QubitId>> {
    check_scale(n, s, MAX_SCALES_1D)?;
    let stride = 1_u32 << (n - s);
    Ok((0..1_u32 << s).map(|i| QubitId(i * stride)).collect())
}

/// Bonds `(2i, 2i+1)` between the sites of scale `s`, wrapping around.
pub fn even_bonds_1d(n: u32, s: u32) -> LatticeResult<Layer> {
    bonds(n, s, 0)
}

/// Bonds `(2i+1, 2i+2)` between the sites of scale `s`, wrapping around.
pub fn odd_bonds_1d(n: u32, s: u32) -> LatticeResult<Layer> {
    bonds(n, s, 1)
}

fn bonds(n: u32, s: u32, offset: usize) -> LatticeResult<Layer> {
    let sites = sites_1d(n, s)?;
    let count = sites.len();
    let layer = (0..count / 2)
        .map(|i| {
            let first = 2 * i + offset;
            Gate::pair(sites[first % count], sites[(first + 1) % count])
        })
        .collect::<IrResult<Layer>>()?;
    Ok(layer)
}

/// DMERA circuit with `n` scales and `d` layers per scale.
pub fn dmera_1d(n: u32, d: usize) -> LatticeResult<Circuit> {
    check_scales(n, MAX_SCALES_1D)?;
    let mut circuit = Circuit::new();
    for s in 1..=n {
        let even = even_bonds_1d(n, s)?;
        let odd = odd_bonds_1d(n, s)?;
        for j in 0..d {
            circuit.push_layer(if j % 2 == 0 { even.clone() } else { odd.clone() });
        }
    }
    Ok(circuit)
}

/// Site `x` and its right neighbour on an `n`-scale chain.
pub fn neighbor_pair_1d(x: u32, n: u32) -> LatticeResult<Support> {
    check_scales(n, MAX_SCALES_1D)?;
    let len = 1_u32 << n;
    let x = x % len;
    Ok([x, (x + 1) % len].into_iter().collect())
}
