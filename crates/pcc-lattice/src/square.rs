//! DMERA circuits on a periodic `2^n x 2^n` square lattice.
//!
//! Sites are flattened to qubit ids with [`linear_index`]. Each scale
//! contributes `d` layers cycling through x-even, y-even, x-odd and y-odd
//! bonds.

use serde::{Deserialize, Serialize};

use pcc_ir::{Circuit, Gate, Layer, QubitId, Support};

use crate::chain::{check_scale, check_scales};
use crate::error::{LatticeError, LatticeResult};

/// Largest number of scales a square lattice may have.
pub const MAX_SCALES_2D: u32 = 15;

/// A site of the square lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: u32,
    pub y: u32,
}

impl Coord {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Lattice direction of a bond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    X,
    Y,
}

/// Qubit id of `coord` on a lattice with `n` scales: `x + 2^n * y`.
pub fn linear_index(coord: Coord, n: u32) -> LatticeResult<QubitId> {
    check_scales(n, MAX_SCALES_2D)?;
    let side = 1_u32 << n;
    if coord.x >= side || coord.y >= side {
        return Err(LatticeError::CoordOutOfRange {
            x: coord.x,
            y: coord.y,
            side,
        });
    }
    Ok(QubitId(coord.x + side * coord.y))
}

/// Sites of scale `s` as a grid of `2^s x 2^s` coordinates.
struct ScaleGrid {
    scales: u32,
    side: u32,
    stride: u32,
}

impl ScaleGrid {
    fn new(n: u32, s: u32) -> LatticeResult<Self> {
        check_scale(n, s, MAX_SCALES_2D)?;
        Ok(Self {
            scales: n,
            side: 1 << s,
            stride: 1 << (n - s),
        })
    }

    /// Site at grid position `(i, j)`, wrapping around.
    fn site(&self, i: u32, j: u32) -> Coord {
        Coord::new((i % self.side) * self.stride, (j % self.side) * self.stride)
    }

    fn qubit(&self, i: u32, j: u32) -> LatticeResult<QubitId> {
        linear_index(self.site(i, j), self.scales)
    }
}

/// Sites present up to scale `s`, x-major.
pub fn sites_2d(n: u32, s: u32) -> LatticeResult<Vec<Coord>> {
    let grid = ScaleGrid::new(n, s)?;
    Ok((0..grid.side)
        .flat_map(|i| (0..grid.side).map(move |j| (i, j)))
        .map(|(i, j)| grid.site(i, j))
        .collect())
}

/// Bonds starting on even grid positions along `axis`.
pub fn even_bonds_2d(n: u32, s: u32, axis: Axis) -> LatticeResult<Layer> {
    bonds(n, s, axis, 0)
}

/// Bonds starting on odd grid positions along `axis`.
pub fn odd_bonds_2d(n: u32, s: u32, axis: Axis) -> LatticeResult<Layer> {
    bonds(n, s, axis, 1)
}

fn bonds(n: u32, s: u32, axis: Axis, offset: u32) -> LatticeResult<Layer> {
    let grid = ScaleGrid::new(n, s)?;
    let half = grid.side / 2;
    let mut layer = Layer::with_capacity((half * grid.side) as usize);

    match axis {
        Axis::X => {
            for i in 0..half {
                for j in 0..grid.side {
                    let start = 2 * i + offset;
                    layer.push(Gate::pair(grid.qubit(start, j)?, grid.qubit(start + 1, j)?)?);
                }
            }
        }
        Axis::Y => {
            for i in 0..grid.side {
                for j in 0..half {
                    let start = 2 * j + offset;
                    layer.push(Gate::pair(grid.qubit(i, start)?, grid.qubit(i, start + 1)?)?);
                }
            }
        }
    }
    Ok(layer)
}

/// DMERA circuit with `n` scales and `d` layers per scale.
pub fn dmera_2d(n: u32, d: usize) -> LatticeResult<Circuit> {
    check_scales(n, MAX_SCALES_2D)?;
    let mut circuit = Circuit::new();
    for s in 1..=n {
        let cycle = [
            even_bonds_2d(n, s, Axis::X)?,
            even_bonds_2d(n, s, Axis::Y)?,
            odd_bonds_2d(n, s, Axis::X)?,
            odd_bonds_2d(n, s, Axis::Y)?,
        ];
        for j in 0..d {
            circuit.push_layer(cycle[j % cycle.len()].clone());
        }
    }
    Ok(circuit)
}

/// `coord` and its neighbour one step along `axis`, wrapping around.
pub fn neighbor_pair_2d(coord: Coord, axis: Axis, n: u32) -> LatticeResult<Support> {
    let first = linear_index(coord, n)?;
    let side = 1_u32 << n;
    let next = match axis {
        Axis::X => Coord::new((coord.x + 1) % side, coord.y),
        Axis::Y => Coord::new(coord.x, (coord.y + 1) % side),
    };
    Ok([first, linear_index(next, n)?].into_iter().collect())
}

/// The `l x l` block of sites with lower corner `origin`, wrapping around.
///
/// Blocks wider than the lattice cover every site.
pub fn patch_2d(origin: Coord, l: u32, n: u32) -> LatticeResult<Support> {
    linear_index(origin, n)?;
    let side = 1_u32 << n;
    let extent = l.min(side);
    let mut support = Support::new();
    for dx in 0..extent {
        for dy in 0..extent {
            let coord = Coord::new((origin.x + dx) % side, (origin.y + dy) % side);
            support.insert(linear_index(coord, n)?);
        }
    }
    Ok(support)
}

/// Check that every id of `circuit` lies on an `n`-scale square lattice.
pub fn validate_2d(circuit: &Circuit, n: u32) -> LatticeResult<()> {
    check_scales(n, MAX_SCALES_2D)?;
    let bound = 1_usize << (2 * n);
    circuit.validate_bound(bound)?;
    Ok(())
}
