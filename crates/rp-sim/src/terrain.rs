//! Terrain generation seam.
//!
//! The controllers treat generated terrain as opaque static obstacles for the
//! next planning round; how it is produced (mazes, scattered shelving, a
//! loaded floor plan) is up to the implementor.

use rp_core::{Grid, SimRng};

/// Mutates a grid's blocked cells in place.
pub trait TerrainGenerator {
    /// Rewrite `grid`'s terrain.  Dimensions are fixed; only cell states may
    /// change.  Randomness must come from `rng` so runs stay reproducible.
    fn generate(&mut self, grid: &mut Grid, rng: &mut SimRng);
}

/// Clears every cell.
#[derive(Clone, Copy, Debug, Default)]
pub struct OpenTerrain;

impl TerrainGenerator for OpenTerrain {
    fn generate(&mut self, grid: &mut Grid, _rng: &mut SimRng) {
        grid.clear();
    }
}
