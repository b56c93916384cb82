//! Random shelving for the demo floor.

use rp_core::{Grid, Position, SimRng};
use rp_sim::TerrainGenerator;

/// Blocks each cell independently with probability `density`, keeping the
/// outer ring of the floor clear as an aisle.
pub struct ScatterTerrain {
    pub density: f64,
}

impl TerrainGenerator for ScatterTerrain {
    fn generate(&mut self, grid: &mut Grid, rng: &mut SimRng) {
        grid.clear();
        let (w, h) = (grid.width(), grid.height());
        for y in 1..h.saturating_sub(1) {
            for x in 1..w.saturating_sub(1) {
                grid.set_blocked(Position::new(x, y), rng.gen_bool(self.density));
            }
        }
    }
}
