//! Fluent builder for constructing a [`World`] with preset terrain and robots.

use rp_core::{Grid, Position, SimParams};

use crate::{SimError, SimResult, World};

/// Fluent builder for [`World`].
///
/// # Optional inputs (have defaults)
///
/// | Method               | Default                                    |
/// |----------------------|--------------------------------------------|
/// | `.grid(g)`           | All-free grid of `map_width × map_height`  |
/// | `.robot(pos, target)`| No robots                                  |
///
/// # Example
///
/// ```rust,ignore
/// let world = WorldBuilder::new(params)
///     .grid(Grid::parse(MAP)?)
///     .robot((0, 0).into(), Some((4, 2).into()))
///     .robot((1, 0).into(), None)
///     .build()?;
/// let mut sim = ReactiveController::new(world);
/// ```
pub struct WorldBuilder {
    params: SimParams,
    grid:   Option<Grid>,
    robots: Vec<(Position, Option<Position>)>,
}

impl WorldBuilder {
    pub fn new(params: SimParams) -> Self {
        Self { params, grid: None, robots: Vec::new() }
    }

    /// Start from existing terrain.  Its dimensions must match the params.
    pub fn grid(mut self, grid: Grid) -> Self {
        self.grid = Some(grid);
        self
    }

    /// Add a robot.  Robots get ids `0, 1, …` in the order added.
    pub fn robot(mut self, start: Position, target: Option<Position>) -> Self {
        self.robots.push((start, target));
        self
    }

    /// Validate inputs and return a ready world at tick zero.
    pub fn build(self) -> SimResult<World> {
        let mut world = World::new(self.params)?;

        if let Some(grid) = self.grid {
            let params = world.params();
            if (grid.width(), grid.height()) != (params.map_width, params.map_height) {
                return Err(SimError::Config(format!(
                    "grid is {}x{} but params ask for {}x{}",
                    grid.width(),
                    grid.height(),
                    params.map_width,
                    params.map_height
                )));
            }
            world.grid = grid;
        }

        for (start, target) in self.robots {
            let id = world.create_robot(start)?;
            if target.is_some() {
                world.set_robot_target(id, target)?;
            }
        }
        Ok(world)
    }
}
