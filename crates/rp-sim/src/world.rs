//! Shared simulation state and the commands both controllers expose.
//!
//! A [`World`] owns the terrain, the robots, the controller RNG and the tick
//! counter.  Every mutator takes `&mut self`, so a driver sharing a controller
//! between a timer and UI input has to serialise access itself (e.g. behind a
//! `Mutex`); nothing here runs concurrently.

use rp_agent::{Robot, RobotStore};
use rp_core::{Grid, Position, RobotId, SimParams, SimRng, Tick};
use rustc_hash::FxHashSet;
use tracing::{debug, info, warn};

use crate::{SimError, SimResult, TerrainGenerator};

/// What a primary click on a cell did.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum CellClick {
    Created(RobotId),
    Removed(RobotId),
    /// The cell is terrain; nothing changed.
    Ignored,
}

/// Terrain, robots, RNG and tick counter shared by both controllers.
pub struct World {
    pub(crate) params: SimParams,
    pub(crate) grid:   Grid,
    pub(crate) robots: RobotStore,
    pub(crate) rng:    SimRng,
    pub(crate) tick:   Tick,
}

impl World {
    /// An empty map of the configured size with no robots.
    pub fn new(params: SimParams) -> SimResult<Self> {
        params.validate()?;
        Ok(Self {
            grid:   Grid::new(params.map_width, params.map_height),
            robots: RobotStore::new(),
            rng:    SimRng::new(params.seed),
            tick:   Tick::ZERO,
            params,
        })
    }

    // ── Read-only snapshots ───────────────────────────────────────────────

    #[inline]
    pub fn params(&self) -> &SimParams {
        &self.params
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn robots(&self) -> &RobotStore {
        &self.robots
    }

    #[inline]
    pub fn tick(&self) -> Tick {
        self.tick
    }

    pub fn robot(&self, id: RobotId) -> SimResult<&Robot> {
        self.robots.get(id).ok_or(SimError::RobotNotFound(id))
    }

    pub fn occupied_by_robot(&self, pos: Position) -> Option<RobotId> {
        self.robots.occupied_by(pos)
    }

    // ── Reset / configuration ─────────────────────────────────────────────

    /// Fresh all-free grid of the configured size; robots cleared, clock and
    /// RNG restarted.
    pub fn reset_map(&mut self) {
        self.grid = Grid::new(self.params.map_width, self.params.map_height);
        self.robots.clear();
        self.rng = SimRng::new(self.params.seed);
        self.tick = Tick::ZERO;
        info!(width = self.params.map_width, height = self.params.map_height, "map reset");
    }

    /// Validate and adopt new parameters, then reset.
    pub fn apply_params(&mut self, params: SimParams) -> SimResult<()> {
        params.validate()?;
        self.params = params;
        self.reset_map();
        Ok(())
    }

    /// Replace every robot with `robot_count` fresh ones on distinct random
    /// free cells.  Stops early when the map runs out of room and returns
    /// how many were placed.
    pub fn place_robots(&mut self) -> usize {
        self.robots.clear();
        for placed in 0..self.params.robot_count {
            let pool: Vec<Position> = self
                .grid
                .free_cells()
                .filter(|&p| self.robots.occupied_by(p).is_none())
                .collect();
            let Some(&cell) = self.rng.choose(&pool) else {
                warn!(placed, wanted = self.params.robot_count, "no free cell left for robot");
                return placed;
            };
            self.robots.create(cell);
        }
        info!(count = self.robots.len(), "robots placed");
        self.robots.len()
    }

    // ── Robots ────────────────────────────────────────────────────────────

    /// Add a robot on a free, unoccupied cell.
    pub fn create_robot(&mut self, pos: Position) -> SimResult<RobotId> {
        self.check_free(pos)?;
        if let Some(robot) = self.robots.occupied_by(pos) {
            return Err(SimError::CellOccupied { pos, robot });
        }
        let id = self.robots.create(pos);
        debug!(robot = %id, %pos, "robot created");
        Ok(id)
    }

    pub fn remove_robot(&mut self, id: RobotId) -> SimResult<Robot> {
        self.robots.remove(id).ok_or(SimError::RobotNotFound(id))
    }

    /// Primary click: on a free cell, remove the robot standing there or
    /// create one.
    pub fn click_cell(&mut self, pos: Position) -> SimResult<CellClick> {
        self.check(pos)?;
        if self.grid.is_blocked(pos) {
            return Ok(CellClick::Ignored);
        }
        match self.robots.occupied_by(pos) {
            Some(id) => {
                self.robots.remove(id);
                Ok(CellClick::Removed(id))
            }
            None => Ok(CellClick::Created(self.robots.create(pos))),
        }
    }

    /// Assign (or clear, with `None`) a robot's target.  Pending moves are
    /// dropped so the robot replans.
    pub fn set_robot_target(&mut self, id: RobotId, target: Option<Position>) -> SimResult<()> {
        if let Some(pos) = target {
            self.check_free(pos)?;
        }
        let robot = self.robots.get_mut(id).ok_or(SimError::RobotNotFound(id))?;
        robot.reset_moves();
        robot.set_target(target);
        Ok(())
    }

    /// Target the most recently added robot at `pos`.  Returns that robot,
    /// or `None` if there are no robots.
    pub fn set_last_robot_target(&mut self, pos: Position) -> SimResult<Option<RobotId>> {
        self.check_free(pos)?;
        let Some(robot) = self.robots.last_mut() else {
            return Ok(None);
        };
        robot.reset_moves();
        robot.set_target(Some(pos));
        Ok(Some(robot.id()))
    }

    /// Give every robot a new random target, all distinct.
    ///
    /// Targets are cleared first so stale ones do not shrink the pool, drawn
    /// one robot at a time in list order against the cleared snapshot, then
    /// applied together.  Returns the number of robots that got a target.
    pub fn random_targets(&mut self) -> usize {
        self.robots.clear_targets();
        let free: Vec<Position> = self.grid.free_cells().collect();
        let mut taken = FxHashSet::default();

        let draws: Vec<(RobotId, Option<Position>)> = self
            .robots
            .ids()
            .map(|id| {
                let pool: Vec<Position> =
                    free.iter().copied().filter(|p| !taken.contains(p)).collect();
                let target = self.rng.choose(&pool).copied();
                if let Some(t) = target {
                    taken.insert(t);
                }
                (id, target)
            })
            .collect();

        let mut assigned = 0;
        for (id, target) in draws {
            if let Some(robot) = self.robots.get_mut(id) {
                robot.reset_moves();
                robot.set_target(target);
                assigned += usize::from(target.is_some());
            }
        }
        info!(assigned, robots = self.robots.len(), "random targets assigned");
        assigned
    }

    /// Give one robot a random free cell that is nobody's target, its own
    /// current target included.  Leaves the target empty when no cell
    /// qualifies.
    pub fn assign_random_target(&mut self, id: RobotId) -> SimResult<Option<Position>> {
        let i = self.robots.ids().position(|r| r == id).ok_or(SimError::RobotNotFound(id))?;
        Ok(self.retarget_at(i))
    }

    /// [`assign_random_target`](Self::assign_random_target) for the robot at
    /// list index `i`.
    pub(crate) fn retarget_at(&mut self, i: usize) -> Option<Position> {
        let claimed: FxHashSet<Position> = self.robots.targets().collect();
        let pool: Vec<Position> = self.grid.free_cells().filter(|p| !claimed.contains(p)).collect();
        let target = self.rng.choose(&pool).copied();

        let robot = self.robots.at_mut(i);
        robot.reset_moves();
        robot.set_target(target);
        debug!(robot = %robot.id(), target = ?target, "assigning new target");
        target
    }

    // ── Terrain ───────────────────────────────────────────────────────────

    /// Flip a terrain cell; returns its new blocked state.
    pub fn toggle_cell(&mut self, pos: Position) -> SimResult<bool> {
        self.check(pos)?;
        Ok(self.grid.toggle(pos))
    }

    pub fn set_cell(&mut self, pos: Position, blocked: bool) -> SimResult<()> {
        self.check(pos)?;
        self.grid.set_blocked(pos, blocked);
        Ok(())
    }

    pub fn generate_terrain<G: TerrainGenerator>(&mut self, generator: &mut G) {
        generator.generate(&mut self.grid, &mut self.rng);
        info!(blocked = self.grid.blocked_count(), "terrain generated");
    }

    // ── Validation helpers ────────────────────────────────────────────────

    fn check(&self, pos: Position) -> SimResult<Position> {
        if self.grid.contains(pos) {
            Ok(pos)
        } else {
            Err(SimError::OutOfBounds { pos, width: self.grid.width(), height: self.grid.height() })
        }
    }

    fn check_free(&self, pos: Position) -> SimResult<Position> {
        self.check(pos)?;
        if self.grid.is_blocked(pos) {
            return Err(SimError::CellBlocked(pos));
        }
        Ok(pos)
    }
}
