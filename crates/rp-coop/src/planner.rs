//! Windowed cooperative planning (space-time A* against a reservation table).
//!
//! # One round
//!
//! ```text
//! table = ReservationTable::from_grid(grid, horizon)
//! for robot in requests (caller's order, normally ascending priority):
//!   ① search : space-time A* from (start, 0) towards target
//!   ② commit : claim the robot's cells so later robots route around it
//! ```
//!
//! Every returned path spans exactly `horizon` ticks.  A robot that reaches
//! its target early waits there; a robot that cannot reach it inside the
//! window heads for the closest cell it found and idles there.
//!
//! # Determinism
//!
//! The wait successor is generated before the four moves (left, up, down,
//! right) and open-set ties on `f` pop in insertion order.  Because `g` is the
//! tick, a state's parent is fixed the first time it is generated.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::iter;

use rp_core::{Grid, Position, RobotId};
use rp_spatial::Path;
use tracing::{debug, trace};

use crate::ReservationTable;

// ── Request / result types ────────────────────────────────────────────────────

/// One robot's input to a planning round.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanRequest {
    pub id:     RobotId,
    pub start:  Position,
    pub target: Position,
}

/// A full-window path plus whether it ends resting on the target.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowPath {
    pub path:    Path,
    /// `false` for a best-effort path towards the closest reachable cell.
    pub reached: bool,
}

/// One robot's result from [`WindowedPlanner::plan_round`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PlanOutcome {
    pub id:   RobotId,
    /// `None` when the robot's start was already claimed at tick 0.
    pub plan: Option<WindowPath>,
}

impl PlanOutcome {
    #[inline]
    pub fn path(&self) -> Option<&Path> {
        self.plan.as_ref().map(|p| &p.path)
    }

    #[inline]
    pub fn reached(&self) -> bool {
        self.plan.as_ref().is_some_and(|p| p.reached)
    }
}

// ── WindowedPlanner ───────────────────────────────────────────────────────────

/// Plans robots one at a time against a shared [`ReservationTable`].
///
/// A planner lives for one round: it owns the round's table, and each
/// [`plan`](Self::plan) call sees the claims of every robot planned before it.
pub struct WindowedPlanner<'g> {
    grid:  &'g Grid,
    table: ReservationTable,
}

/// Sentinel for "no parent" in the dense parent array.
const NO_PARENT: usize = usize::MAX;

impl<'g> WindowedPlanner<'g> {
    /// A planner whose table starts with `grid`'s terrain claimed for all
    /// `horizon` ticks.
    pub fn new(grid: &'g Grid, horizon: u32) -> Self {
        Self { grid, table: ReservationTable::from_grid(grid, horizon) }
    }

    /// A planner over a pre-seeded table.
    ///
    /// # Panics
    /// Panics if the table's layers do not match the grid's dimensions.
    pub fn with_table(grid: &'g Grid, table: ReservationTable) -> Self {
        assert!(
            table.matches(grid),
            "reservation table is {}x{} but grid is {}x{}",
            table.width(),
            table.height(),
            grid.width(),
            grid.height()
        );
        Self { grid, table }
    }

    #[inline]
    pub fn horizon(&self) -> u32 {
        self.table.horizon()
    }

    #[inline]
    pub fn table(&self) -> &ReservationTable {
        &self.table
    }

    /// Space-time search from `(start, 0)` towards `target` without claiming
    /// anything.
    ///
    /// Returns `None` only when `start` is already claimed at tick 0.
    ///
    /// # Panics
    /// Panics if `start` or `target` is outside the grid.
    pub fn search(&self, start: Position, target: Position) -> Option<WindowPath> {
        assert!(self.grid.contains(target), "target {target} outside the grid");
        if self.table.is_blocked(start, 0) {
            debug!(%start, %target, "start cell already claimed, no window path");
            return None;
        }

        let horizon = self.table.horizon();
        let cells = self.grid.cell_count();
        let state = |pos: Position, t: u32| t as usize * cells + self.grid.index_of(pos);

        let mut parent = vec![NO_PARENT; cells * horizon as usize];
        let mut seen = vec![false; cells * horizon as usize];

        let origin = state(start, 0);
        seen[origin] = true;

        // Closest approach so far: strictly lower heuristic wins, ties keep
        // the earliest state.
        let mut best = origin;
        let mut best_h = start.manhattan(target);

        let mut heap: BinaryHeap<Reverse<(u32, u64, usize)>> = BinaryHeap::new();
        let mut seq: u64 = 0;
        heap.push(Reverse((best_h, seq, origin)));

        let mut goal = None;
        while let Some(Reverse((_, _, s))) = heap.pop() {
            let t = (s / cells) as u32;
            let pos = self.grid.position_of(s % cells);

            if pos == target && self.table.is_free_from(pos, t) {
                goal = Some(s);
                break;
            }
            if t + 1 >= horizon {
                continue;
            }

            let next = t + 1;
            for q in iter::once(pos).chain(self.grid.neighbours(pos)) {
                if self.grid.is_blocked(q) || self.table.is_blocked(q, next) {
                    continue;
                }
                let ns = state(q, next);
                if seen[ns] {
                    continue;
                }
                seen[ns] = true;
                parent[ns] = s;
                seq += 1;

                let h = q.manhattan(target);
                if h < best_h {
                    best_h = h;
                    best = ns;
                }
                heap.push(Reverse((next + h, seq, ns)));
            }
        }

        let reached = goal.is_some();
        let end = goal.unwrap_or(best);
        trace!(%start, %target, reached, generated = seq, "window search finished");
        Some(WindowPath { path: self.reconstruct(&parent, end, cells), reached })
    }

    /// Convenience over [`search`](Self::search) returning just the path.
    pub fn find_path(&self, start: Position, target: Position) -> Option<Path> {
        self.search(start, target).map(|w| w.path)
    }

    /// Claim the cells of a robot's planned path.
    ///
    /// The start is claimed at ticks 0 and 1, each later step at its own tick
    /// and the tick after, and the final cell for whatever remains of the
    /// window.  With no path, the start is claimed for the whole window.
    pub fn commit(&mut self, start: Position, path: Option<&Path>) {
        let Some(path) = path else {
            self.table.block_all(start);
            return;
        };
        self.table.block_at(start, 0);
        self.table.block_at(start, 1);
        for step in path.steps().iter().skip(1) {
            self.table.block_at(step.pos, step.tick);
            self.table.block_at(step.pos, step.tick + 1);
        }
        let end = path.end();
        for t in path.len() as u32..self.table.horizon() {
            self.table.block_at(end, t);
        }
    }

    /// Search, then commit the result.
    pub fn plan(&mut self, start: Position, target: Position) -> Option<WindowPath> {
        let planned = self.search(start, target);
        self.commit(start, planned.as_ref().map(|w| &w.path));
        planned
    }

    /// Plan every request in the order given.
    pub fn plan_round(&mut self, requests: &[PlanRequest]) -> Vec<PlanOutcome> {
        let outcomes: Vec<PlanOutcome> = requests
            .iter()
            .map(|req| {
                let plan = self.plan(req.start, req.target);
                debug!(
                    robot = %req.id,
                    start = %req.start,
                    target = %req.target,
                    found = plan.is_some(),
                    reached = plan.as_ref().is_some_and(|p| p.reached),
                    "planned window path"
                );
                PlanOutcome { id: req.id, plan }
            })
            .collect();
        trace!("reservations after round:\n{}", self.table);
        outcomes
    }

    fn reconstruct(&self, parent: &[usize], end: usize, cells: usize) -> Path {
        let mut positions = Vec::new();
        let mut cur = end;
        while cur != NO_PARENT {
            positions.push(self.grid.position_of(cur % cells));
            cur = parent[cur];
        }
        positions.reverse();
        let last = positions[positions.len() - 1];
        positions.resize(self.table.horizon() as usize, last);
        Path::from_positions(positions)
    }
}
