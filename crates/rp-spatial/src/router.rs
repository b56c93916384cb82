//! Single-robot path search on a static grid.
//!
//! # Pluggability
//!
//! The reactive controller calls search through the [`PathFinder`] trait, so
//! applications can swap in another algorithm (jump-point search, a learned
//! heuristic) without touching the controller.  The default
//! [`AStarPathFinder`] is plain 4-connected A*.
//!
//! # Determinism
//!
//! Neighbours are expanded in [`Grid::neighbours`] order (left, up, down,
//! right) and open-set ties on `f = g + h` pop in insertion order, so the same
//! grid always yields the same path.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use rp_core::{Grid, Position};
use tracing::trace;

use crate::Path;

// ── PathFinder trait ──────────────────────────────────────────────────────────

/// Pluggable single-robot search over a static grid (no time dimension).
pub trait PathFinder: Send + Sync {
    /// Shortest 4-connected path from `from` to `to`.
    ///
    /// Returns `None` when the goal is blocked or cut off.  That is a normal
    /// outcome, not an error.  `from == to` yields a single-step path.  The
    /// start cell itself may be blocked (a snapshot often marks the robot's
    /// own cell); only the cells entered are checked.
    ///
    /// # Panics
    /// Panics if either position lies outside `grid`.
    fn find_path(&self, grid: &Grid, from: Position, to: Position) -> Option<Path>;
}

// ── AStarPathFinder ───────────────────────────────────────────────────────────

/// A* with unit step cost and Manhattan heuristic.
///
/// Manhattan distance is admissible and consistent on a unit-cost
/// 4-connected grid, so the first time the goal is popped its path is
/// shortest and a closed node never needs reopening.
#[derive(Clone, Copy, Debug, Default)]
pub struct AStarPathFinder;

impl PathFinder for AStarPathFinder {
    fn find_path(&self, grid: &Grid, from: Position, to: Position) -> Option<Path> {
        astar(grid, from, to)
    }
}

// ── A* internals ──────────────────────────────────────────────────────────────

/// Sentinel for "no parent" in the dense parent array.
const NO_PARENT: usize = usize::MAX;

fn astar(grid: &Grid, from: Position, to: Position) -> Option<Path> {
    let start = grid.index_of(from);
    let goal = grid.index_of(to);

    if grid.is_blocked(to) {
        return None;
    }
    if start == goal {
        return Some(Path::from_positions([from]));
    }

    let n = grid.cell_count();
    // g[v] = best known step count to reach v.
    let mut g = vec![u32::MAX; n];
    let mut parent = vec![NO_PARENT; n];
    let mut closed = vec![false; n];

    g[start] = 0;

    // Min-heap on (f, insertion seq).  The sequence number makes equal-f
    // entries pop first-in first-out.
    let mut heap: BinaryHeap<Reverse<(u32, u64, usize)>> = BinaryHeap::new();
    let mut seq: u64 = 0;
    heap.push(Reverse((from.manhattan(to), seq, start)));

    let mut expanded = 0usize;
    while let Some(Reverse((_, _, node))) = heap.pop() {
        if closed[node] {
            continue;
        }
        closed[node] = true;

        if node == goal {
            trace!(%from, %to, expanded, steps = g[goal], "grid search reached goal");
            return Some(reconstruct(grid, &parent, goal));
        }
        expanded += 1;

        let pos = grid.position_of(node);
        let next_g = g[node] + 1;
        for neighbour in grid.neighbours(pos) {
            if grid.is_blocked(neighbour) {
                continue;
            }
            let ni = grid.index_of(neighbour);
            if closed[ni] || next_g >= g[ni] {
                continue;
            }
            g[ni] = next_g;
            parent[ni] = node;
            seq += 1;
            heap.push(Reverse((next_g + neighbour.manhattan(to), seq, ni)));
        }
    }

    trace!(%from, %to, expanded, "grid search exhausted without reaching goal");
    None
}

fn reconstruct(grid: &Grid, parent: &[usize], goal: usize) -> Path {
    let mut cells = Vec::new();
    let mut cur = goal;
    while cur != NO_PARENT {
        cells.push(grid.position_of(cur));
        cur = parent[cur];
    }
    cells.reverse();
    Path::from_positions(cells)
}
