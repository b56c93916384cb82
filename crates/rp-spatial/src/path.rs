//! Time-stamped paths.
//!
//! A step's index in its path *is* its logical tick: step 0 is the robot's
//! start at tick 0, step `i` is where it stands at tick `i`.

use std::fmt;

use rp_core::Position;

/// One `(position, tick)` entry of a [`Path`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathStep {
    pub pos:  Position,
    pub tick: u32,
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.pos.x, self.pos.y, self.tick)
    }
}

/// A non-empty, immutable sequence of steps produced by a search.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    steps: Vec<PathStep>,
}

impl Path {
    /// Build a path from positions, stamping each with its index as tick.
    ///
    /// # Panics
    /// Panics if `positions` is empty.
    pub fn from_positions<I>(positions: I) -> Self
    where
        I: IntoIterator<Item = Position>,
    {
        let steps: Vec<PathStep> = positions
            .into_iter()
            .enumerate()
            .map(|(i, pos)| PathStep { pos, tick: i as u32 })
            .collect();
        assert!(!steps.is_empty(), "a path needs at least its start step");
        Self { steps }
    }

    /// Number of steps (ticks spanned), start included.
    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always `false`; present for API symmetry with collections.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[inline]
    pub fn step(&self, i: usize) -> PathStep {
        self.steps[i]
    }

    #[inline]
    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    #[inline]
    pub fn start(&self) -> Position {
        self.steps[0].pos
    }

    #[inline]
    pub fn end(&self) -> Position {
        self.steps[self.steps.len() - 1].pos
    }

    /// Position at tick `t`; a path holds its last position afterwards.
    pub fn position_at(&self, t: u32) -> Position {
        self.steps.get(t as usize).map_or_else(|| self.end(), |s| s.pos)
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.steps.iter().map(|s| s.pos)
    }

    /// Positions after the start, what a robot enqueues as its moves.
    pub fn moves(&self) -> impl Iterator<Item = Position> + '_ {
        self.positions().skip(1)
    }

    /// `true` if the robot never leaves its start cell.
    pub fn is_stationary(&self) -> bool {
        let start = self.start();
        self.positions().all(|p| p == start)
    }
}

impl fmt::Display for Path {
    /// `[(x, y, t), (x, y, t), ...]`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{step}")?;
        }
        f.write_str("]")
    }
}
