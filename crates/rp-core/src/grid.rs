//! Static terrain: a 2-D blocked/free occupancy map.
//!
//! # Data layout
//!
//! Cells are stored row-major in a flat `Vec<bool>`:
//!
//! ```text
//! cells[y * width + x] == true   ⇔   (x, y) is blocked
//! ```
//!
//! Dimensions are fixed at construction.  `Clone` produces a fully
//! independent deep copy; planners take such a copy as a snapshot and mark
//! extra cells (other robots) on it without touching the live terrain.

use std::fmt;

use crate::{Position, RpError, RpResult};

/// Neighbour offsets in expansion order: left, up, down, right.
///
/// Both grid searches expand neighbours in this order, and path tie-breaks
/// depend on it.
const NEIGHBOUR_OFFSETS: [(i64, i64); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];

#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    width:  u32,
    height: u32,
    cells:  Vec<bool>,
}

impl Grid {
    /// An all-free grid of `width × height` cells.
    ///
    /// # Panics
    /// Panics if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be positive, got {width}x{height}");
        Self {
            width,
            height,
            cells: vec![false; width as usize * height as usize],
        }
    }

    /// Parse an ASCII map: one line per row, `#` or `X` blocked, `.` free.
    /// Blank lines and surrounding whitespace are ignored.
    pub fn parse(text: &str) -> RpResult<Self> {
        let rows: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        let Some(first) = rows.first() else {
            return Err(RpError::Parse("empty map".into()));
        };
        let width = first.chars().count();
        let mut grid = Grid::new(width as u32, rows.len() as u32);
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(RpError::Parse(format!(
                    "row {y} has {} cells, expected {width}",
                    row.chars().count()
                )));
            }
            for (x, c) in row.chars().enumerate() {
                let blocked = match c {
                    '#' | 'X' => true,
                    '.' => false,
                    other => {
                        return Err(RpError::Parse(format!(
                            "unexpected cell {other:?} at ({x}, {y})"
                        )));
                    }
                };
                grid.set_blocked(Position::new(x as u32, y as u32), blocked);
            }
        }
        Ok(grid)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// `true` if `pos` lies inside the grid.
    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Row-major index of `pos`.
    ///
    /// # Panics
    /// Panics if `pos` is outside the grid.
    #[inline]
    pub fn index_of(&self, pos: Position) -> usize {
        assert!(
            self.contains(pos),
            "position {pos} outside {}x{} grid",
            self.width,
            self.height
        );
        pos.y as usize * self.width as usize + pos.x as usize
    }

    /// Inverse of [`index_of`](Self::index_of).
    #[inline]
    pub fn position_of(&self, index: usize) -> Position {
        let w = self.width as usize;
        Position::new((index % w) as u32, (index / w) as u32)
    }

    #[inline]
    pub fn is_blocked(&self, pos: Position) -> bool {
        self.cells[self.index_of(pos)]
    }

    #[inline]
    pub fn is_free(&self, pos: Position) -> bool {
        !self.is_blocked(pos)
    }

    #[inline]
    pub fn set_blocked(&mut self, pos: Position, blocked: bool) {
        let i = self.index_of(pos);
        self.cells[i] = blocked;
    }

    /// Flip a cell and return its new state.
    pub fn toggle(&mut self, pos: Position) -> bool {
        let i = self.index_of(pos);
        self.cells[i] = !self.cells[i];
        self.cells[i]
    }

    /// Mark every cell free.
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Every cell with its blocked flag, row by row (`y` outer, `x` inner).
    pub fn iter(&self) -> impl Iterator<Item = (Position, bool)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &blocked)| (self.position_of(i), blocked))
    }

    /// Every free cell in row-major order.
    pub fn free_cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.iter().filter(|&(_, blocked)| !blocked).map(|(p, _)| p)
    }

    /// In-bounds 4-connected neighbours of `pos` in fixed expansion order
    /// (left, up, down, right), regardless of their blocked state.
    pub fn neighbours(&self, pos: Position) -> impl Iterator<Item = Position> + use<> {
        let (w, h) = (self.width as i64, self.height as i64);
        NEIGHBOUR_OFFSETS.into_iter().filter_map(move |(dx, dy)| {
            let nx = pos.x as i64 + dx;
            let ny = pos.y as i64 + dy;
            (nx >= 0 && ny >= 0 && nx < w && ny < h).then(|| Position::new(nx as u32, ny as u32))
        })
    }

    /// Number of blocked cells.
    pub fn blocked_count(&self) -> usize {
        self.cells.iter().filter(|&&b| b).count()
    }
}

impl fmt::Display for Grid {
    /// ASCII rendering: `#` blocked, `.` free, one row per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width as usize) {
            for &blocked in row {
                f.write_str(if blocked { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
