//! Space-time reservation table.
//!
//! # Data layout
//!
//! One `width × height` boolean layer per tick of the window, stored in a
//! single flat `Vec<bool>`:
//!
//! ```text
//! cells[(t * height + y) * width + x] == true   ⇔   (x, y) claimed at tick t
//! ```
//!
//! The table only knows ticks `0..horizon`.  Writes past the horizon are
//! dropped and reads past it report free, since nothing beyond the window is
//! constrained.  There is no unblock operation: a table lives for exactly one
//! planning round and is rebuilt for the next.

use std::fmt;

use rp_core::{Grid, Position};

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ReservationTable {
    width:   u32,
    height:  u32,
    horizon: u32,
    cells:   Vec<bool>,
}

impl ReservationTable {
    /// An empty table covering ticks `0..horizon`.
    ///
    /// # Panics
    /// Panics if any dimension or the horizon is zero.
    pub fn new(width: u32, height: u32, horizon: u32) -> Self {
        assert!(width > 0 && height > 0, "table dimensions must be positive, got {width}x{height}");
        assert!(horizon > 0, "reservation horizon must be at least one tick");
        let len = width as usize * height as usize * horizon as usize;
        Self { width, height, horizon, cells: vec![false; len] }
    }

    /// A table with every blocked terrain cell of `grid` claimed for the whole
    /// window.
    pub fn from_grid(grid: &Grid, horizon: u32) -> Self {
        let mut table = Self::new(grid.width(), grid.height(), horizon);
        for (pos, blocked) in grid.iter() {
            if blocked {
                table.block_all(pos);
            }
        }
        table
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of ticks covered.
    #[inline]
    pub fn horizon(&self) -> u32 {
        self.horizon
    }

    /// `true` if the table's layers have the same shape as `grid`.
    pub fn matches(&self, grid: &Grid) -> bool {
        self.width == grid.width() && self.height == grid.height()
    }

    /// Claim `pos` for every tick of the window.
    pub fn block_all(&mut self, pos: Position) {
        for t in 0..self.horizon {
            let i = self.index_of(pos, t);
            self.cells[i] = true;
        }
    }

    /// Claim `pos` at tick `t` only.  A no-op when `t` is past the horizon.
    pub fn block_at(&mut self, pos: Position, t: u32) {
        if t < self.horizon {
            let i = self.index_of(pos, t);
            self.cells[i] = true;
        }
    }

    /// `true` if `pos` is claimed at tick `t`.  Ticks past the horizon are
    /// always free.
    #[inline]
    pub fn is_blocked(&self, pos: Position, t: u32) -> bool {
        t < self.horizon && self.cells[self.index_of(pos, t)]
    }

    /// `true` if `pos` is unclaimed at every tick from `t` to the end of the
    /// window, so a robot arriving at `t` may stay there.
    pub fn is_free_from(&self, pos: Position, t: u32) -> bool {
        (t..self.horizon).all(|k| !self.is_blocked(pos, k))
    }

    /// Number of claimed `(cell, tick)` slots.
    pub fn blocked_count(&self) -> usize {
        self.cells.iter().filter(|&&b| b).count()
    }

    /// # Panics
    /// Panics if `pos` is outside the table.
    #[inline]
    fn index_of(&self, pos: Position, t: u32) -> usize {
        assert!(
            pos.x < self.width && pos.y < self.height,
            "position {pos} outside {}x{} reservation table",
            self.width,
            self.height
        );
        let (w, h) = (self.width as usize, self.height as usize);
        (t as usize * h + pos.y as usize) * w + pos.x as usize
    }
}

impl fmt::Display for ReservationTable {
    /// One ASCII layer per tick, headed `t=<tick>`: `#` claimed, `.` free.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let w = self.width as usize;
        let layer = w * self.height as usize;
        for (t, cells) in self.cells.chunks(layer).enumerate() {
            writeln!(f, "t={t}")?;
            for row in cells.chunks(w) {
                for &blocked in row {
                    f.write_str(if blocked { "#" } else { "." })?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
