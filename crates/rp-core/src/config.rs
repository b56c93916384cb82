//! Simulation configuration.
//!
//! Typically loaded from a JSON file by the application crate (with the
//! `serde` feature) and handed to a controller.  Changing any value on a
//! running controller goes through `apply_params`, which performs a full
//! reset: the grid is recreated and the robot list cleared.

use crate::{RpError, RpResult};

/// Bounded retry for reactive replanning.
///
/// With `max_failures = None` (the default) a robot whose target is
/// unreachable retries every tick, forever.  With `Some(n)`, after `n`
/// consecutive failed replans the robot sits out `cooldown_ticks` ticks before
/// trying again.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RetryPolicy {
    pub max_failures:   Option<u32>,
    pub cooldown_ticks: u64,
}

impl RetryPolicy {
    /// Retry every tick without limit.
    pub const UNBOUNDED: RetryPolicy = RetryPolicy { max_failures: None, cooldown_ticks: 0 };

    pub fn bounded(max_failures: u32, cooldown_ticks: u64) -> Self {
        Self { max_failures: Some(max_failures), cooldown_ticks }
    }

    #[inline]
    pub fn is_bounded(&self) -> bool {
        self.max_failures.is_some()
    }
}

/// Top-level simulation parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimParams {
    /// Map width in cells.
    pub map_width: u32,

    /// Map height in cells.
    pub map_height: u32,

    /// Robots created by `place_robots`.
    pub robot_count: usize,

    /// Give a robot a fresh random target as soon as it reaches its current one.
    pub auto_target: bool,

    /// Master RNG seed.  The same seed always produces identical placements
    /// and targets.
    pub seed: u64,

    /// Cooperative planning window, in ticks.  Every planned path spans
    /// exactly this many steps.
    pub horizon: u32,

    /// Ticks between cooperative planning rounds.  `0` means half the
    /// horizon (at least 1).
    pub replan_interval: u32,

    /// Reactive replanning retry policy.
    pub retry: RetryPolicy,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            map_width:       21,
            map_height:      21,
            robot_count:     10,
            auto_target:     true,
            seed:            42,
            horizon:         16,
            replan_interval: 0,
            retry:           RetryPolicy::UNBOUNDED,
        }
    }
}

impl SimParams {
    /// Reject parameter sets no controller can honour.
    pub fn validate(&self) -> RpResult<()> {
        if self.map_width == 0 || self.map_height == 0 {
            return Err(RpError::Config(format!(
                "map must be at least 1x1, got {}x{}",
                self.map_width, self.map_height
            )));
        }
        if self.horizon == 0 {
            return Err(RpError::Config("planning horizon must be at least 1 tick".into()));
        }
        let cells = self.map_width as usize * self.map_height as usize;
        if self.robot_count > cells {
            return Err(RpError::Config(format!(
                "{} robots do not fit on a {}x{} map",
                self.robot_count, self.map_width, self.map_height
            )));
        }
        Ok(())
    }

    /// Effective ticks between cooperative rounds.
    #[inline]
    pub fn effective_replan_interval(&self) -> u32 {
        if self.replan_interval == 0 {
            (self.horizon / 2).max(1)
        } else {
            self.replan_interval
        }
    }
}
