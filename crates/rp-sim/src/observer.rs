//! Simulation observer trait for progress reporting and rendering.

use rp_agent::{RobotStore, StepEvent};
use rp_core::{Grid, RobotId, Tick};

/// Callbacks invoked by the controllers' `step` at key points of a tick.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: arrival counter
///
/// ```rust,ignore
/// struct Arrivals(usize);
///
/// impl SimObserver for Arrivals {
///     fn on_robot_event(&mut self, _tick: Tick, _robot: RobotId, event: StepEvent) {
///         if matches!(event, StepEvent::Reached { .. }) {
///             self.0 += 1;
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any robot moves.
    fn on_step_start(&mut self, _tick: Tick) {}

    /// Called once per robot per tick with the outcome of its move.
    fn on_robot_event(&mut self, _tick: Tick, _robot: RobotId, _event: StepEvent) {}

    /// Called after every planning attempt.  `found` is `false` when the
    /// robot got no path to its target.
    fn on_replan(&mut self, _tick: Tick, _robot: RobotId, _found: bool) {}

    /// Called at the end of each tick with read-only access to the terrain
    /// and robots, e.g. to repaint a view.
    fn on_step_end(&mut self, _tick: Tick, _grid: &Grid, _robots: &RobotStore) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `step` but
/// don't want callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
