//! Reactive "plan and repair" controller.
//!
//! # One tick
//!
//! ```text
//! for robot in list order:
//!   ① advance  : take the next queued move (unconditional)
//!   ② retarget : on arrival, with auto_target, draw a new random target
//!   ③ conflict : another robot stands on, or heads for, this robot's
//!                nearest target
//!   ④ repair   : on conflict, or an empty queue short of the target,
//!                A* on a snapshot with the other robots marked blocked
//! ```
//!
//! Robots are handled one after another, so a robot's snapshot sees the
//! robots already advanced this tick and the old positions of the rest.
//! Nothing coordinates robots globally; a conflict may simply recur next
//! tick.

use rp_agent::{Robot, StepEvent};
use rp_core::{Position, RobotId, Tick};
use rp_spatial::{AStarPathFinder, PathFinder};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::{SimObserver, World};

// ── Retry bookkeeping ─────────────────────────────────────────────────────────

/// Consecutive failed replans for one robot towards one target.
#[derive(Clone, Copy, Debug)]
struct Backoff {
    target:        Position,
    failures:      u32,
    /// No replanning before this tick.
    cooling_until: Option<Tick>,
}

/// Result of one repair attempt.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum Repair {
    /// Nothing to plan towards (no target, or already standing on it).
    NoTarget,
    /// Sitting out a cooldown after repeated failures.
    CoolingDown,
    Found,
    NotFound,
}

// ── ReactiveController ────────────────────────────────────────────────────────

/// Steps a [`World`] with per-robot paths, replanning on conflict.
pub struct ReactiveController<F: PathFinder = AStarPathFinder> {
    world:  World,
    finder: F,
    retry:  FxHashMap<RobotId, Backoff>,
}

impl ReactiveController {
    pub fn new(world: World) -> Self {
        Self::with_finder(world, AStarPathFinder)
    }
}

impl<F: PathFinder> ReactiveController<F> {
    pub fn with_finder(world: World, finder: F) -> Self {
        Self { world, finder, retry: FxHashMap::default() }
    }

    #[inline]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Commands (reset, placement, targets, terrain edits) go through here.
    #[inline]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Replan every robot now, ignoring any retry cooldown.
    pub fn find_paths(&mut self) {
        let now = self.world.tick;
        let ids: Vec<RobotId> = self.world.robots.ids().collect();
        for id in ids {
            self.retry.remove(&id);
            self.repair(id, now);
        }
    }

    /// The first other robot standing on, or heading for, `id`'s nearest
    /// target.
    pub fn collision_detected(&self, id: RobotId) -> Option<RobotId> {
        let robots = &self.world.robots;
        let intent = robots.get(id)?.nearest_target();
        robots
            .iter()
            .filter(|other| other.id() != id)
            .find(|other| other.position() == intent || other.nearest_target() == intent)
            .map(Robot::id)
    }

    /// Advance the simulation by one tick.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) {
        let now = self.world.tick;
        observer.on_step_start(now);
        self.prune_retry();

        for i in 0..self.world.robots.len() {
            let robot = self.world.robots.at_mut(i);
            let id = robot.id();
            let event = robot.advance();
            observer.on_robot_event(now, id, event);

            let wants_target = match event {
                StepEvent::Reached { .. } => true,
                _ => robot.target().is_none(),
            };
            if self.world.params.auto_target && wants_target {
                self.world.retarget_at(i);
            }

            let conflict = self.collision_detected(id);
            let robot = self.world.robots.at(i);
            if conflict.is_some() || (!robot.has_next_move() && !robot.has_reached_target()) {
                if let Some(other) = conflict {
                    debug!(robot = %id, with = %other, "conflict ahead");
                }
                match self.repair(id, now) {
                    Repair::Found => observer.on_replan(now, id, true),
                    Repair::NotFound => observer.on_replan(now, id, false),
                    Repair::NoTarget | Repair::CoolingDown => {}
                }
            }
        }

        observer.on_step_end(now, &self.world.grid, &self.world.robots);
        self.world.tick.advance();
    }

    /// Run `n` ticks.
    pub fn run_steps<O: SimObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            self.step(observer);
        }
    }

    // ── Local repair ──────────────────────────────────────────────────────

    fn repair(&mut self, id: RobotId, now: Tick) -> Repair {
        debug!(robot = %id, "planning path");
        let Some(robot) = self.world.robots.get_mut(id) else {
            return Repair::NoTarget;
        };
        robot.reset_moves();
        let start = robot.position();
        let target = match robot.target() {
            Some(t) if t != start => t,
            _ => return Repair::NoTarget,
        };

        if let Some(b) = self.retry.get(&id) {
            if b.target == target && b.cooling_until.is_some_and(|until| now < until) {
                return Repair::CoolingDown;
            }
        }

        // Everyone else's cell and next intended cell count as walls.
        let mut snapshot = self.world.grid.clone();
        for other in self.world.robots.iter().filter(|r| r.id() != id) {
            snapshot.set_blocked(other.position(), true);
            snapshot.set_blocked(other.nearest_target(), true);
        }

        match self.finder.find_path(&snapshot, start, target) {
            Some(path) => {
                if let Some(robot) = self.world.robots.get_mut(id) {
                    robot.follow(&path);
                }
                self.retry.remove(&id);
                Repair::Found
            }
            None => {
                self.record_failure(id, target, now);
                Repair::NotFound
            }
        }
    }

    fn record_failure(&mut self, id: RobotId, target: Position, now: Tick) {
        let policy = self.world.params.retry;
        let Some(max) = policy.max_failures else {
            debug!(robot = %id, %target, "no path, retrying next tick");
            return;
        };

        let b =
            self.retry.entry(id).or_insert(Backoff { target, failures: 0, cooling_until: None });
        if b.target != target || b.cooling_until.is_some() {
            *b = Backoff { target, failures: 0, cooling_until: None };
        }
        b.failures += 1;
        if b.failures >= max {
            let until = now + policy.cooldown_ticks + 1;
            b.cooling_until = Some(until);
            debug!(robot = %id, %target, failures = b.failures, %until, "no path, backing off");
        } else {
            debug!(robot = %id, %target, failures = b.failures, "no path, retrying next tick");
        }
    }

    /// Forget retry state for robots that are gone or have a new target.
    fn prune_retry(&mut self) {
        let robots = &self.world.robots;
        self.retry.retain(|id, b| robots.get(*id).is_some_and(|r| r.target() == Some(b.target)));
    }
}
