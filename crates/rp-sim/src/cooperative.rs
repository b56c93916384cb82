//! Windowed cooperative controller.
//!
//! Robots follow paths planned jointly in rounds.  Each round builds a fresh
//! reservation table from the terrain and plans every robot in ascending
//! priority order, so lower-priority robots route around the claims of
//! higher-priority ones.  A new round starts once `replan_interval` ticks
//! have passed, or earlier when some robot with an unreached target has run
//! out of moves (e.g. because it was just given a new target).

use rp_agent::StepEvent;
use rp_coop::{PlanOutcome, PlanRequest, WindowedPlanner};
use tracing::debug;

use crate::{SimObserver, World};

/// Steps a [`World`] along jointly planned windowed paths.
pub struct CooperativeController {
    world:            World,
    /// Ticks stepped since the last round; `None` before the first one.
    since_round:      Option<u32>,
    reached_in_round: usize,
}

impl CooperativeController {
    pub fn new(world: World) -> Self {
        Self { world, since_round: None, reached_in_round: 0 }
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

    /// Targeted robots whose last round path ends resting on their target.
    #[inline]
    pub fn reached_in_round(&self) -> usize {
        self.reached_in_round
    }

    /// Plan one round now and load every robot's move queue.  Returns how
    /// many robots reach their target inside the window.
    pub fn plan_round(&mut self) -> usize {
        self.run_round();
        self.reached_in_round
    }

    /// Advance the simulation by one tick.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) {
        let now = self.world.tick;
        observer.on_step_start(now);

        if self.round_due() {
            for outcome in self.run_round() {
                observer.on_replan(now, outcome.id, outcome.reached());
            }
        }

        let auto_target = self.world.params.auto_target;
        for i in 0..self.world.robots.len() {
            let robot = self.world.robots.at_mut(i);
            let id = robot.id();
            let event = robot.advance();
            let wants_target = match event {
                StepEvent::Reached { .. } => true,
                _ => robot.target().is_none(),
            };
            observer.on_robot_event(now, id, event);
            if auto_target && wants_target {
                self.world.retarget_at(i);
            }
        }
        self.since_round = self.since_round.map(|n| n + 1);

        observer.on_step_end(now, &self.world.grid, &self.world.robots);
        self.world.tick.advance();
    }

    /// Run `n` ticks.
    pub fn run_steps<O: SimObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            self.step(observer);
        }
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn round_due(&self) -> bool {
        let Some(since) = self.since_round else {
            return true;
        };
        if since >= self.world.params.effective_replan_interval() {
            return true;
        }
        self.world
            .robots
            .iter()
            .any(|r| r.target().is_some() && !r.has_next_move() && !r.has_reached_target())
    }

    fn run_round(&mut self) -> Vec<PlanOutcome> {
        let world = &mut self.world;
        let requests: Vec<PlanRequest> = world
            .robots
            .by_priority()
            .into_iter()
            .filter_map(|id| world.robots.get(id))
            .map(|r| PlanRequest {
                id:     r.id(),
                start:  r.position(),
                // Target-less robots hold their cell.
                target: r.target().unwrap_or(r.position()),
            })
            .collect();

        let outcomes =
            WindowedPlanner::new(&world.grid, world.params.horizon).plan_round(&requests);

        let mut reached = 0;
        for outcome in &outcomes {
            let Some(robot) = world.robots.get_mut(outcome.id) else {
                continue;
            };
            if outcome.reached() && robot.target().is_some() {
                reached += 1;
            }
            match outcome.path() {
                Some(path) => robot.follow(path),
                None => {
                    debug!(robot = %outcome.id, "start claimed by an earlier robot, holding");
                    robot.reset_moves();
                }
            }
        }

        self.reached_in_round = reached;
        self.since_round = Some(0);
        debug!(
            tick = %world.tick,
            robots = outcomes.len(),
            reached = self.reached_in_round,
            "cooperative round planned"
        );
        outcomes
    }
}
