//! warehouse: run both robopath controllers over the same floor.
//!
//! Usage: `warehouse [params.json]`.  The optional file holds a JSON
//! `SimParams`; missing fields take their defaults.  Log verbosity follows
//! `RUST_LOG` (default `info`).

mod terrain;

use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use rp_agent::{RobotStore, StepEvent};
use rp_core::{Grid, RobotId, SimParams, Tick};
use rp_sim::{CooperativeController, ReactiveController, SimObserver, World};

use terrain::ScatterTerrain;

// ── Constants ─────────────────────────────────────────────────────────────────

const SIM_TICKS:     u64 = 200;
const SHELF_DENSITY: f64 = 0.2;

// ── Observer ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct Tally {
    moves:        usize,
    arrivals:     usize,
    replans:      usize,
    failed_plans: usize,
}

impl SimObserver for Tally {
    fn on_robot_event(&mut self, _tick: Tick, _robot: RobotId, event: StepEvent) {
        match event {
            StepEvent::Moved { .. } => self.moves += 1,
            StepEvent::Reached { .. } => self.arrivals += 1,
            StepEvent::Idle => {}
        }
    }

    fn on_replan(&mut self, _tick: Tick, _robot: RobotId, found: bool) {
        self.replans += 1;
        if !found {
            self.failed_plans += 1;
        }
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn load_params() -> Result<SimParams> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(SimParams::default());
    };
    let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {path}"))
}

/// Fresh floor with shelving, robots and targets, identical for a given seed.
fn stock_world(params: &SimParams) -> Result<World> {
    let mut world = World::new(params.clone())?;
    world.generate_terrain(&mut ScatterTerrain { density: SHELF_DENSITY });
    let placed = world.place_robots();
    let targeted = world.random_targets();
    info!(placed, targeted, blocked = world.grid().blocked_count(), "floor stocked");
    Ok(world)
}

/// The floor with robots drawn as `A`, `B`, … (by id, wrapping).
fn render(grid: &Grid, robots: &RobotStore) -> String {
    let mut rows: Vec<Vec<char>> = grid
        .to_string()
        .lines()
        .map(|l| l.chars().collect())
        .collect();
    for robot in robots.iter() {
        let pos = robot.position();
        let mark = (b'A' + (robot.id().0 % 26) as u8) as char;
        rows[pos.y as usize][pos.x as usize] = mark;
    }
    rows.into_iter().map(|r| r.into_iter().collect::<String>() + "\n").collect()
}

fn summary(name: &str, world: &World, tally: &Tally, secs: f64) {
    println!("── {name} ──");
    println!("{}", render(world.grid(), world.robots()));
    println!(
        "{} ticks in {secs:.3} s: {} moves, {} arrivals, {} replans ({} failed)",
        world.tick().0,
        tally.moves,
        tally.arrivals,
        tally.replans,
        tally.failed_plans
    );
    println!("{:<8} {:<10} {:<10} {:<8}", "Robot", "Position", "Target", "Reached");
    println!("{}", "-".repeat(38));
    for robot in world.robots().iter() {
        let target = robot.target().map_or_else(|| "-".to_string(), |t| t.to_string());
        println!(
            "{:<8} {:<10} {:<10} {:<8}",
            robot.id().0,
            robot.position().to_string(),
            target,
            if robot.has_reached_target() { "yes" } else { "no" },
        );
    }
    println!();
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let params = load_params()?;
    params.validate()?;
    println!(
        "Floor {}x{}  |  Robots: {}  |  Horizon: {}  |  Seed: {}",
        params.map_width, params.map_height, params.robot_count, params.horizon, params.seed
    );
    println!();

    let mut reactive = ReactiveController::new(stock_world(&params)?);
    let mut tally = Tally::default();
    let t0 = Instant::now();
    reactive.run_steps(SIM_TICKS, &mut tally);
    summary("reactive", reactive.world(), &tally, t0.elapsed().as_secs_f64());

    let mut cooperative = CooperativeController::new(stock_world(&params)?);
    let mut tally = Tally::default();
    let t0 = Instant::now();
    cooperative.run_steps(SIM_TICKS, &mut tally);
    summary("cooperative", cooperative.world(), &tally, t0.elapsed().as_secs_f64());

    Ok(())
}
