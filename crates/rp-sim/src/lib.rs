//! `rp-sim`: simulation controllers for the robopath planners.
//!
//! Two interchangeable strategies drive the same [`World`] (terrain, robots,
//! RNG, clock):
//!
//! | Controller                | Strategy                                         |
//! |---------------------------|--------------------------------------------------|
//! | [`ReactiveController`]    | Per-robot A* with local repair on conflict       |
//! | [`CooperativeController`] | Windowed rounds against a space-time reservation |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use rp_core::SimParams;
//! use rp_sim::{NoopObserver, ReactiveController, World};
//!
//! let mut sim = ReactiveController::new(World::new(SimParams::default())?);
//! sim.world_mut().place_robots();
//! sim.world_mut().random_targets();
//! sim.run_steps(100, &mut NoopObserver);
//! ```
//!
//! Both controllers are single-threaded and every command takes `&mut self`;
//! a driver sharing one between a timer and user input must serialise access.

pub mod builder;
pub mod cooperative;
pub mod error;
pub mod observer;
pub mod reactive;
pub mod terrain;
pub mod world;


pub use builder::WorldBuilder;
pub use cooperative::CooperativeController;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use reactive::ReactiveController;
pub use terrain::{OpenTerrain, TerrainGenerator};
pub use world::{CellClick, World};
