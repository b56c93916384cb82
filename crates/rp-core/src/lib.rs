//! `rp-core`: foundational types for the `robopath` multi-robot planners.
//!
//! This crate is a dependency of every other `rp-*` crate.  It has no `rp-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `RobotId`                                             |
//! | [`position`]    | `Position`, Manhattan distance                        |
//! | [`grid`]        | `Grid`: 2-D blocked/free occupancy map                |
//! | [`time`]        | `Tick`                                                |
//! | [`rng`]         | `SimRng` (controller-owned, seedable)                 |
//! | [`config`]      | `SimParams`, `RetryPolicy`                            |
//! | [`error`]       | `RpError`, `RpResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod config;
pub mod error;
pub mod grid;
pub mod ids;
pub mod position;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{RetryPolicy, SimParams};
pub use error::{RpError, RpResult};
pub use grid::Grid;
pub use ids::RobotId;
pub use position::Position;
pub use rng::SimRng;
pub use time::Tick;
