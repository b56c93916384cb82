//! `rp-coop`: windowed cooperative planning.
//!
//! Robots are planned one after another against a shared space-time
//! [`ReservationTable`]; each robot's claimed cells constrain every robot
//! planned after it in the same round.
//!
//! # Crate layout
//!
//! | Module          | Contents                                               |
//! |-----------------|--------------------------------------------------------|
//! | [`reservation`] | `ReservationTable`: `(x, y, t)` claims over a window   |
//! | [`planner`]     | `WindowedPlanner`, `PlanRequest`, `WindowPath`         |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use rp_coop::{PlanRequest, WindowedPlanner};
//!
//! let mut planner = WindowedPlanner::new(&grid, 8);
//! for outcome in planner.plan_round(&requests) {
//!     println!("{}: {:?}", outcome.id, outcome.path());
//! }
//! ```

pub mod planner;
pub mod reservation;

#[cfg(test)]
mod tests;

pub use planner::{PlanOutcome, PlanRequest, WindowPath, WindowedPlanner};
pub use reservation::ReservationTable;
