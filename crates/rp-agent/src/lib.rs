//! `rp-agent`: mobile robots and their storage.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                     |
//! |-----------|--------------------------------------------------------------|
//! | [`robot`] | `Robot` (position, target, move queue), `StepEvent`          |
//! | [`store`] | `RobotStore`: ordered collection with monotonic ids          |
//!
//! # Per-tick transition
//!
//! ```text
//! event = robot.advance()
//!   queue non-empty  → pop front, move there
//!   on target (new)  → StepEvent::Reached
//!   moved otherwise  → StepEvent::Moved
//!   else             → StepEvent::Idle
//! ```
//!
//! The controller interprets the event (e.g. re-targeting on `Reached`); the
//! robot itself holds no callbacks.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `Robot` and `StepEvent`.|

pub mod robot;
pub mod store;


pub use robot::{Robot, StepEvent};
pub use store::RobotStore;
