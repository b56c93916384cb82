//! `rp-spatial`: grid paths and single-robot search.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                    |
//! |------------|-------------------------------------------------------------|
//! | [`path`]   | `Path`, `PathStep`: time-stamped position sequences         |
//! | [`router`] | `PathFinder` trait, `AStarPathFinder`                       |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod path;
pub mod router;


pub use path::{Path, PathStep};
pub use router::{AStarPathFinder, PathFinder};
