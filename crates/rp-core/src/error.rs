//! Framework error type.
//!
//! "No path" and "no free cell" are ordinary outcomes and are reported as
//! `Option::None`, never through this type.  `RpError` covers rejected
//! configuration and malformed ASCII maps.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RpError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("map parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for all `rp-*` crates.
pub type RpResult<T> = Result<T, RpError>;
