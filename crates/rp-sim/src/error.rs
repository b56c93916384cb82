use rp_core::{Position, RobotId, RpError};
use thiserror::Error;

/// Rejected controller commands.
///
/// Planning failures are not errors: a robot without a path stays put and
/// tries again later.  These variants only cover commands carrying
/// coordinates or ids from outside (UI clicks, config files).
#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Core(#[from] RpError),

    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("cell {pos} is outside the {width}x{height} map")]
    OutOfBounds { pos: Position, width: u32, height: u32 },

    #[error("cell {0} is blocked terrain")]
    CellBlocked(Position),

    #[error("cell {pos} is already occupied by {robot}")]
    CellOccupied { pos: Position, robot: RobotId },

    #[error("no robot with id {0}")]
    RobotNotFound(RobotId),
}

pub type SimResult<T> = Result<T, SimError>;
