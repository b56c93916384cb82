//! Robot identity.
//!
//! A robot's id doubles as its planning priority: lower values are planned
//! first in a cooperative round.  Ids are handed out by the robot store in
//! creation order and never reused until the store is cleared.

use std::fmt;

/// Identity and planning priority of a robot.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RobotId(pub u32);

impl RobotId {
    /// The planning priority carried by this id.
    #[inline(always)]
    pub fn priority(self) -> u32 {
        self.0
    }
}

impl fmt::Display for RobotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}", self.0)
    }
}
