//! Ordered robot collection.
//!
//! Robots are kept in insertion order, which is the order the reactive
//! controller steps them in.  Ids come from a monotonic counter so removing a
//! robot never lets a later one reuse its id; [`clear`](RobotStore::clear)
//! restarts the counter at zero.

use rp_core::{Position, RobotId};

use crate::Robot;

#[derive(Clone, Debug, Default)]
pub struct RobotStore {
    robots:  Vec<Robot>,
    next_id: u32,
}

impl RobotStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.robots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.robots.is_empty()
    }

    /// Add a robot at `pos` with the next free id and return that id.
    pub fn create(&mut self, pos: Position) -> RobotId {
        let id = RobotId(self.next_id);
        self.next_id += 1;
        self.robots.push(Robot::new(id, pos));
        id
    }

    /// Remove a robot, preserving the order of the rest.
    pub fn remove(&mut self, id: RobotId) -> Option<Robot> {
        let i = self.slot(id)?;
        Some(self.robots.remove(i))
    }

    /// Drop every robot and restart id allocation at zero.
    pub fn clear(&mut self) {
        self.robots.clear();
        self.next_id = 0;
    }

    pub fn get(&self, id: RobotId) -> Option<&Robot> {
        self.robots.iter().find(|r| r.id() == id)
    }

    pub fn get_mut(&mut self, id: RobotId) -> Option<&mut Robot> {
        self.robots.iter_mut().find(|r| r.id() == id)
    }

    /// Robot at list position `i` (insertion order).
    #[inline]
    pub fn at(&self, i: usize) -> &Robot {
        &self.robots[i]
    }

    #[inline]
    pub fn at_mut(&mut self, i: usize) -> &mut Robot {
        &mut self.robots[i]
    }

    /// The most recently added robot.
    pub fn last_mut(&mut self) -> Option<&mut Robot> {
        self.robots.last_mut()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Robot> + '_ {
        self.robots.iter()
    }

    /// Ids in insertion order.
    pub fn ids(&self) -> impl ExactSizeIterator<Item = RobotId> + '_ {
        self.robots.iter().map(Robot::id)
    }

    /// Ids in ascending priority (planning) order.
    pub fn by_priority(&self) -> Vec<RobotId> {
        let mut ids: Vec<RobotId> = self.ids().collect();
        ids.sort_unstable_by_key(|id| id.priority());
        ids
    }

    /// The robot standing on `pos`, if any.
    pub fn occupied_by(&self, pos: Position) -> Option<RobotId> {
        self.robots.iter().find(|r| r.position() == pos).map(Robot::id)
    }

    /// Every assigned target, in insertion order.
    pub fn targets(&self) -> impl Iterator<Item = Position> + '_ {
        self.robots.iter().filter_map(Robot::target)
    }

    /// Clear every robot's target.
    pub fn clear_targets(&mut self) {
        for robot in &mut self.robots {
            robot.set_target(None);
        }
    }

    fn slot(&self, id: RobotId) -> Option<usize> {
        self.robots.iter().position(|r| r.id() == id)
    }
}
