//! A single mobile robot and its per-tick transition.

use std::collections::VecDeque;

use rp_core::{Position, RobotId};
use rp_spatial::Path;

// ── StepEvent ─────────────────────────────────────────────────────────────────

/// Outcome of one [`Robot::advance`] call, interpreted by the controller.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepEvent {
    /// Took one queued move without arriving at the target.
    Moved { from: Position, to: Position },
    /// Stands on its target for the first time since the target was set,
    /// whether it moved this tick or not.
    Reached { at: Position },
    /// Nothing changed.
    Idle,
}

// ── Robot ─────────────────────────────────────────────────────────────────────

/// Identity, position, target and committed move queue of one robot.
///
/// The id doubles as planning priority.  Position is only changed by the
/// controller, through [`advance`](Self::advance) or an explicit
/// [`set_position`](Self::set_position).
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Robot {
    id:       RobotId,
    position: Position,
    target:   Option<Position>,
    moves:    VecDeque<Position>,
    reached:  bool,
}

impl Robot {
    pub fn new(id: RobotId, position: Position) -> Self {
        Self { id, position, target: None, moves: VecDeque::new(), reached: false }
    }

    #[inline]
    pub fn id(&self) -> RobotId {
        self.id
    }

    /// Lower values plan first.
    #[inline]
    pub fn priority(&self) -> u32 {
        self.id.priority()
    }

    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    #[inline]
    pub fn target(&self) -> Option<Position> {
        self.target
    }

    /// Assign or clear the target.  Clears the reached flag.
    pub fn set_target(&mut self, target: Option<Position>) {
        self.target = target;
        self.reached = false;
    }

    /// `true` once [`advance`](Self::advance) has reported the robot on its
    /// current target, for as long as it stays there.
    #[inline]
    pub fn has_reached_target(&self) -> bool {
        self.reached && self.target == Some(self.position)
    }

    // ── Move queue ────────────────────────────────────────────────────────

    #[inline]
    pub fn has_next_move(&self) -> bool {
        !self.moves.is_empty()
    }

    pub fn poll_next_move(&mut self) -> Option<Position> {
        self.moves.pop_front()
    }

    pub fn enqueue_move(&mut self, pos: Position) {
        self.moves.push_back(pos);
    }

    pub fn reset_moves(&mut self) {
        self.moves.clear();
    }

    /// Replace the queue with every step of `path` after its start.
    pub fn follow(&mut self, path: &Path) {
        self.moves.clear();
        self.moves.extend(path.moves());
    }

    /// Pending moves, front first.
    pub fn moves(&self) -> impl ExactSizeIterator<Item = Position> + '_ {
        self.moves.iter().copied()
    }

    /// The cell the robot intends to occupy next: head of the queue, else the
    /// target, else where it stands.
    pub fn nearest_target(&self) -> Position {
        self.moves.front().copied().or(self.target).unwrap_or(self.position)
    }

    // ── Transition ────────────────────────────────────────────────────────

    /// Take the next queued move, if any, and report what happened.
    ///
    /// Moves are unconditional; conflict checks happen on intent, before a
    /// move is queued.
    pub fn advance(&mut self) -> StepEvent {
        let from = self.position;
        let moved = match self.moves.pop_front() {
            Some(to) => {
                self.position = to;
                true
            }
            None => false,
        };

        let on_target = self.target == Some(self.position);
        if on_target && !self.reached {
            self.reached = true;
            return StepEvent::Reached { at: self.position };
        }
        // Pushed off the target; arriving again counts as a new arrival.
        self.reached &= on_target;
        if moved {
            StepEvent::Moved { from, to: self.position }
        } else {
            StepEvent::Idle
        }
    }
}
