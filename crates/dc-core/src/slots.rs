//! Per-atom attachment bookkeeping.
//!
//! Each atom owns a small state machine: the set of compass directions
//! already consumed (one capacity unit each) and a cursor naming the next
//! slot for automatic attachment. The cursor walks [`AUTO_ORDER`]; once
//! every slot there is consumed it parks in [`Cursor::Max`] and automatic
//! attachment is refused. The remaining directions stay available to
//! explicit, manually chosen attachments.

use crate::direction::Direction;
use smallvec::SmallVec;

/// Order in which automatic attachment fills the compass.
pub const AUTO_ORDER: [Direction; 6] = [
    Direction::N,
    Direction::SE1,
    Direction::SW2,
    Direction::S,
    Direction::NW1,
    Direction::NE2,
];

/// Upper bound on consumed units: one per compass direction.
pub const CAPACITY: usize = 12;

/// Next automatic attachment slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Next(Direction),
    /// Every automatic slot is taken.
    Max,
}

impl Cursor {
    pub fn direction(self) -> Option<Direction> {
        match self {
            Cursor::Next(d) => Some(d),
            Cursor::Max => None,
        }
    }

    pub fn is_max(self) -> bool {
        matches!(self, Cursor::Max)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slots {
    used: SmallVec<[Direction; 4]>,
    cursor: Cursor,
}

impl Default for Slots {
    fn default() -> Self {
        Self::new()
    }
}

impl Slots {
    pub fn new() -> Self {
        Self {
            used: SmallVec::new(),
            cursor: Cursor::Next(AUTO_ORDER[0]),
        }
    }

    /// Consume the unit for `direction`. Returns false when it was already
    /// consumed (the counter is left unchanged).
    ///
    /// The cursor is not moved; call [`Slots::calculate_next`] afterwards.
    pub fn attach(&mut self, direction: Direction) -> bool {
        if self.is_used(direction) || self.used.len() >= CAPACITY {
            return false;
        }
        self.used.push(direction);
        true
    }

    /// Advance the cursor to the first unconsumed slot in [`AUTO_ORDER`].
    pub fn calculate_next(&mut self) -> Cursor {
        self.cursor = AUTO_ORDER
            .iter()
            .copied()
            .find(|d| !self.is_used(*d))
            .map_or(Cursor::Max, Cursor::Next);
        self.cursor
    }

    pub fn next(&self) -> Cursor {
        self.cursor
    }

    pub fn is_used(&self, direction: Direction) -> bool {
        self.used.contains(&direction)
    }

    /// Number of consumed units.
    pub fn count(&self) -> usize {
        self.used.len()
    }

    /// Consumed directions, in the order they were consumed.
    pub fn used(&self) -> &[Direction] {
        &self.used
    }
}
