//! Position filters and shifts used by `update_many` and `find_many`

use std::ops::{Bound, RangeBounds};

/// Which positions inside one container a read or shift applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionRange {
    /// Every position
    All,
    /// `position > x`
    GreaterThan(u32),
    /// `position >= x`
    AtLeast(u32),
    /// Positions between two bounds, each inclusive, exclusive or open
    Between { start: Bound<u32>, end: Bound<u32> },
}

impl PositionRange {
    /// Build a `Between` range from any Rust range, e.g. `3..=7` or `2..5`.
    pub fn between(range: impl RangeBounds<u32>) -> Self {
        Self::Between {
            start: range.start_bound().cloned(),
            end: range.end_bound().cloned(),
        }
    }

    /// Does `position` fall inside this range?
    pub fn contains(&self, position: u32) -> bool {
        match *self {
            Self::All => true,
            Self::GreaterThan(x) => position > x,
            Self::AtLeast(x) => position >= x,
            Self::Between { start, end } => (start, end).contains(&position),
        }
    }
}

/// Signed adjustment applied to every position a [`Shift`] matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delta {
    Increment(u32),
    Decrement(u32),
}

impl Delta {
    /// Apply to a position. `None` on underflow or overflow.
    pub fn apply(self, position: u32) -> Option<u32> {
        match self {
            Self::Increment(by) => position.checked_add(by),
            Self::Decrement(by) => position.checked_sub(by),
        }
    }
}

/// A batched position update: every record whose position is in `range`
/// moves by `delta`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shift {
    pub range: PositionRange,
    pub delta: Delta,
}

impl Shift {
    /// Increment every position in `range` by one
    pub fn increment(range: PositionRange) -> Self {
        Self {
            range,
            delta: Delta::Increment(1),
        }
    }

    /// Decrement every position in `range` by one
    pub fn decrement(range: PositionRange) -> Self {
        Self {
            range,
            delta: Delta::Decrement(1),
        }
    }

    /// Apply to a single position, leaving positions outside the range alone.
    /// `None` only when a matched position would leave the `u32` domain.
    pub fn apply(&self, position: u32) -> Option<u32> {
        if self.range.contains(position) {
            self.delta.apply(position)
        } else {
            Some(position)
        }
    }
}
