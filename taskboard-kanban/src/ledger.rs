//! Position arithmetic for dense orderings.
//!
//! Every container keeps its items at positions `0..n`, each used exactly once.
//! The functions here compute the sibling shifts that keep that true when an
//! item is appended, removed, inserted or moved. They are pure: shifts come back
//! as [`Shift`] values that either the store applies (`update_many`) or
//! [`apply_shift`] applies to an in-memory slice.
//!
//! The shift functions assume the target position was already checked with
//! [`validate_target`]; they never clamp.

use std::cmp::Ordering;
use std::ops::Bound;

use taskboard_store::{PositionRange, Shift};
use thiserror::Error;

/// Ways a position set can be wrong
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("position {position} is used more than once")]
    Duplicate { position: u32 },

    #[error("position {position} is missing")]
    Gap { position: u32 },

    #[error("position {position} is out of range (max {max})")]
    OutOfRange { position: u32, max: u32 },

    #[error("shift moved position {position} below zero")]
    Underflow { position: u32 },
}

/// `max + 1`, or `0` for an empty container.
pub fn next_append_position(positions: impl IntoIterator<Item = u32>) -> u32 {
    positions.into_iter().max().map_or(0, |max| max + 1)
}

/// Close the gap left at `removed`: every position above it moves down one.
pub fn shift_for_removal(removed: u32) -> Shift {
    Shift::decrement(PositionRange::GreaterThan(removed))
}

/// Open a slot at `inserted`: every position at or above it moves up one.
pub fn shift_for_insertion(inserted: u32) -> Shift {
    Shift::increment(PositionRange::AtLeast(inserted))
}

/// Minimal shift for pulling an item out of `from` and reinserting it at `to`
/// in the same container.
///
/// Moving down the list (`to > from`) pulls `(from, to]` up by one; moving up
/// (`to < from`) pushes `[to, from)` down by one. `None` when nothing moves.
/// The moved item itself is never inside the returned range.
pub fn shift_for_intra_container_move(from: u32, to: u32) -> Option<Shift> {
    match to.cmp(&from) {
        Ordering::Greater => Some(Shift::decrement(PositionRange::Between {
            start: Bound::Excluded(from),
            end: Bound::Included(to),
        })),
        Ordering::Less => Some(Shift::increment(PositionRange::between(to..from))),
        Ordering::Equal => None,
    }
}

/// Check a requested target position.
///
/// `len` is the number of items currently in the target container. Within the
/// same container the item already counts, so the last valid slot is `len - 1`;
/// moving in from elsewhere it may also go at the very end, `len`.
pub fn validate_target(position: u32, len: usize, same_container: bool) -> Result<(), LedgerError> {
    let len = u32::try_from(len).unwrap_or(u32::MAX);
    let max = if same_container {
        len.saturating_sub(1)
    } else {
        len
    };
    if position > max {
        return Err(LedgerError::OutOfRange { position, max });
    }
    Ok(())
}

/// Apply `shift` to every position in `positions`.
pub fn apply_shift(positions: &mut [u32], shift: &Shift) -> Result<(), LedgerError> {
    for position in positions.iter_mut() {
        *position = shift
            .apply(*position)
            .ok_or(LedgerError::Underflow { position: *position })?;
    }
    Ok(())
}

/// `Ok` iff `positions` is exactly `{0, .., n-1}`.
pub fn check_density(positions: impl IntoIterator<Item = u32>) -> Result<(), LedgerError> {
    let mut sorted: Vec<u32> = positions.into_iter().collect();
    sorted.sort_unstable();
    for (expected, &position) in (0u32..).zip(sorted.iter()) {
        match position.cmp(&expected) {
            Ordering::Equal => {}
            // sorted and every earlier slot matched, so this repeats expected - 1
            Ordering::Less => return Err(LedgerError::Duplicate { position }),
            Ordering::Greater => return Err(LedgerError::Gap { position: expected }),
        }
    }
    Ok(())
}
