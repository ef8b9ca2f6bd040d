//! Pure evaluation of user picks against the current round.
//!
//! Each mode exposes a `submit_pick` that mutates the round and the active
//! profile's snapshot in one synchronous step and reports what happened. None of
//! them own timers or UI state; completion only carries the pacing delay the
//! caller should wait before advancing.

pub mod recognition;
pub mod search_all;
pub mod sequential;

use std::time::Duration;

use crate::model::Symbol;

/// Result of submitting one pick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickOutcome {
    /// No effect: the round is finished, the cell was already resolved, or the
    /// cell does not exist.
    Ignored,
    /// Correct pick, round continues. `next` is the symbol to pronounce next,
    /// if the mode asks for one.
    Hit { next: Option<Symbol> },
    /// Correct pick that finished the round. Advance after `advance_after`.
    Completed { advance_after: Duration },
    /// Wrong pick. The round stays as it was.
    Miss,
}

impl PickOutcome {
    #[must_use]
    pub fn is_correct(&self) -> bool {
        matches!(self, Self::Hit { .. } | Self::Completed { .. })
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}
