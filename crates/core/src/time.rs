use chrono::{DateTime, TimeDelta, Utc};
use std::time::Duration;

/// Source of "now" for scheduling delayed round advances.
///
/// Hosts use `Clock::System`; tests pin time with `Clock::Fixed` and move it
/// forward explicitly.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    /// Returns a clock fixed at the given timestamp.
    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }

    /// The instant `delay` from now.
    #[must_use]
    pub fn after(&self, delay: Duration) -> DateTime<Utc> {
        let delta = TimeDelta::from_std(delay).unwrap_or(TimeDelta::zero());
        self.now() + delta
    }

    /// Move a fixed clock forward. No effect on `Clock::System`.
    pub fn advance(&mut self, delay: Duration) {
        if let Clock::Fixed(t) = self {
            *t += TimeDelta::from_std(delay).unwrap_or(TimeDelta::zero());
        }
    }
}

/// Deterministic timestamp for tests (2023-11-14T22:13:20Z).
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// Returns a `Clock` pinned at [`FIXED_TEST_TIMESTAMP`].
#[must_use]
pub fn fixed_clock() -> Clock {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0).map_or(Clock::System, Clock::fixed)
}
