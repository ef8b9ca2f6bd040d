use chrono::{DateTime, Utc};
use std::time::Duration;

use zhuyin_core::model::RoundToken;

/// A pending "advance to the next round", tagged with the round it was issued for.
///
/// The controller only acts on it while `token` still names the current round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledAdvance {
    token: RoundToken,
    delay: Duration,
    due_at: DateTime<Utc>,
}

impl ScheduledAdvance {
    #[must_use]
    pub fn new(token: RoundToken, delay: Duration, due_at: DateTime<Utc>) -> Self {
        Self {
            token,
            delay,
            due_at,
        }
    }

    #[must_use]
    pub fn token(&self) -> RoundToken {
        self.token
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    #[must_use]
    pub fn due_at(&self) -> DateTime<Utc> {
        self.due_at
    }

    #[must_use]
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        now >= self.due_at
    }
}
