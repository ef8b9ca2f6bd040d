use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::model::ids::ProfileId;
use crate::model::ledger::Ledger;

/// Names of the built-in roster, in display order.
pub const DEFAULT_ROSTER: [&str; 5] = ["西瓜", "柚子", "小樂", "阿噗", "安安"];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RosterError {
    #[error("roster must name at least one profile")]
    Empty,

    #[error("profile {0:?} appears more than once")]
    Duplicate(String),

    #[error("profile {0:?} is not in the roster")]
    Unknown(String),
}

//
// ─── SNAPSHOT ──────────────────────────────────────────────────────────────────
//

/// Persisted progress of one profile.
///
/// Serializes as `{ "score": .., "wrong": .., "wrongbook": { .. } }`. Missing
/// fields default to zero/empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileSnapshot {
    pub score: u32,
    pub wrong: u32,
    pub wrongbook: Ledger,
}

impl ProfileSnapshot {
    /// Add points for a correct pick.
    pub fn award(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Count a wrong pick and take `points` off the score, never below zero.
    pub fn penalize(&mut self, points: u32) {
        self.wrong = self.wrong.saturating_add(1);
        self.score = self.score.saturating_sub(points);
    }
}

/// A named learner with their own progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    id: ProfileId,
    snapshot: ProfileSnapshot,
}

impl Profile {
    #[must_use]
    pub fn new(id: ProfileId, snapshot: ProfileSnapshot) -> Self {
        Self { id, snapshot }
    }

    #[must_use]
    pub fn id(&self) -> &ProfileId {
        &self.id
    }

    #[must_use]
    pub fn snapshot(&self) -> &ProfileSnapshot {
        &self.snapshot
    }

    pub fn snapshot_mut(&mut self) -> &mut ProfileSnapshot {
        &mut self.snapshot
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.snapshot.score
    }

    #[must_use]
    pub fn wrong_count(&self) -> u32 {
        self.snapshot.wrong
    }

    #[must_use]
    pub fn ledger(&self) -> &Ledger {
        &self.snapshot.wrongbook
    }
}

//
// ─── ROSTER ────────────────────────────────────────────────────────────────────
//

/// Fixed, ordered set of profiles. The first entry is the fallback profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    fallback: ProfileId,
    profiles: Vec<ProfileId>,
}

impl Roster {
    /// # Errors
    ///
    /// Returns `RosterError` if the list is empty or names a profile twice.
    pub fn new<I, S>(names: I) -> Result<Self, RosterError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let profiles: Vec<ProfileId> = names.into_iter().map(ProfileId::new).collect();
        let Some(fallback) = profiles.first().cloned() else {
            return Err(RosterError::Empty);
        };
        let mut seen = HashSet::with_capacity(profiles.len());
        for id in &profiles {
            if !seen.insert(id) {
                return Err(RosterError::Duplicate(id.as_str().to_owned()));
            }
        }
        Ok(Self { fallback, profiles })
    }

    #[must_use]
    pub fn profiles(&self) -> &[ProfileId] {
        &self.profiles
    }

    #[must_use]
    pub fn contains(&self, id: &ProfileId) -> bool {
        self.profiles.contains(id)
    }

    #[must_use]
    pub fn default_profile(&self) -> &ProfileId {
        &self.fallback
    }

    /// Map a stored name to a roster entry, falling back to the default profile.
    #[must_use]
    pub fn resolve(&self, stored: Option<&str>) -> &ProfileId {
        stored
            .and_then(|name| self.profiles.iter().find(|id| id.as_str() == name))
            .unwrap_or_else(|| self.default_profile())
    }

    /// # Errors
    ///
    /// Returns `RosterError::Unknown` if `name` is not on the roster.
    pub fn get(&self, name: &str) -> Result<&ProfileId, RosterError> {
        self.profiles
            .iter()
            .find(|id| id.as_str() == name)
            .ok_or_else(|| RosterError::Unknown(name.to_owned()))
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self {
            fallback: ProfileId::new(DEFAULT_ROSTER[0]),
            profiles: DEFAULT_ROSTER.iter().copied().map(ProfileId::new).collect(),
        }
    }
}
