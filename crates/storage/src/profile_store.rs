use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use zhuyin_core::model::{GameSettings, ProfileId, ProfileSnapshot, Roster};

use crate::repository::{InMemoryStore, KeyValueStore};

/// Prefix shared by every key the game writes.
pub const STORAGE_PREFIX: &str = "zhuyin_game_v1";

#[must_use]
pub fn profile_key(id: &ProfileId) -> String {
    format!("{STORAGE_PREFIX}:player:{id}")
}

#[must_use]
pub fn active_profile_key() -> String {
    format!("{STORAGE_PREFIX}:active_player")
}

#[must_use]
pub fn settings_key() -> String {
    format!("{STORAGE_PREFIX}:settings")
}

/// Per-profile snapshots, the active-profile pointer and game settings on top
/// of a [`KeyValueStore`].
///
/// Reads never fail: missing or corrupt payloads come back as defaults. The
/// first failed write switches the store to memory-only for the rest of its
/// lifetime, so play continues with the latest values.
pub struct ProfileStore {
    backend: Arc<dyn KeyValueStore>,
    fallback: InMemoryStore,
    degraded: bool,
    roster: Roster,
}

impl ProfileStore {
    #[must_use]
    pub fn new(backend: Arc<dyn KeyValueStore>, roster: Roster) -> Self {
        Self {
            backend,
            fallback: InMemoryStore::new(),
            degraded: false,
            roster,
        }
    }

    /// A store that keeps everything in memory.
    #[must_use]
    pub fn in_memory(roster: Roster) -> Self {
        Self::new(Arc::new(InMemoryStore::new()), roster)
    }

    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// True once a write has failed and the store went memory-only.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Load a profile's snapshot, zeroed on first use or corrupt payload.
    #[must_use]
    pub fn get(&self, id: &ProfileId) -> ProfileSnapshot {
        self.read_json(&profile_key(id)).unwrap_or_default()
    }

    /// Persist a profile's snapshot.
    pub fn put(&mut self, id: &ProfileId, snapshot: &ProfileSnapshot) {
        self.write_json(&profile_key(id), snapshot);
    }

    /// The stored active profile, or the roster default if unset or unknown.
    #[must_use]
    pub fn active_profile(&self) -> ProfileId {
        let stored = self.read_raw(&active_profile_key());
        self.roster.resolve(stored.as_deref()).clone()
    }

    pub fn set_active_profile(&mut self, id: &ProfileId) {
        self.write_raw(&active_profile_key(), id.as_str());
    }

    /// Stored settings, defaults if missing, corrupt or out of range.
    #[must_use]
    pub fn settings(&self) -> GameSettings {
        self.read_json::<GameSettings>(&settings_key())
            .and_then(|settings| match settings.validated() {
                Ok(settings) => Some(settings),
                Err(err) => {
                    warn!(error = %err, "stored settings out of range, using defaults");
                    None
                }
            })
            .unwrap_or_default()
    }

    pub fn put_settings(&mut self, settings: &GameSettings) {
        self.write_json(&settings_key(), settings);
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.read_raw(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(key, error = %err, "discarding corrupt stored payload");
                None
            }
        }
    }

    fn write_json<T: Serialize>(&mut self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(raw) => self.write_raw(key, &raw),
            Err(err) => warn!(key, error = %err, "could not serialize payload"),
        }
    }

    fn read_raw(&self, key: &str) -> Option<String> {
        if self.degraded {
            if let Ok(Some(value)) = self.fallback.get(key) {
                return Some(value);
            }
        }
        match self.backend.get(key) {
            Ok(value) => value,
            Err(err) => {
                warn!(key, error = %err, "storage read failed");
                None
            }
        }
    }

    fn write_raw(&mut self, key: &str, value: &str) {
        if !self.degraded {
            match self.backend.put(key, value) {
                Ok(()) => {
                    debug!(key, "persisted");
                    return;
                }
                Err(err) => {
                    warn!(key, error = %err, "storage write failed, continuing in memory only");
                    self.degraded = true;
                }
            }
        }
        if let Err(err) = self.fallback.put(key, value) {
            warn!(key, error = %err, "in-memory write failed");
        }
    }
}
