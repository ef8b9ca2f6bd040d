use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use thiserror::Error;

/// Accepted speech rates, as a multiple of normal speed.
pub const SPEECH_RATE_RANGE: RangeInclusive<f32> = 0.5..=2.0;

const DEFAULT_SPEECH_RATE: f32 = 0.9;

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("speech rate must be within 0.5..=2.0, got {provided}")]
    InvalidSpeechRate { provided: f32 },
}

/// Device-wide game settings, shared by all profiles.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSettings {
    sound_on: bool,
    tts_on: bool,
    speech_rate: f32,
}

impl GameSettings {
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidSpeechRate` for a rate outside
    /// [`SPEECH_RATE_RANGE`] or a non-finite rate.
    pub fn new(sound_on: bool, tts_on: bool, speech_rate: f32) -> Result<Self, SettingsError> {
        validate_rate(speech_rate)?;
        Ok(Self {
            sound_on,
            tts_on,
            speech_rate,
        })
    }

    /// Re-validate settings read back from storage.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if the stored values are out of range.
    pub fn validated(self) -> Result<Self, SettingsError> {
        Self::new(self.sound_on, self.tts_on, self.speech_rate)
    }

    #[must_use]
    pub fn sound_on(&self) -> bool {
        self.sound_on
    }

    #[must_use]
    pub fn tts_on(&self) -> bool {
        self.tts_on
    }

    #[must_use]
    pub fn speech_rate(&self) -> f32 {
        self.speech_rate
    }

    pub fn set_sound_on(&mut self, on: bool) {
        self.sound_on = on;
    }

    pub fn set_tts_on(&mut self, on: bool) {
        self.tts_on = on;
    }

    /// # Errors
    ///
    /// Returns `SettingsError::InvalidSpeechRate` and leaves the rate unchanged
    /// if `rate` is out of range.
    pub fn set_speech_rate(&mut self, rate: f32) -> Result<(), SettingsError> {
        validate_rate(rate)?;
        self.speech_rate = rate;
        Ok(())
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            sound_on: true,
            tts_on: true,
            speech_rate: DEFAULT_SPEECH_RATE,
        }
    }
}

fn validate_rate(rate: f32) -> Result<(), SettingsError> {
    if rate.is_finite() && SPEECH_RATE_RANGE.contains(&rate) {
        Ok(())
    } else {
        Err(SettingsError::InvalidSpeechRate { provided: rate })
    }
}
