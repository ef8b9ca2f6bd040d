//! Shared error types for the services crate.

use thiserror::Error;

use zhuyin_core::GenerateError;
use zhuyin_core::model::{RosterError, SettingsError};

/// Errors emitted by the session controller.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    /// The catalog cannot build a round for the current mode.
    #[error(transparent)]
    Config(#[from] GenerateError),
    #[error(transparent)]
    Roster(#[from] RosterError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}
