use thiserror::Error;

use crate::generator::GenerateError;
use crate::model::{CatalogError, RosterError, SettingsError};

/// Any error raised by the core crate.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Generate(#[from] GenerateError),
    #[error(transparent)]
    Roster(#[from] RosterError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}
