//! Key-value persistence for profile progress and game settings.

#![forbid(unsafe_code)]

pub mod file_store;
pub mod profile_store;
pub mod repository;

pub use file_store::JsonFileStore;
pub use profile_store::ProfileStore;
pub use repository::{InMemoryStore, KeyValueStore, StorageError};
