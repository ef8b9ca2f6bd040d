//! Quiz engine core for phonetic-symbol recognition: catalog, round
//! generation, per-mode pick evaluation, the mistake ledger and practice
//! selection. Nothing here performs I/O.

#![forbid(unsafe_code)]

pub mod engine;
pub mod error;
pub mod generator;
pub mod model;
pub mod practice;
pub mod time;

pub use error::Error;
pub use generator::{GenerateError, RoundGenerator};
pub use practice::PracticeSelector;
pub use time::Clock;
