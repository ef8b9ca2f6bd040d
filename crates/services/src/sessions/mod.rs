mod advance;
mod controller;
mod view;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use advance::ScheduledAdvance;
pub use controller::{Pick, PickReport, PracticeStart, SessionController};
pub use view::{CellView, PracticeView, RoundContent, RoundView};
