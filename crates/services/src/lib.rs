//! Session orchestration for the quiz: the controller that owns profile, mode,
//! round and practice state, plus the ports it drives.

#![forbid(unsafe_code)]

pub mod error;
pub mod ports;
pub mod sessions;

pub use zhuyin_core::Clock;

pub use error::SessionError;
pub use ports::{AudioSink, Cue, Headless, Muted, Notice, Presenter};
pub use sessions::{
    CellView, Pick, PickReport, PracticeStart, PracticeView, RoundContent, RoundView,
    ScheduledAdvance, SessionController,
};
