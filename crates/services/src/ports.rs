//! Narrow interfaces to the host: drawing, speech and sound.

use zhuyin_core::model::{PracticeKind, Symbol};

use crate::sessions::RoundView;

/// Short feedback sound after a scoring pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Good,
    Bad,
}

/// Non-round messages a host should surface to the learner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// A practice session was requested but its ledger section is empty.
    NothingToPractice(PracticeKind),
    /// A recognition practice queue ran out and normal rounds resumed.
    PracticeFinished(PracticeKind),
}

/// Receives a full snapshot of the current round whenever it changes.
pub trait Presenter {
    fn present(&mut self, view: &RoundView);

    fn notice(&mut self, _notice: Notice) {}
}

/// Fire-and-forget audio. The engine never waits on either call.
pub trait AudioSink {
    fn speak(&mut self, symbol: &Symbol, rate: f32);

    fn chime(&mut self, _cue: Cue) {}
}

/// Presenter that draws nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct Headless;

impl Presenter for Headless {
    fn present(&mut self, _view: &RoundView) {}
}

/// Audio sink that stays quiet.
#[derive(Debug, Default, Clone, Copy)]
pub struct Muted;

impl AudioSink for Muted {
    fn speak(&mut self, _symbol: &Symbol, _rate: f32) {}
}
