use std::collections::VecDeque;

use crate::model::ledger::MistakeKind;
use crate::model::round::Mode;
use crate::model::symbol::{Sequence, Symbol};

/// Which ledger section a practice session draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PracticeKind {
    /// Replays missed recognition targets; runs in Recognition mode.
    Recognition,
    /// Targets the most misclicked symbol; runs in SearchAll mode.
    Misclick,
    /// Replays the most failed sequence; runs in Sequential mode.
    SequenceFail,
}

impl PracticeKind {
    #[must_use]
    pub fn mode(self) -> Mode {
        match self {
            Self::Recognition => Mode::Recognition,
            Self::Misclick => Mode::SearchAll,
            Self::SequenceFail => Mode::Sequential,
        }
    }

    #[must_use]
    pub fn mistake_kind(self) -> MistakeKind {
        match self {
            Self::Recognition => MistakeKind::RecognitionMiss,
            Self::Misclick => MistakeKind::Misclick,
            Self::SequenceFail => MistakeKind::SequenceFail,
        }
    }
}

/// A temporary override of round generation driven by the mistake ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PracticeSession {
    /// Each round pops the next target; the session ends when the queue is empty.
    Recognition { queue: VecDeque<Symbol> },
    /// Every round targets `target` until stopped.
    SearchAll { target: Symbol },
    /// Every round uses `sequence` until stopped.
    Sequential { sequence: Sequence },
}

impl PracticeSession {
    #[must_use]
    pub fn kind(&self) -> PracticeKind {
        match self {
            Self::Recognition { .. } => PracticeKind::Recognition,
            Self::SearchAll { .. } => PracticeKind::Misclick,
            Self::Sequential { .. } => PracticeKind::SequenceFail,
        }
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.kind().mode()
    }

    /// True when the session has nothing left to drive.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        match self {
            Self::Recognition { queue } => queue.is_empty(),
            Self::SearchAll { .. } | Self::Sequential { .. } => false,
        }
    }

    /// Targets still queued, for queue-driven sessions.
    #[must_use]
    pub fn remaining(&self) -> Option<usize> {
        match self {
            Self::Recognition { queue } => Some(queue.len()),
            Self::SearchAll { .. } | Self::Sequential { .. } => None,
        }
    }

    /// Target override for the next round. Pops from the recognition queue.
    pub fn next_target(&mut self) -> Option<Symbol> {
        match self {
            Self::Recognition { queue } => queue.pop_front(),
            Self::SearchAll { target } => Some(target.clone()),
            Self::Sequential { .. } => None,
        }
    }

    /// Sequence override for the next round.
    #[must_use]
    pub fn sequence(&self) -> Option<&Sequence> {
        match self {
            Self::Sequential { sequence } => Some(sequence),
            Self::Recognition { .. } | Self::SearchAll { .. } => None,
        }
    }
}
