use std::fmt;

use crate::model::ids::CellId;
use crate::model::symbol::{Sequence, Symbol};

//
// ─── MODE ──────────────────────────────────────────────────────────────────────
//

/// The three quiz modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Hear a symbol, pick it from four options.
    Recognition,
    /// Find every copy of one target in the grid.
    SearchAll,
    /// Find the symbols of a sequence in order.
    Sequential,
}

impl Mode {
    /// Maps the 1-based mode number used by the mode buttons.
    #[must_use]
    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Self::Recognition),
            2 => Some(Self::SearchAll),
            3 => Some(Self::Sequential),
            _ => None,
        }
    }

    #[must_use]
    pub fn number(self) -> u8 {
        match self {
            Self::Recognition => 1,
            Self::SearchAll => 2,
            Self::Sequential => 3,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Recognition => "recognition",
            Self::SearchAll => "search-all",
            Self::Sequential => "sequential",
        };
        f.write_str(name)
    }
}

//
// ─── RECOGNITION ───────────────────────────────────────────────────────────────
//

/// Four distinct options, exactly one of them the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionRound {
    pub(crate) target: Symbol,
    pub(crate) options: Vec<Symbol>,
    pub(crate) practice: bool,
    pub(crate) locked: bool,
}

impl RecognitionRound {
    #[must_use]
    pub fn target(&self) -> &Symbol {
        &self.target
    }

    #[must_use]
    pub fn options(&self) -> &[Symbol] {
        &self.options
    }

    /// True if the target came from a recognition practice queue.
    #[must_use]
    pub fn is_practice(&self) -> bool {
        self.practice
    }

    /// True once the target has been picked.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }
}

//
// ─── SEARCH ALL ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCell {
    pub symbol: Symbol,
    pub is_target: bool,
    pub found: bool,
}

/// A fixed-size grid holding `required_count` copies of the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchAllRound {
    pub(crate) target: Symbol,
    pub(crate) required_count: usize,
    pub(crate) found_count: usize,
    pub(crate) cells: Vec<SearchCell>,
    pub(crate) practice: bool,
}

impl SearchAllRound {
    #[must_use]
    pub fn target(&self) -> &Symbol {
        &self.target
    }

    #[must_use]
    pub fn required_count(&self) -> usize {
        self.required_count
    }

    #[must_use]
    pub fn found_count(&self) -> usize {
        self.found_count
    }

    #[must_use]
    pub fn cells(&self) -> &[SearchCell] {
        &self.cells
    }

    #[must_use]
    pub fn cell(&self, id: CellId) -> Option<&SearchCell> {
        self.cells.get(id.index())
    }

    #[must_use]
    pub fn is_practice(&self) -> bool {
        self.practice
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.found_count >= self.required_count
    }
}

//
// ─── SEQUENTIAL ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceCell {
    pub symbol: Symbol,
    pub matched: bool,
}

/// A fixed-size grid in which the sequence must be found in order.
///
/// `cursor` is the number of sequence symbols matched so far; it never
/// decreases within a round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequentialRound {
    pub(crate) sequence: Sequence,
    pub(crate) cells: Vec<SequenceCell>,
    pub(crate) cursor: usize,
    pub(crate) practice: bool,
}

impl SequentialRound {
    #[must_use]
    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    #[must_use]
    pub fn cells(&self) -> &[SequenceCell] {
        &self.cells
    }

    #[must_use]
    pub fn cell(&self, id: CellId) -> Option<&SequenceCell> {
        self.cells.get(id.index())
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The symbol to find next, `None` once the sequence is complete.
    #[must_use]
    pub fn expected(&self) -> Option<&Symbol> {
        self.sequence.get(self.cursor)
    }

    #[must_use]
    pub fn is_practice(&self) -> bool {
        self.practice
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.cursor >= self.sequence.len()
    }
}

//
// ─── ROUND ─────────────────────────────────────────────────────────────────────
//

/// One instance of quiz content for the active mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Round {
    Recognition(RecognitionRound),
    SearchAll(SearchAllRound),
    Sequential(SequentialRound),
}

impl Round {
    #[must_use]
    pub fn mode(&self) -> Mode {
        match self {
            Self::Recognition(_) => Mode::Recognition,
            Self::SearchAll(_) => Mode::SearchAll,
            Self::Sequential(_) => Mode::Sequential,
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        match self {
            Self::Recognition(round) => round.is_locked(),
            Self::SearchAll(round) => round.is_complete(),
            Self::Sequential(round) => round.is_complete(),
        }
    }

    #[must_use]
    pub fn is_practice(&self) -> bool {
        match self {
            Self::Recognition(round) => round.is_practice(),
            Self::SearchAll(round) => round.is_practice(),
            Self::Sequential(round) => round.is_practice(),
        }
    }

    /// The symbol a learner should hear right now.
    #[must_use]
    pub fn prompt_symbol(&self) -> Option<&Symbol> {
        match self {
            Self::Recognition(round) => Some(round.target()),
            Self::SearchAll(round) => Some(round.target()),
            Self::Sequential(round) => round.expected(),
        }
    }
}
