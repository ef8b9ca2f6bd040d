use serde::Serialize;

use zhuyin_core::model::{PracticeKind, PracticeSession, Profile, Round, RoundToken, Symbol};

//
// ─── ROUND VIEW ────────────────────────────────────────────────────────────────
//

/// Everything a presenter needs to draw the current round from scratch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundView {
    pub token: u64,
    pub profile: String,
    pub score: u32,
    pub wrong: u32,
    pub practice: Option<PracticeView>,
    pub complete: bool,
    pub round: RoundContent,
}

impl RoundView {
    #[must_use]
    pub fn build(
        token: RoundToken,
        profile: &Profile,
        round: &Round,
        practice: Option<&PracticeSession>,
    ) -> Self {
        Self {
            token: token.value(),
            profile: profile.id().to_string(),
            score: profile.score(),
            wrong: profile.wrong_count(),
            practice: practice.map(PracticeView::from_session),
            complete: round.is_complete(),
            round: RoundContent::from_round(round),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeView {
    pub kind: &'static str,
    /// Targets left in a recognition queue; absent for open-ended sessions.
    pub remaining: Option<usize>,
}

impl PracticeView {
    fn from_session(session: &PracticeSession) -> Self {
        Self {
            kind: practice_label(session.kind()),
            remaining: session.remaining(),
        }
    }
}

fn practice_label(kind: PracticeKind) -> &'static str {
    match kind {
        PracticeKind::Recognition => "recognition",
        PracticeKind::Misclick => "misclick",
        PracticeKind::SequenceFail => "sequence-fail",
    }
}

//
// ─── CONTENT ───────────────────────────────────────────────────────────────────
//

/// One grid cell. `resolved` is "found" in search-all and "matched" in sequential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellView {
    pub symbol: Symbol,
    pub resolved: bool,
}

/// Mode-specific round content, tagged with the mode name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum RoundContent {
    Recognition {
        target: Symbol,
        options: Vec<Symbol>,
        locked: bool,
    },
    SearchAll {
        target: Symbol,
        required_count: usize,
        found_count: usize,
        cells: Vec<CellView>,
    },
    Sequential {
        sequence: Vec<Symbol>,
        cursor: usize,
        cells: Vec<CellView>,
    },
}

impl RoundContent {
    fn from_round(round: &Round) -> Self {
        match round {
            Round::Recognition(round) => Self::Recognition {
                target: round.target().clone(),
                options: round.options().to_vec(),
                locked: round.is_locked(),
            },
            Round::SearchAll(round) => Self::SearchAll {
                target: round.target().clone(),
                required_count: round.required_count(),
                found_count: round.found_count(),
                cells: round
                    .cells()
                    .iter()
                    .map(|cell| CellView {
                        symbol: cell.symbol.clone(),
                        resolved: cell.found,
                    })
                    .collect(),
            },
            Round::Sequential(round) => Self::Sequential {
                sequence: round.sequence().symbols().to_vec(),
                cursor: round.cursor(),
                cells: round
                    .cells()
                    .iter()
                    .map(|cell| CellView {
                        symbol: cell.symbol.clone(),
                        resolved: cell.matched,
                    })
                    .collect(),
            },
        }
    }
}
