use std::time::Duration;

use crate::engine::PickOutcome;
use crate::model::{CellId, MistakeKind, ProfileSnapshot, SequentialRound};

pub const HIT_POINTS: u32 = 8;
pub const MISS_PENALTY: u32 = 1;
pub const ADVANCE_DELAY: Duration = Duration::from_millis(560);

/// Evaluate a cell pick in a sequential round.
///
/// A wrong pick is charged to both the picked symbol and the sequence, but the
/// cursor stays where it is: progress made so far is kept.
pub fn submit_pick(
    round: &mut SequentialRound,
    progress: &mut ProfileSnapshot,
    cell: CellId,
) -> PickOutcome {
    let Some(expected) = round.sequence.get(round.cursor).cloned() else {
        return PickOutcome::Ignored;
    };
    let Some(picked) = round.cells.get_mut(cell.index()) else {
        return PickOutcome::Ignored;
    };
    if picked.matched {
        return PickOutcome::Ignored;
    }

    let key = round.sequence.key();
    if picked.symbol != expected {
        progress.penalize(MISS_PENALTY);
        progress
            .wrongbook
            .bump(MistakeKind::Misclick, picked.symbol.as_str(), 1);
        progress
            .wrongbook
            .bump(MistakeKind::SequenceFail, key.as_str(), 1);
        return PickOutcome::Miss;
    }

    picked.matched = true;
    round.cursor += 1;
    progress.award(HIT_POINTS);

    match round.sequence.get(round.cursor) {
        Some(next) => PickOutcome::Hit {
            next: Some(next.clone()),
        },
        None => {
            if round.practice {
                progress
                    .wrongbook
                    .bump(MistakeKind::SequenceFail, key.as_str(), -1);
            }
            PickOutcome::Completed {
                advance_after: ADVANCE_DELAY,
            }
        }
    }
}
