use std::time::Duration;

use crate::engine::PickOutcome;
use crate::model::{CellId, MistakeKind, ProfileSnapshot, SearchAllRound};

pub const HIT_POINTS: u32 = 5;
pub const MISS_PENALTY: u32 = 1;
pub const ADVANCE_DELAY: Duration = Duration::from_millis(500);

/// Evaluate a cell pick in a search-all round.
///
/// A wrong cell stays pickable; each repeat counts as another misclick.
pub fn submit_pick(
    round: &mut SearchAllRound,
    progress: &mut ProfileSnapshot,
    cell: CellId,
) -> PickOutcome {
    if round.is_complete() {
        return PickOutcome::Ignored;
    }
    let Some(picked) = round.cells.get_mut(cell.index()) else {
        return PickOutcome::Ignored;
    };
    if picked.found {
        return PickOutcome::Ignored;
    }

    if !picked.is_target {
        progress.penalize(MISS_PENALTY);
        progress
            .wrongbook
            .bump(MistakeKind::Misclick, picked.symbol.as_str(), 1);
        return PickOutcome::Miss;
    }

    picked.found = true;
    round.found_count += 1;
    progress.award(HIT_POINTS);

    if round.is_complete() {
        if round.practice {
            progress
                .wrongbook
                .bump(MistakeKind::Misclick, round.target.as_str(), -1);
        }
        PickOutcome::Completed {
            advance_after: ADVANCE_DELAY,
        }
    } else {
        PickOutcome::Hit { next: None }
    }
}
