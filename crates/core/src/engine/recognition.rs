use std::time::Duration;

use crate::engine::PickOutcome;
use crate::model::{MistakeKind, ProfileSnapshot, RecognitionRound, Symbol};

pub const HIT_POINTS: u32 = 10;
pub const MISS_PENALTY: u32 = 2;
pub const ADVANCE_DELAY: Duration = Duration::from_millis(400);

/// Evaluate a pick in a recognition round.
///
/// A correct pick locks the round; wrong picks keep it open, so the same round
/// stays up until the target is found or a new round is requested.
pub fn submit_pick(
    round: &mut RecognitionRound,
    progress: &mut ProfileSnapshot,
    pick: &Symbol,
) -> PickOutcome {
    if round.locked {
        return PickOutcome::Ignored;
    }

    if *pick == round.target {
        progress.award(HIT_POINTS);
        if round.practice {
            progress
                .wrongbook
                .bump(MistakeKind::RecognitionMiss, round.target.as_str(), -1);
        }
        round.locked = true;
        PickOutcome::Completed {
            advance_after: ADVANCE_DELAY,
        }
    } else {
        progress.penalize(MISS_PENALTY);
        progress
            .wrongbook
            .bump(MistakeKind::RecognitionMiss, round.target.as_str(), 1);
        PickOutcome::Miss
    }
}
