use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::VecDeque;

use crate::model::{Ledger, PracticeKind, PracticeSession, Symbol, SymbolCatalog};

/// Most symbols a recognition practice queue will hold.
pub const RECOGNITION_QUEUE_CAP: usize = 50;

/// Derives practice sessions from a profile's top offenders.
#[derive(Debug, Clone, Copy)]
pub struct PracticeSelector<'a> {
    ledger: &'a Ledger,
    catalog: &'a SymbolCatalog,
}

impl<'a> PracticeSelector<'a> {
    #[must_use]
    pub fn new(ledger: &'a Ledger, catalog: &'a SymbolCatalog) -> Self {
        Self { ledger, catalog }
    }

    /// Build a practice session of `kind`.
    ///
    /// - `Recognition`: a shuffled queue of up to 50 most-missed targets.
    /// - `Misclick`: the single most misclicked symbol.
    /// - `SequenceFail`: the most failed sequence that still exists in the catalog.
    ///
    /// Returns `None` when the ledger has nothing to practice for `kind`.
    pub fn start<R: Rng + ?Sized>(&self, kind: PracticeKind, rng: &mut R) -> Option<PracticeSession> {
        let section = self.ledger.section(kind.mistake_kind());
        match kind {
            PracticeKind::Recognition => {
                let mut queue: Vec<Symbol> = section
                    .top_entries(RECOGNITION_QUEUE_CAP)
                    .into_iter()
                    .map(|entry| Symbol::new(entry.key))
                    .collect();
                if queue.is_empty() {
                    return None;
                }
                queue.shuffle(rng);
                Some(PracticeSession::Recognition {
                    queue: VecDeque::from(queue),
                })
            }
            PracticeKind::Misclick => section
                .top_entries(1)
                .into_iter()
                .next()
                .map(|entry| PracticeSession::SearchAll {
                    target: Symbol::new(entry.key),
                }),
            PracticeKind::SequenceFail => section
                .top_entries(section.len())
                .into_iter()
                .find_map(|entry| self.catalog.sequence_by_key(&entry.key).cloned())
                .map(|sequence| PracticeSession::Sequential { sequence }),
        }
    }
}
