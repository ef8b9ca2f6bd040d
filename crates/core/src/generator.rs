use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use std::ops::RangeInclusive;
use thiserror::Error;

use crate::model::{
    Mode, RecognitionRound, SearchAllRound, SearchCell, Sequence, SequenceCell, SequentialRound,
    Symbol, SymbolCatalog,
};

/// Cell count of every grid round, so the layout never changes between rounds.
pub const GRID_SIZE: usize = 42;

/// At most this many distinct decoy symbols appear in one grid.
pub const MAX_UNIQUE_DECOYS: usize = 14;

/// Number of options in a recognition round.
pub const RECOGNITION_OPTIONS: usize = 4;

/// How many target copies a search-all grid holds.
pub const REQUIRED_COUNT_RANGE: RangeInclusive<usize> = 5..=10;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// The catalog cannot produce a round for the requested mode.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GenerateError {
    #[error("{mode} rounds need at least {required} symbols, catalog has {available}")]
    TooFewSymbols {
        mode: Mode,
        required: usize,
        available: usize,
    },

    #[error("{mode} rounds need decoy symbols outside the target")]
    NoDecoys { mode: Mode },

    #[error("catalog has no sequences")]
    NoSequences,
}

//
// ─── GENERATOR ─────────────────────────────────────────────────────────────────
//

/// Builds round content from a catalog.
///
/// Every shuffle is a uniform Fisher-Yates shuffle driven by the caller's RNG,
/// so a seeded RNG reproduces the same rounds.
#[derive(Debug, Clone, Copy)]
pub struct RoundGenerator<'a> {
    catalog: &'a SymbolCatalog,
}

impl<'a> RoundGenerator<'a> {
    #[must_use]
    pub fn new(catalog: &'a SymbolCatalog) -> Self {
        Self { catalog }
    }

    /// Build a recognition round. The target is `override_target`, or a uniformly
    /// random catalog symbol; three distinct decoys are sampled from the rest.
    ///
    /// An override marks the round as a practice round.
    ///
    /// # Errors
    ///
    /// Returns `GenerateError::TooFewSymbols` if the catalog has fewer than
    /// four symbols.
    pub fn recognition<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        override_target: Option<&Symbol>,
    ) -> Result<RecognitionRound, GenerateError> {
        let too_few = |available| GenerateError::TooFewSymbols {
            mode: Mode::Recognition,
            required: RECOGNITION_OPTIONS,
            available,
        };
        let symbols = self.catalog.symbols();
        if symbols.len() < RECOGNITION_OPTIONS {
            return Err(too_few(symbols.len()));
        }

        let target = self.pick_target(rng, override_target, Mode::Recognition)?;
        let pool: Vec<&Symbol> = symbols.iter().filter(|s| **s != target).collect();
        if pool.len() < RECOGNITION_OPTIONS - 1 {
            return Err(too_few(symbols.len()));
        }

        let mut options: Vec<Symbol> = pool
            .choose_multiple(rng, RECOGNITION_OPTIONS - 1)
            .map(|s| (*s).clone())
            .collect();
        options.push(target.clone());
        options.shuffle(rng);

        Ok(RecognitionRound {
            target,
            options,
            practice: override_target.is_some(),
            locked: false,
        })
    }

    /// Build a search-all round: `required_count` copies of the target plus
    /// repeated decoys (at most 14 distinct) filling a 42-cell grid.
    ///
    /// # Errors
    ///
    /// Returns `GenerateError::NoDecoys` if every catalog symbol is the target.
    pub fn search_all<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        override_target: Option<&Symbol>,
    ) -> Result<SearchAllRound, GenerateError> {
        let target = self.pick_target(rng, override_target, Mode::SearchAll)?;
        let required_count = rng.random_range(REQUIRED_COUNT_RANGE);

        let pool: Vec<&Symbol> = self
            .catalog
            .symbols()
            .iter()
            .filter(|s| **s != target)
            .collect();
        let decoys = sample_decoys(rng, &pool).ok_or(GenerateError::NoDecoys {
            mode: Mode::SearchAll,
        })?;

        let mut symbols: Vec<Symbol> = vec![target.clone(); required_count];
        fill_grid(rng, &mut symbols, &decoys);
        symbols.shuffle(rng);

        let cells = symbols
            .into_iter()
            .map(|symbol| SearchCell {
                is_target: symbol == target,
                symbol,
                found: false,
            })
            .collect();

        Ok(SearchAllRound {
            target,
            required_count,
            found_count: 0,
            cells,
            practice: override_target.is_some(),
        })
    }

    /// Build a sequential round from `override_sequence` or a uniformly chosen
    /// predefined sequence.
    ///
    /// Between zero and `len(sequence)` extra copies of sequence symbols are
    /// mixed in before the grid is padded with decoys from outside the sequence.
    ///
    /// # Errors
    ///
    /// Returns `GenerateError::NoSequences` if there is nothing to pick from, or
    /// `GenerateError::NoDecoys` if the grid cannot be padded.
    pub fn sequential<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        override_sequence: Option<&Sequence>,
    ) -> Result<SequentialRound, GenerateError> {
        let sequence = match override_sequence {
            Some(sequence) => sequence.clone(),
            None => self
                .catalog
                .sequences()
                .choose(rng)
                .cloned()
                .ok_or(GenerateError::NoSequences)?,
        };
        if sequence.is_empty() {
            return Err(GenerateError::NoSequences);
        }

        let mut symbols: Vec<Symbol> = sequence.symbols().to_vec();
        let room = GRID_SIZE.saturating_sub(symbols.len());
        let extra = rng.random_range(0..=sequence.len()).min(room);
        for _ in 0..extra {
            if let Some(symbol) = sequence.symbols().choose(rng) {
                symbols.push(symbol.clone());
            }
        }

        if symbols.len() < GRID_SIZE {
            let pool: Vec<&Symbol> = self
                .catalog
                .symbols()
                .iter()
                .filter(|s| !sequence.contains(s))
                .collect();
            let decoys = sample_decoys(rng, &pool).ok_or(GenerateError::NoDecoys {
                mode: Mode::Sequential,
            })?;
            fill_grid(rng, &mut symbols, &decoys);
        }
        symbols.shuffle(rng);

        let cells = symbols
            .into_iter()
            .map(|symbol| SequenceCell {
                symbol,
                matched: false,
            })
            .collect();

        Ok(SequentialRound {
            sequence,
            cells,
            cursor: 0,
            practice: override_sequence.is_some(),
        })
    }

    fn pick_target<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        override_target: Option<&Symbol>,
        mode: Mode,
    ) -> Result<Symbol, GenerateError> {
        match override_target {
            Some(target) => Ok(target.clone()),
            None => self
                .catalog
                .symbols()
                .choose(rng)
                .cloned()
                .ok_or(GenerateError::TooFewSymbols {
                    mode,
                    required: 1,
                    available: 0,
                }),
        }
    }
}

/// Up to [`MAX_UNIQUE_DECOYS`] distinct symbols from `pool`; `None` if the pool is empty.
fn sample_decoys<R: Rng + ?Sized>(rng: &mut R, pool: &[&Symbol]) -> Option<Vec<Symbol>> {
    if pool.is_empty() {
        return None;
    }
    Some(
        pool.choose_multiple(rng, MAX_UNIQUE_DECOYS)
            .map(|s| (*s).clone())
            .collect(),
    )
}

fn fill_grid<R: Rng + ?Sized>(rng: &mut R, symbols: &mut Vec<Symbol>, decoys: &[Symbol]) {
    while symbols.len() < GRID_SIZE {
        match decoys.choose(rng) {
            Some(decoy) => symbols.push(decoy.clone()),
            None => break,
        }
    }
}
