use serde::Deserialize;
use std::collections::HashSet;
use thiserror::Error;

use crate::generator::GRID_SIZE;
use crate::model::symbol::{Sequence, Symbol};

const BUILTIN_ZHUYIN: &str = include_str!("../../data/zhuyin.json");

/// Number of leading catalog symbols used when no sequences are configured.
const FALLBACK_SEQUENCE_LEN: usize = 3;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("catalog has no symbols")]
    Empty,

    #[error("symbol {0:?} appears more than once")]
    DuplicateSymbol(String),

    #[error("sequence #{index} is empty")]
    EmptySequence { index: usize },

    #[error("sequence #{index} has {len} symbols, more than the grid holds")]
    SequenceTooLong { index: usize, len: usize },

    #[error("catalog source is malformed: {0}")]
    Malformed(String),
}

//
// ─── SOURCE FORMAT ─────────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
struct CatalogSource {
    #[serde(alias = "symbols")]
    zhuyin: Vec<String>,
    #[serde(default)]
    sequences: Vec<Vec<String>>,
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

/// The finite set of practiceable symbols and predefined target sequences.
///
/// Loaded once and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolCatalog {
    symbols: Vec<Symbol>,
    sequences: Vec<Sequence>,
}

impl SymbolCatalog {
    /// Build a catalog from an ordered symbol list and sequence list.
    ///
    /// An empty sequence list is replaced by one sequence made of the first
    /// (up to three) catalog symbols.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if there are no symbols, a symbol repeats, or a
    /// sequence is empty or longer than the round grid.
    pub fn new(symbols: Vec<Symbol>, sequences: Vec<Sequence>) -> Result<Self, CatalogError> {
        if symbols.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::with_capacity(symbols.len());
        for symbol in &symbols {
            if !seen.insert(symbol) {
                return Err(CatalogError::DuplicateSymbol(symbol.as_str().to_owned()));
            }
        }

        for (index, sequence) in sequences.iter().enumerate() {
            if sequence.is_empty() {
                return Err(CatalogError::EmptySequence { index });
            }
            if sequence.len() > GRID_SIZE {
                return Err(CatalogError::SequenceTooLong {
                    index,
                    len: sequence.len(),
                });
            }
        }

        let sequences = if sequences.is_empty() {
            vec![symbols.iter().take(FALLBACK_SEQUENCE_LEN).cloned().collect()]
        } else {
            sequences
        };

        Ok(Self { symbols, sequences })
    }

    /// Parse a catalog from `{"zhuyin": [...], "sequences": [[...], ...]}`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Malformed` for invalid JSON, or any validation
    /// error from [`SymbolCatalog::new`].
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let source: CatalogSource =
            serde_json::from_str(raw).map_err(|err| CatalogError::Malformed(err.to_string()))?;
        let symbols = source.zhuyin.into_iter().map(Symbol::new).collect();
        let sequences = source
            .sequences
            .into_iter()
            .map(|seq| seq.into_iter().map(Symbol::new).collect())
            .collect();
        Self::new(symbols, sequences)
    }

    /// The bundled 37-symbol Zhuyin catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` only if the bundled data file is damaged.
    pub fn zhuyin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_ZHUYIN)
    }

    #[must_use]
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    #[must_use]
    pub fn sequences(&self) -> &[Sequence] {
        &self.sequences
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    #[must_use]
    pub fn contains(&self, symbol: &Symbol) -> bool {
        self.symbols.contains(symbol)
    }

    /// Find the predefined sequence whose ledger key is `key`.
    #[must_use]
    pub fn sequence_by_key(&self, key: &str) -> Option<&Sequence> {
        self.sequences.iter().find(|seq| seq.key().as_str() == key)
    }
}
