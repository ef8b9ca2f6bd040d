use serde::{Deserialize, Serialize};
use std::fmt;

/// A single phonetic token from the catalog. Equality is by value.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.0)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ledger identity of a sequence: its symbols concatenated in order.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SequenceKey(String);

impl SequenceKey {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SequenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SequenceKey({})", self.0)
    }
}

impl fmt::Display for SequenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A fixed ordered list of symbols to be found in order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sequence(Vec<Symbol>);

impl Sequence {
    #[must_use]
    pub fn new(symbols: Vec<Symbol>) -> Self {
        Self(symbols)
    }

    #[must_use]
    pub fn symbols(&self) -> &[Symbol] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Symbol expected at `position`, if the sequence is that long.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&Symbol> {
        self.0.get(position)
    }

    #[must_use]
    pub fn contains(&self, symbol: &Symbol) -> bool {
        self.0.contains(symbol)
    }

    /// Ordered concatenation of the symbols. `[X, Y]` and `[Y, X]` get distinct keys.
    #[must_use]
    pub fn key(&self) -> SequenceKey {
        SequenceKey(self.0.iter().map(Symbol::as_str).collect())
    }
}

impl FromIterator<Symbol> for Sequence {
    fn from_iter<T: IntoIterator<Item = Symbol>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
