use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

//
// ─── MISTAKE KIND ──────────────────────────────────────────────────────────────
//

/// The three sections of the mistake ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MistakeKind {
    /// Recognition targets that were answered wrongly, keyed by target symbol.
    RecognitionMiss,
    /// Grid cells picked by mistake, keyed by the picked symbol.
    Misclick,
    /// Sequences with at least one wrong pick, keyed by sequence key.
    SequenceFail,
}

//
// ─── MISTAKE MAP ───────────────────────────────────────────────────────────────
//

/// One ledger entry, as returned by [`MistakeMap::top_entries`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    pub key: String,
    pub count: u32,
}

/// Sparse frequency map. Every stored count is positive; a count that reaches
/// zero removes its key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, u32>", into = "BTreeMap<String, u32>")]
pub struct MistakeMap {
    counts: BTreeMap<String, u32>,
}

impl MistakeMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `delta` to the count for `key`, clamping at zero.
    ///
    /// Returns the new count; a result of 0 means the key is now absent.
    pub fn inc_count(&mut self, key: &str, delta: i64) -> u32 {
        let current = i64::from(self.count(key));
        let next = current.saturating_add(delta).clamp(0, i64::from(u32::MAX));
        let next = u32::try_from(next).unwrap_or(u32::MAX);
        if next == 0 {
            self.counts.remove(key);
        } else {
            self.counts.insert(key.to_owned(), next);
        }
        next
    }

    /// Current count for `key`, 0 if absent.
    #[must_use]
    pub fn count(&self, key: &str) -> u32 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.counts.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Entries sorted by count descending, ties in lexicographic key order,
    /// truncated to `limit`.
    #[must_use]
    pub fn top_entries(&self, limit: usize) -> Vec<LedgerEntry> {
        let mut entries: Vec<LedgerEntry> = self
            .counts
            .iter()
            .map(|(key, count)| LedgerEntry {
                key: key.clone(),
                count: *count,
            })
            .collect();
        // BTreeMap yields keys in order, and the sort is stable.
        entries.sort_by(|a, b| b.count.cmp(&a.count));
        entries.truncate(limit);
        entries
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counts.iter().map(|(key, count)| (key.as_str(), *count))
    }
}

impl From<BTreeMap<String, u32>> for MistakeMap {
    fn from(mut counts: BTreeMap<String, u32>) -> Self {
        counts.retain(|_, count| *count > 0);
        Self { counts }
    }
}

impl From<MistakeMap> for BTreeMap<String, u32> {
    fn from(map: MistakeMap) -> Self {
        map.counts
    }
}

//
// ─── LEDGER ────────────────────────────────────────────────────────────────────
//

/// Per-profile record of mistake frequencies, one sparse map per kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Ledger {
    recognition_misses: MistakeMap,
    misclicks: MistakeMap,
    sequence_fails: MistakeMap,
}

impl Ledger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn section(&self, kind: MistakeKind) -> &MistakeMap {
        match kind {
            MistakeKind::RecognitionMiss => &self.recognition_misses,
            MistakeKind::Misclick => &self.misclicks,
            MistakeKind::SequenceFail => &self.sequence_fails,
        }
    }

    pub fn section_mut(&mut self, kind: MistakeKind) -> &mut MistakeMap {
        match kind {
            MistakeKind::RecognitionMiss => &mut self.recognition_misses,
            MistakeKind::Misclick => &mut self.misclicks,
            MistakeKind::SequenceFail => &mut self.sequence_fails,
        }
    }

    /// Shorthand for `section_mut(kind).inc_count(key, delta)`.
    pub fn bump(&mut self, kind: MistakeKind, key: &str, delta: i64) -> u32 {
        self.section_mut(kind).inc_count(key, delta)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recognition_misses.is_empty()
            && self.misclicks.is_empty()
            && self.sequence_fails.is_empty()
    }
}
