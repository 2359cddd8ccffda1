//! Per-key occurrence counters for cycle rules.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

/// Occurrence counters keyed by cycle rule key.
///
/// Reads never insert: a key that has not been matched yet reads as zero and
/// stays absent. The only write is [`CycleCounters::increment`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CycleCounters(BTreeMap<String, u64>);

impl CycleCounters {
    /// Creates an empty counter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of prior matches recorded for `key` (zero if never matched).
    #[must_use]
    pub fn get(&self, key: &str) -> u64 {
        self.0.get(key).copied().unwrap_or(0)
    }

    /// Inserts `key` at one or adds one to its existing count.
    pub fn increment(&mut self, key: &str) -> u64 {
        let count = self.0.entry(key.to_string()).or_insert(0);
        *count = count.saturating_add(1);
        trace!(key, count = *count, "cycle counter advanced");
        *count
    }

    /// Number of keys that have been matched at least once.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no cycle key has been matched yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Counters ordered by key.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}
