//! Value types stored in the pattern tables.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::symbol::Symbol;

/// Default Engine-1 search order, longest window first.
pub const DEFAULT_SEARCH_LENGTHS: [usize; 7] = [12, 11, 10, 8, 7, 6, 4];

/// Default Engine-2 window length.
pub const DEFAULT_STRUCTURAL_WINDOW: usize = 12;

/// A predicted outcome as written by the catalog author.
///
/// Predictions are opaque strings. Most name a single symbol, but a catalog
/// may predict a composite such as `BG`; comparison against a recorded symbol
/// is plain label equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PredictedValue(String);

impl PredictedValue {
    /// Wraps a prediction string. Callers validate non-emptiness.
    pub(crate) fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the prediction as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the recorded `symbol` equals this prediction.
    #[must_use]
    pub fn matches(&self, symbol: &Symbol) -> bool {
        self.0 == symbol.as_str()
    }
}

impl fmt::Display for PredictedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl<'de> Deserialize<'de> for PredictedValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        if raw.trim().is_empty() {
            return Err(serde::de::Error::custom(ValidationError::BlankPrediction));
        }
        Ok(Self(raw))
    }
}

/// Non-empty repeating list of predictions attached to a cycle rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CycleSequence(Vec<PredictedValue>);

impl CycleSequence {
    /// Construct a validated cycle.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyCycle` if `steps` is empty.
    pub fn new(key: &str, steps: Vec<PredictedValue>) -> Result<Self, ValidationError> {
        if steps.is_empty() {
            return Err(ValidationError::EmptyCycle {
                key: key.to_string(),
            });
        }
        Ok(Self(steps))
    }

    /// Position inside the cycle reached after `occurrences` prior matches.
    #[must_use]
    pub fn position(&self, occurrences: u64) -> usize {
        // len() is at least 1, so the modulus is always in range.
        let len = self.0.len() as u64;
        usize::try_from(occurrences % len).unwrap_or_default()
    }

    /// Prediction at a resolved position.
    #[must_use]
    pub fn step(&self, position: usize) -> &PredictedValue {
        &self.0[position % self.0.len()]
    }

    /// Number of steps before the cycle repeats.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a validated cycle.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Steps in order.
    #[must_use]
    pub fn as_slice(&self) -> &[PredictedValue] {
        &self.0
    }
}

/// Engine-1 window lengths in strictly descending priority order.
///
/// - Empty lists are rejected.
/// - Zero lengths are rejected.
/// - Duplicates are removed and the list is sorted longest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SearchLengths(Vec<usize>);

impl SearchLengths {
    /// Construct a validated search order.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptySearchLengths` or
    /// `ValidationError::ZeroWindow`.
    pub fn new(mut lengths: Vec<usize>) -> Result<Self, ValidationError> {
        if lengths.is_empty() {
            return Err(ValidationError::EmptySearchLengths);
        }
        if lengths.contains(&0) {
            return Err(ValidationError::ZeroWindow {
                field: "search_lengths",
            });
        }
        lengths.sort_unstable_by(|a, b| b.cmp(a));
        lengths.dedup();
        Ok(Self(lengths))
    }

    /// Lengths, longest first.
    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }
}

impl Default for SearchLengths {
    fn default() -> Self {
        Self(DEFAULT_SEARCH_LENGTHS.to_vec())
    }
}
