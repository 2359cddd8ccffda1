//! Prediction engines.
//!
//! Two independent engines read the same history:
//!
//! - [`Tracker`] (Engine 1) matches literal trailing windows against the exact
//!   and cycle tables, longest window first.
//! - [`StructuralMatcher`] (Engine 2) reduces a fixed trailing window to its
//!   shape and looks that up in the structural table.
//!
//! Either, both, or neither may fire for a given history.

/// Engine 2.
pub mod structural;
/// Engine 1 and cycle counter advancement.
pub mod tracker;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, PredictedValue};
use crate::counters::CycleCounters;
use crate::history::History;

pub use structural::StructuralMatcher;
pub use tracker::{advance_cycle_counters, Tracker};

/// Which rule produced a prediction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum MatchReason {
    /// Exact rule on a trailing window of `length` symbols.
    Exact {
        /// Window length that matched.
        length: usize,
    },

    /// Cycle rule on a trailing window of `length` symbols.
    Cycle {
        /// Window length that matched.
        length: usize,
        /// Literal key of the matched cycle.
        key: String,
        /// Resolved position inside the cycle.
        position: usize,
    },

    /// Structural rule on the shape of the trailing window.
    Structural {
        /// Shape string that matched.
        shape: String,
    },
}

impl fmt::Display for MatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact { length } => write!(f, "exact ({length}d)"),
            Self::Cycle { position, .. } => write!(f, "cycle (pos {position})"),
            Self::Structural { shape } => write!(f, "structural ({shape})"),
        }
    }
}

/// A single engine's output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    /// Predicted next outcome.
    pub value: PredictedValue,
    /// Rule that fired.
    pub reason: MatchReason,
}

/// Both engines' outputs for the same history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionPair {
    /// Engine 1 (tracker) result.
    pub tracker: Option<Prediction>,
    /// Engine 2 (structural) result.
    pub structural: Option<Prediction>,
}

impl PredictionPair {
    /// Returns true if neither engine fired.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tracker.is_none() && self.structural.is_none()
    }

    /// Engine 1 predicted value, if any.
    #[must_use]
    pub fn tracker_value(&self) -> Option<&PredictedValue> {
        self.tracker.as_ref().map(|p| &p.value)
    }

    /// Engine 2 predicted value, if any.
    #[must_use]
    pub fn structural_value(&self) -> Option<&PredictedValue> {
        self.structural.as_ref().map(|p| &p.value)
    }
}

/// A prediction engine over a catalog.
///
/// Engines are pure: they read the catalog, history, and counters and never
/// mutate anything.
pub trait Predictor {
    /// Short engine name used in logs.
    fn name(&self) -> &'static str;

    /// Predicts the next outcome, or `None` if no rule applies.
    fn predict(
        &self,
        catalog: &Catalog,
        history: &History,
        counters: &CycleCounters,
    ) -> Option<Prediction>;
}

/// Runs both engines against the same state.
#[must_use]
pub fn predict(catalog: &Catalog, history: &History, counters: &CycleCounters) -> PredictionPair {
    PredictionPair {
        tracker: Tracker.predict(catalog, history, counters),
        structural: StructuralMatcher.predict(catalog, history, counters),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::Symbol;

    fn catalog() -> Catalog {
        Catalog::from_toml_str(
            r#"
            alphabet = ["A", "B"]
            search_lengths = [4]
            structural_window = 4
            [exact]
            AAAB = "B"
            [structural]
            "0001" = "A"
            "#,
        )
        .unwrap()
    }

    fn history(labels: &str) -> History {
        labels
            .chars()
            .map(|c| Symbol::new(c.to_string()).unwrap())
            .collect()
    }

    #[test]
    fn test_reason_display() {
        assert_eq!(format!("{}", MatchReason::Exact { length: 12 }), "exact (12d)");
        let cycle = MatchReason::Cycle {
            length: 10,
            key: "GGGRRGGGGG".to_string(),
            position: 3,
        };
        assert_eq!(format!("{cycle}"), "cycle (pos 3)");
        let shape = MatchReason::Structural {
            shape: "0102".to_string(),
        };
        assert_eq!(format!("{shape}"), "structural (0102)");
    }

    #[test]
    fn test_both_engines_see_same_history() {
        let catalog = catalog();
        let pair = predict(&catalog, &history("AAAB"), &CycleCounters::new());
        assert_eq!(pair.tracker_value().map(PredictedValue::as_str), Some("B"));
        assert_eq!(pair.structural_value().map(PredictedValue::as_str), Some("A"));
        assert!(!pair.is_empty());
    }

    #[test]
    fn test_short_history_predicts_nothing() {
        let catalog = catalog();
        let pair = predict(&catalog, &history("AAA"), &CycleCounters::new());
        assert!(pair.is_empty());
    }

    #[test]
    fn test_reason_serializes_tagged() {
        let json = serde_json::to_string(&MatchReason::Exact { length: 4 }).unwrap();
        assert_eq!(json, r#"{"rule":"exact","length":4}"#);
    }
}
