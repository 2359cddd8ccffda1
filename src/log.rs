//! Append-only log of recorded symbols against the predictions made for them.

use std::fmt;

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::PredictedValue;
use crate::symbol::Symbol;

/// Outcome of comparing a recorded symbol with the predictions made for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchStatus {
    /// At least one engine predicted the recorded symbol.
    Match,
    /// At least one engine predicted, but neither got it right.
    Miss,
    /// Neither engine predicted anything.
    NoPrediction,
}

impl MatchStatus {
    /// Compares `input` with the Engine 1 and Engine 2 predictions.
    #[must_use]
    pub fn evaluate(
        input: &Symbol,
        tracker: Option<&PredictedValue>,
        structural: Option<&PredictedValue>,
    ) -> Self {
        if tracker.is_none() && structural.is_none() {
            return Self::NoPrediction;
        }
        let hit = tracker.is_some_and(|p| p.matches(input))
            || structural.is_some_and(|p| p.matches(input));
        if hit {
            Self::Match
        } else {
            Self::Miss
        }
    }

    /// Stable lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Match => "match",
            Self::Miss => "miss",
            Self::NoPrediction => "no-prediction",
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One recorded symbol and what the engines said beforehand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// When the symbol was recorded.
    pub timestamp: DateTime<Utc>,
    /// The recorded symbol.
    pub input: Symbol,
    /// Engine 1 prediction made before recording.
    pub tracker: Option<PredictedValue>,
    /// Engine 2 prediction made before recording.
    pub structural: Option<PredictedValue>,
    /// Comparison result.
    pub status: MatchStatus,
}

impl LogEntry {
    /// Builds an entry, deriving the status from the predictions.
    #[must_use]
    pub fn new(
        timestamp: DateTime<Utc>,
        input: Symbol,
        tracker: Option<PredictedValue>,
        structural: Option<PredictedValue>,
    ) -> Self {
        let status = MatchStatus::evaluate(&input, tracker.as_ref(), structural.as_ref());
        Self {
            timestamp,
            input,
            tracker,
            structural,
            status,
        }
    }

    /// Recording time on the local wall clock, as `HH:MM:SS`.
    #[must_use]
    pub fn clock_time(&self) -> String {
        self.timestamp
            .with_timezone(&Local)
            .format("%H:%M:%S")
            .to_string()
    }
}

/// Status counts over a log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogTally {
    /// Entries with status `match`.
    pub matches: usize,
    /// Entries with status `miss`.
    pub misses: usize,
    /// Entries with status `no-prediction`.
    pub no_predictions: usize,
}

/// Chronological, append-only session log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionLog(Vec<LogEntry>);

impl SessionLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, entry: LogEntry) {
        self.0.push(entry);
    }

    /// Entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[LogEntry] {
        &self.0
    }

    /// Entries, most recent first (display order).
    pub fn recent_first(&self) -> impl Iterator<Item = &LogEntry> {
        self.0.iter().rev()
    }

    /// Most recent entry.
    #[must_use]
    pub fn last(&self) -> Option<&LogEntry> {
        self.0.last()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Counts entries by status.
    #[must_use]
    pub fn tally(&self) -> LogTally {
        self.0.iter().fold(LogTally::default(), |mut t, e| {
            match e.status {
                MatchStatus::Match => t.matches += 1,
                MatchStatus::Miss => t.misses += 1,
                MatchStatus::NoPrediction => t.no_predictions += 1,
            }
            t
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn sym(label: &str) -> Symbol {
        Symbol::new(label).unwrap()
    }

    fn pred(value: &str) -> PredictedValue {
        PredictedValue::new(value)
    }

    #[test]
    fn test_status_match_on_either_engine() {
        let r = pred("R");
        assert_eq!(MatchStatus::evaluate(&sym("R"), Some(&r), None), MatchStatus::Match);
        assert_eq!(MatchStatus::evaluate(&sym("R"), None, Some(&r)), MatchStatus::Match);
        let g = pred("G");
        assert_eq!(MatchStatus::evaluate(&sym("R"), Some(&g), Some(&r)), MatchStatus::Match);
    }

    #[test]
    fn test_status_miss() {
        let r = pred("R");
        assert_eq!(MatchStatus::evaluate(&sym("G"), Some(&r), None), MatchStatus::Miss);
    }

    #[test]
    fn test_status_no_prediction() {
        assert_eq!(MatchStatus::evaluate(&sym("G"), None, None), MatchStatus::NoPrediction);
        assert_eq!(MatchStatus::evaluate(&sym("R"), None, None), MatchStatus::NoPrediction);
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(MatchStatus::NoPrediction.to_string(), "no-prediction");
        let json = serde_json::to_string(&MatchStatus::NoPrediction).unwrap();
        assert_eq!(json, r#""no-prediction""#);
    }

    #[test]
    fn test_log_order_and_tally() {
        let now = Utc::now();
        let mut log = SessionLog::new();
        log.push(LogEntry::new(now, sym("A"), None, None));
        log.push(LogEntry::new(now, sym("B"), Some(pred("B")), None));
        log.push(LogEntry::new(now, sym("C"), Some(pred("B")), None));

        let inputs: Vec<&str> = log.recent_first().map(|e| e.input.as_str()).collect();
        assert_eq!(inputs, vec!["C", "B", "A"]);
        assert_eq!(log.entries()[0].input.as_str(), "A");
        assert_eq!(
            log.tally(),
            LogTally {
                matches: 1,
                misses: 1,
                no_predictions: 1
            }
        );
    }

    #[test]
    fn test_entry_json_rejects_blank_prediction() {
        let entry = LogEntry::new(Utc::now(), sym("A"), Some(pred("A")), None);
        let json = serde_json::to_string(&entry).unwrap();
        let back: LogEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);

        let blank = json.replace(r#""tracker":"A""#, r#""tracker":"""#);
        assert_ne!(blank, json);
        assert!(serde_json::from_str::<LogEntry>(&blank).is_err());
    }

    #[test]
    fn test_clock_time_uses_local_wall_clock() {
        let at = Local
            .with_ymd_and_hms(2024, 3, 9, 23, 59, 58)
            .unwrap()
            .with_timezone(&Utc);
        let entry = LogEntry::new(at, sym("A"), None, None);
        assert_eq!(entry.clock_time(), "23:59:58");
    }
}
