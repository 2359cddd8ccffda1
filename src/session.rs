//! Session state and the record/predict/reset contract.
//!
//! A [`Session`] bundles everything that changes while symbols are recorded:
//! the history, the cycle counters, and the log. It is a plain value. Each
//! operation takes the session by value (or by shared reference for reads)
//! and hands back the new state, so the caller decides where it lives.
//!
//! Recording one symbol runs four steps against the history *before* the
//! symbol is appended:
//!
//! 1. predict with both engines,
//! 2. advance the counters of every matching cycle key,
//! 3. log the symbol against the step 1 predictions,
//! 4. append the symbol to the history.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::counters::CycleCounters;
use crate::engine::{self, PredictionPair};
use crate::error::ValidationError;
use crate::history::History;
use crate::log::{LogEntry, SessionLog};
use crate::symbol::Symbol;

/// Unique identifier for a session. A new one is issued on every reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Creates a new random session ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One continuous run of history, counters, and log between resets.
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    catalog: Arc<Catalog>,
    history: History,
    counters: CycleCounters,
    log: SessionLog,
}

impl Session {
    /// Starts an empty session over `catalog`.
    #[must_use]
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let id = SessionId::new();
        debug!(session = %id, "session started");
        Self {
            id,
            catalog,
            history: History::new(),
            counters: CycleCounters::new(),
            log: SessionLog::new(),
        }
    }

    /// Session identifier.
    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// The catalog this session predicts from.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Recorded symbols.
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Cycle occurrence counters.
    #[must_use]
    pub fn counters(&self) -> &CycleCounters {
        &self.counters
    }

    /// Session log.
    #[must_use]
    pub fn log(&self) -> &SessionLog {
        &self.log
    }

    /// Parses a label against the catalog alphabet.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::UnknownSymbol` for labels outside the
    /// alphabet.
    pub fn parse_symbol(&self, label: &str) -> Result<Symbol, ValidationError> {
        self.catalog.alphabet().parse(label)
    }

    /// Predictions for the next symbol given the current history.
    #[must_use]
    pub fn predict(&self) -> PredictionPair {
        engine::predict(&self.catalog, &self.history, &self.counters)
    }

    /// Records `symbol` now. See [`Session::record_at`].
    #[must_use]
    pub fn record(self, symbol: Symbol) -> (Self, LogEntry) {
        self.record_at(symbol, Utc::now())
    }

    /// Records `symbol` with an explicit timestamp and returns the new state
    /// together with the log entry that was appended.
    #[must_use]
    pub fn record_at(self, symbol: Symbol, timestamp: DateTime<Utc>) -> (Self, LogEntry) {
        let Self {
            id,
            catalog,
            history,
            counters,
            mut log,
        } = self;

        let (history, counters, entry) = record(&catalog, history, counters, symbol, timestamp);
        debug!(
            session = %id,
            input = %entry.input,
            status = %entry.status,
            "symbol recorded"
        );
        log.push(entry.clone());

        let session = Self {
            id,
            catalog,
            history,
            counters,
            log,
        };
        (session, entry)
    }

    /// Clears history, counters, and log together and issues a new ID.
    #[must_use]
    pub fn reset(self) -> Self {
        info!(
            session = %self.id,
            recorded = self.history.len(),
            "session reset"
        );
        Self::new(self.catalog)
    }
}

/// Records one symbol against raw state.
///
/// Predictions are taken from `history` as it stands, counters are advanced,
/// and `symbol` is appended. The caller owns the returned history and
/// counters and is responsible for appending the entry to its log.
#[must_use]
pub fn record(
    catalog: &Catalog,
    mut history: History,
    mut counters: CycleCounters,
    symbol: Symbol,
    timestamp: DateTime<Utc>,
) -> (History, CycleCounters, LogEntry) {
    let PredictionPair {
        tracker,
        structural,
    } = engine::predict(catalog, &history, &counters);
    let advanced = engine::advance_cycle_counters(catalog, &history, &mut counters);
    if !advanced.is_empty() {
        debug!(keys = ?advanced, "cycle counters advanced");
    }

    let entry = LogEntry::new(
        timestamp,
        symbol.clone(),
        tracker.map(|p| p.value),
        structural.map(|p| p.value),
    );
    history.push(symbol);
    (history, counters, entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::MatchStatus;

    fn session(toml: &str) -> Session {
        Session::new(Arc::new(Catalog::from_toml_str(toml).unwrap()))
    }

    fn push(session: Session, label: &str) -> (Session, LogEntry) {
        let symbol = session.parse_symbol(label).unwrap();
        session.record(symbol)
    }

    #[test]
    fn test_session_id_unique() {
        assert_ne!(SessionId::new(), SessionId::new());
    }

    #[test]
    fn test_record_logs_against_prior_prediction() {
        let s = session(
            r#"
            alphabet = ["A", "B"]
            search_lengths = [4]
            [exact]
            AAAB = "B"
            "#,
        );
        let (s, _) = push(s, "A");
        let (s, _) = push(s, "A");
        let (s, _) = push(s, "A");
        assert!(s.predict().is_empty());

        let (s, entry) = push(s, "B");
        assert_eq!(entry.status, MatchStatus::NoPrediction);
        assert_eq!(s.history().len(), 4);

        let next = s.predict();
        assert_eq!(next.tracker_value().map(|v| v.as_str()), Some("B"));

        let (s, entry) = push(s, "B");
        assert_eq!(entry.status, MatchStatus::Match);
        assert_eq!(entry.tracker.as_ref().map(|v| v.as_str()), Some("B"));
        assert_eq!(s.log().len(), 5);
    }

    #[test]
    fn test_reset_clears_everything_together() {
        let s = session(
            r#"
            alphabet = ["A", "B"]
            search_lengths = [2]
            [cycles]
            AB = ["A", "B"]
            "#,
        );
        let (s, _) = push(s, "A");
        let (s, _) = push(s, "B");
        let (s, _) = push(s, "A");
        assert_eq!(s.counters().get("AB"), 1);
        let before = s.id();

        let s = s.reset();
        assert!(s.history().is_empty());
        assert!(s.counters().is_empty());
        assert!(s.log().is_empty());
        assert_ne!(s.id(), before);
    }

    #[test]
    fn test_free_record_uses_history_before_append() {
        let catalog = Catalog::from_toml_str(
            r#"
            alphabet = ["A", "B"]
            search_lengths = [2]
            [cycles]
            AB = ["X", "Y"]
            "#,
        )
        .unwrap();
        let a = catalog.alphabet().parse("A").unwrap();
        let b = catalog.alphabet().parse("B").unwrap();
        let now = Utc::now();

        let (h, c, _) = record(&catalog, History::new(), CycleCounters::new(), a.clone(), now);
        let (h, c, _) = record(&catalog, h, c, b, now);
        assert!(c.is_empty());

        let (h, c, entry) = record(&catalog, h, c, a, now);
        assert_eq!(entry.tracker.as_ref().map(|v| v.as_str()), Some("X"));
        assert_eq!(entry.status, MatchStatus::Miss);
        assert_eq!(c.get("AB"), 1);
        assert_eq!(h.len(), 3);
    }

    #[test]
    fn test_unknown_symbol_rejected() {
        let s = session(r#"alphabet = ["A", "B"]"#);
        assert!(s.parse_symbol("C").is_err());
    }
}
