//! # StreakQL - Dual-engine pattern tracker
//!
//! StreakQL predicts the next outcome of a manually recorded symbol stream
//! from a static, author-supplied pattern catalog. There is no learning and no
//! scoring: every prediction is a table lookup.
//!
//! ## Core Concepts
//!
//! - **Symbol**: one recorded outcome category, drawn from the catalog alphabet
//! - **Catalog**: immutable exact, cycle, and structural rule tables
//! - **Tracker** (Engine 1): literal trailing-window match, longest first
//! - **StructuralMatcher** (Engine 2): match on the shape of a fixed window
//! - **Session**: history, cycle counters, and log, reset together
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use streakql::{Catalog, Session};
//!
//! let catalog = Catalog::from_toml_str(r#"
//!     alphabet = ["A", "B"]
//!     search_lengths = [4]
//!     [exact]
//!     AAAB = "B"
//! "#)?;
//!
//! let mut session = Session::new(Arc::new(catalog));
//! for label in ["A", "A", "A", "B"] {
//!     let symbol = session.parse_symbol(label)?;
//!     session = session.record(symbol).0;
//! }
//!
//! let next = session.predict();
//! assert_eq!(next.tracker_value().map(|v| v.as_str()), Some("B"));
//! # Ok::<(), streakql::StreakError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Core types
pub mod catalog;
pub mod counters;
pub mod error;
pub mod history;
pub mod shape;
pub mod symbol;

// Engines and session state
pub mod engine;
pub mod export;
pub mod log;
pub mod session;
pub mod telemetry;

// Re-export primary types at crate root for convenience
pub use catalog::{Catalog, CatalogConfig, CycleSequence, PredictedValue, SearchLengths};
pub use counters::CycleCounters;
pub use engine::{
    advance_cycle_counters, predict, MatchReason, Prediction, PredictionPair, Predictor,
    StructuralMatcher, Tracker,
};
pub use error::{CatalogError, ExportError, StreakError, StreakResult, ValidationError};
pub use export::{export_to_path, to_csv_string, write_csv};
pub use history::History;
pub use log::{LogEntry, LogTally, MatchStatus, SessionLog};
pub use session::{record, Session, SessionId};
pub use shape::{normalize, Shape};
pub use symbol::{Alphabet, Symbol};
