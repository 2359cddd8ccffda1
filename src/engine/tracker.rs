//! Engine 1: literal window matching over exact and cycle rules.

use tracing::debug;

use crate::catalog::Catalog;
use crate::counters::CycleCounters;
use crate::history::History;

use super::{MatchReason, Prediction, Predictor};

/// Literal-window engine.
///
/// Search order:
/// - Window lengths are tried longest first, as configured by the catalog.
///   Lengths longer than the history are skipped.
/// - Within one length the exact table is consulted before the cycle table.
/// - The first hit wins; shorter windows are not examined.
#[derive(Debug, Default, Clone, Copy)]
pub struct Tracker;

impl Predictor for Tracker {
    fn name(&self) -> &'static str {
        "tracker"
    }

    fn predict(
        &self,
        catalog: &Catalog,
        history: &History,
        counters: &CycleCounters,
    ) -> Option<Prediction> {
        for &length in catalog.search_lengths() {
            let Some(key) = history.tail_key(length) else {
                continue;
            };

            if let Some(value) = catalog.exact(&key) {
                debug!(engine = self.name(), length, key = %key, "exact rule fired");
                return Some(Prediction {
                    value: value.clone(),
                    reason: MatchReason::Exact { length },
                });
            }

            if let Some(cycle) = catalog.cycle(&key) {
                let position = cycle.position(counters.get(&key));
                debug!(engine = self.name(), length, key = %key, position, "cycle rule fired");
                return Some(Prediction {
                    value: cycle.step(position).clone(),
                    reason: MatchReason::Cycle {
                        length,
                        key,
                        position,
                    },
                });
            }
        }
        None
    }
}

/// Advances the counter of every cycle key matched by the current history.
///
/// Called once per recorded symbol, before that symbol is appended. Unlike
/// prediction this does not stop at the first hit: every length at which some
/// cycle key exists is checked, whether or not it is a search length, and
/// every matching cycle key is counted. Labels are non-empty, so windows of
/// different lengths always produce different keys.
/// Returns the keys that were advanced, longest window first.
pub fn advance_cycle_counters(
    catalog: &Catalog,
    history: &History,
    counters: &mut CycleCounters,
) -> Vec<String> {
    let mut advanced: Vec<String> = Vec::new();

    for &length in catalog.cycle_lengths() {
        let Some(key) = history.tail_key(length) else {
            continue;
        };
        if catalog.cycle(&key).is_none() {
            continue;
        }
        counters.increment(&key);
        advanced.push(key);
    }

    advanced
}
