//! Engine 2: shape matching over a fixed trailing window.

use tracing::debug;

use crate::catalog::Catalog;
use crate::counters::CycleCounters;
use crate::history::History;
use crate::shape::normalize;

use super::{MatchReason, Prediction, Predictor};

/// Shape engine. Only the catalog's structural window length is evaluated.
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuralMatcher;

impl Predictor for StructuralMatcher {
    fn name(&self) -> &'static str {
        "structural"
    }

    fn predict(
        &self,
        catalog: &Catalog,
        history: &History,
        _counters: &CycleCounters,
    ) -> Option<Prediction> {
        let window = history.tail(catalog.structural_window())?;
        let shape = normalize(window);
        let value = catalog.structural(shape.as_str())?;
        debug!(engine = self.name(), shape = %shape, "structural rule fired");
        Some(Prediction {
            value: value.clone(),
            reason: MatchReason::Structural {
                shape: shape.into_string(),
            },
        })
    }
}
