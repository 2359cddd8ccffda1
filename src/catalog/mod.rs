//! Static pattern tables.
//!
//! A [`Catalog`] holds the three author-supplied tables the engines consult:
//! exact rules, cycle rules, and structural rules. It is validated once when
//! built and never mutated afterwards; sessions share it behind an `Arc`.

/// On-disk catalog format.
pub mod config;
/// Rule value types.
pub mod rules;
/// Load-time validation.
mod validation;

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::{CatalogError, StreakResult, ValidationError};
use crate::symbol::Alphabet;

pub use config::CatalogConfig;
pub use rules::{CycleSequence, PredictedValue, SearchLengths};

/// Catalog shipped with the crate.
pub const BUILTIN_CATALOG: &str = include_str!("../../catalogs/default.toml");

/// Immutable, validated set of pattern tables.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    alphabet: Alphabet,
    search_lengths: SearchLengths,
    structural_window: usize,
    cycle_lengths: Vec<usize>,
    exact: BTreeMap<String, PredictedValue>,
    cycles: BTreeMap<String, CycleSequence>,
    structural: BTreeMap<String, PredictedValue>,
}

impl Catalog {
    /// Validates a raw configuration into a catalog.
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` found: blank keys or predictions,
    /// empty cycles, malformed shape keys, or bad window lengths.
    pub fn from_config(config: CatalogConfig) -> Result<Self, ValidationError> {
        let search_lengths = SearchLengths::new(config.search_lengths)?;
        if config.structural_window == 0 {
            return Err(ValidationError::ZeroWindow {
                field: "structural_window",
            });
        }

        let mut exact = BTreeMap::new();
        for (key, value) in config.exact {
            validation::validate_rule_key("exact", &key)?;
            validation::validate_prediction("exact", &key, &value)?;
            exact.insert(key, PredictedValue::new(value));
        }

        let mut cycles = BTreeMap::new();
        let mut cycle_lengths = BTreeSet::new();
        for (key, steps) in config.cycles {
            validation::validate_rule_key("cycle", &key)?;
            for step in &steps {
                validation::validate_prediction("cycle", &key, step)?;
            }
            let steps = steps.into_iter().map(PredictedValue::new).collect();
            let cycle = CycleSequence::new(&key, steps)?;
            if exact.contains_key(&key) {
                warn!(key = %key, "key is both an exact and a cycle rule; exact takes priority");
            }
            match config.alphabet.key_length(&key) {
                Some(length) => {
                    cycle_lengths.insert(length);
                }
                None => debug!(key = %key, "cycle key is not spelled by the alphabet; rule can never fire"),
            }
            cycles.insert(key, cycle);
        }

        let mut structural = BTreeMap::new();
        for (key, value) in config.structural {
            validation::validate_shape_key(&key, config.alphabet.len())?;
            validation::validate_prediction("structural", &key, &value)?;
            if config.alphabet.len() <= 10 && key.len() != config.structural_window {
                warn!(
                    key = %key,
                    window = config.structural_window,
                    "structural key length differs from the window; rule can never fire"
                );
            }
            structural.insert(key, PredictedValue::new(value));
        }

        let catalog = Self {
            alphabet: config.alphabet,
            search_lengths,
            structural_window: config.structural_window,
            cycle_lengths: cycle_lengths.into_iter().rev().collect(),
            exact,
            cycles,
            structural,
        };
        info!(
            symbols = catalog.alphabet.len(),
            exact = catalog.exact.len(),
            cycles = catalog.cycles.len(),
            structural = catalog.structural.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Parses and validates a TOML catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` for malformed TOML and a validation
    /// error for well-formed but invalid tables.
    pub fn from_toml_str(text: &str) -> StreakResult<Self> {
        let config: CatalogConfig =
            toml::from_str(text).map_err(|source| CatalogError::Parse { source })?;
        Ok(Self::from_config(config)?)
    }

    /// Reads a TOML catalog from disk.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Io` if the file cannot be read, otherwise the
    /// errors of [`Catalog::from_toml_str`].
    pub fn from_path(path: impl AsRef<Path>) -> StreakResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// The catalog bundled with the crate.
    ///
    /// # Errors
    ///
    /// Only fails if the bundled file itself is broken.
    pub fn builtin() -> StreakResult<Self> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    /// Accepted input symbols.
    #[must_use]
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Engine-1 window lengths, longest first.
    #[must_use]
    pub fn search_lengths(&self) -> &[usize] {
        self.search_lengths.as_slice()
    }

    /// Engine-2 window length.
    #[must_use]
    pub fn structural_window(&self) -> usize {
        self.structural_window
    }

    /// Distinct window lengths, longest first, at which some cycle key can
    /// match. Independent of the search lengths.
    #[must_use]
    pub fn cycle_lengths(&self) -> &[usize] {
        &self.cycle_lengths
    }

    /// Exact rule prediction for a literal key.
    #[must_use]
    pub fn exact(&self, key: &str) -> Option<&PredictedValue> {
        self.exact.get(key)
    }

    /// Cycle rule for a literal key.
    #[must_use]
    pub fn cycle(&self, key: &str) -> Option<&CycleSequence> {
        self.cycles.get(key)
    }

    /// Structural rule prediction for a shape key.
    #[must_use]
    pub fn structural(&self, shape: &str) -> Option<&PredictedValue> {
        self.structural.get(shape)
    }

    /// All exact rules, ordered by key.
    pub fn exact_rules(&self) -> impl Iterator<Item = (&str, &PredictedValue)> {
        self.exact.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// All cycle rules, ordered by key.
    pub fn cycle_rules(&self) -> impl Iterator<Item = (&str, &CycleSequence)> {
        self.cycles.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// All structural rules, ordered by key.
    pub fn structural_rules(&self) -> impl Iterator<Item = (&str, &PredictedValue)> {
        self.structural.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Total number of rules across all three tables.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.exact.len() + self.cycles.len() + self.structural.len()
    }
}
