//! On-disk catalog format.
//!
//! A catalog file is TOML:
//!
//! ```toml
//! alphabet = ["SR", "SG", "BR", "BG"]
//! search_lengths = [12, 11, 10, 8, 7, 6, 4]
//! structural_window = 12
//!
//! [exact]
//! "BRBRBRBGSGSR" = "BG"
//!
//! [cycles]
//! "GGGRRGGGGG" = ["G", "G", "R"]
//!
//! [structural]
//! "011010000011" = "R"
//! ```
//!
//! Every field is optional; omitted tables are empty and omitted scalars take
//! the defaults used by the bundled catalog.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::rules::{DEFAULT_SEARCH_LENGTHS, DEFAULT_STRUCTURAL_WINDOW};
use crate::symbol::Alphabet;

/// Raw, unvalidated catalog as deserialized from TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    /// Accepted input symbols.
    #[serde(default)]
    pub alphabet: Alphabet,

    /// Engine-1 window lengths (any order; normalized longest first).
    #[serde(default = "default_search_lengths")]
    pub search_lengths: Vec<usize>,

    /// Engine-2 window length.
    #[serde(default = "default_structural_window")]
    pub structural_window: usize,

    /// Literal key to single prediction.
    #[serde(default)]
    pub exact: BTreeMap<String, String>,

    /// Literal key to repeating prediction list.
    #[serde(default)]
    pub cycles: BTreeMap<String, Vec<String>>,

    /// Shape key to prediction.
    #[serde(default)]
    pub structural: BTreeMap<String, String>,
}

fn default_search_lengths() -> Vec<usize> {
    DEFAULT_SEARCH_LENGTHS.to_vec()
}

fn default_structural_window() -> usize {
    DEFAULT_STRUCTURAL_WINDOW
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            alphabet: Alphabet::default(),
            search_lengths: default_search_lengths(),
            structural_window: default_structural_window(),
            exact: BTreeMap::new(),
            cycles: BTreeMap::new(),
            structural: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: CatalogConfig = toml::from_str("").unwrap();
        assert_eq!(config, CatalogConfig::default());
        assert_eq!(config.search_lengths, DEFAULT_SEARCH_LENGTHS.to_vec());
        assert_eq!(config.structural_window, 12);
    }

    #[test]
    fn test_parses_all_tables() {
        let config: CatalogConfig = toml::from_str(
            r#"
            alphabet = ["A", "B"]
            search_lengths = [4, 2]
            structural_window = 3

            [exact]
            AAAB = "B"

            [cycles]
            AB = ["X", "Y", "Z"]

            [structural]
            "010" = "A"
            "#,
        )
        .unwrap();

        assert_eq!(config.alphabet.len(), 2);
        assert_eq!(config.search_lengths, vec![4, 2]);
        assert_eq!(config.exact.get("AAAB").map(String::as_str), Some("B"));
        assert_eq!(config.cycles.get("AB").map(Vec::len), Some(3));
        assert_eq!(config.structural.get("010").map(String::as_str), Some("A"));
    }

    #[test]
    fn test_rejects_unknown_fields() {
        assert!(toml::from_str::<CatalogConfig>("rules = 1").is_err());
    }
}
