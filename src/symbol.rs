//! Outcome symbols and the closed alphabet they are drawn from.
//!
//! A [`Symbol`] is one recorded outcome category. Symbols are opaque labels;
//! the only thing the engines ever do with them is compare for equality and
//! concatenate labels into literal rule keys.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// One discrete outcome category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Creates a symbol from a label.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptySymbol` for an empty (or all-whitespace)
    /// label and `ValidationError::InvalidSymbolLabel` when the label contains
    /// whitespace or a comma.
    pub fn new(label: impl Into<String>) -> Result<Self, ValidationError> {
        let label = label.into();
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptySymbol);
        }
        if trimmed.chars().any(|c| c.is_whitespace() || c == ',') {
            return Err(ValidationError::InvalidSymbolLabel {
                label: trimmed.to_string(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the label.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl<'de> Deserialize<'de> for Symbol {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Symbol::new(raw).map_err(serde::de::Error::custom)
    }
}

/// The closed, ordered set of symbols a catalog accepts.
///
/// - Empty alphabets are rejected.
/// - Duplicate labels are rejected (a duplicate usually means a typo).
/// - No label may start with another label. Rule keys are labels joined
///   together, so a prefix pair would let two different windows spell the
///   same key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Alphabet(Vec<Symbol>);

impl Alphabet {
    /// Labels of the four default outcome categories:
    /// small/big size tier crossed with red/green colour tier.
    pub const DEFAULT_LABELS: [&'static str; 4] = ["SR", "SG", "BR", "BG"];

    /// Construct a validated alphabet.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyAlphabet`,
    /// `ValidationError::DuplicateSymbol`, or
    /// `ValidationError::AmbiguousSymbol`.
    pub fn new(symbols: Vec<Symbol>) -> Result<Self, ValidationError> {
        if symbols.is_empty() {
            return Err(ValidationError::EmptyAlphabet);
        }

        let mut seen: HashSet<&Symbol> = HashSet::with_capacity(symbols.len());
        for symbol in &symbols {
            if !seen.insert(symbol) {
                return Err(ValidationError::DuplicateSymbol {
                    label: symbol.to_string(),
                });
            }
        }

        for (i, a) in symbols.iter().enumerate() {
            for b in &symbols[i + 1..] {
                let (short, long) = if a.as_str().len() <= b.as_str().len() {
                    (a, b)
                } else {
                    (b, a)
                };
                if long.as_str().starts_with(short.as_str()) {
                    return Err(ValidationError::AmbiguousSymbol {
                        label: long.to_string(),
                        prefix: short.to_string(),
                    });
                }
            }
        }

        Ok(Self(symbols))
    }

    /// Builds an alphabet from string labels.
    ///
    /// # Errors
    ///
    /// Propagates label and alphabet validation errors.
    pub fn from_labels<I, S>(labels: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let symbols = labels
            .into_iter()
            .map(Symbol::new)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(symbols)
    }

    /// Parses user input into a member of this alphabet.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::UnknownSymbol` when the trimmed label is not
    /// declared.
    pub fn parse(&self, label: &str) -> Result<Symbol, ValidationError> {
        let trimmed = label.trim();
        self.0
            .iter()
            .find(|s| s.as_str() == trimmed)
            .cloned()
            .ok_or_else(|| ValidationError::UnknownSymbol {
                label: trimmed.to_string(),
                expected: self.to_string(),
            })
    }

    /// Number of symbols a literal key spells, or `None` if the key is not a
    /// concatenation of labels from this alphabet.
    ///
    /// No label is a prefix of another, so at most one label can start the
    /// remaining text and the split is unique.
    #[must_use]
    pub fn key_length(&self, key: &str) -> Option<usize> {
        let mut rest = key;
        let mut count = 0;
        while !rest.is_empty() {
            let symbol = self.0.iter().find(|s| rest.starts_with(s.as_str()))?;
            rest = &rest[symbol.as_str().len()..];
            count += 1;
        }
        Some(count)
    }

    /// Returns the symbols in declaration order.
    #[must_use]
    pub fn as_slice(&self) -> &[Symbol] {
        &self.0
    }

    /// Number of symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a validated alphabet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self(
            Self::DEFAULT_LABELS
                .iter()
                .map(|l| Symbol((*l).to_string()))
                .collect(),
        )
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, s) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{s}")?;
        }
        Ok(())
    }
}

impl<'de> Deserialize<'de> for Alphabet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = Vec::<Symbol>::deserialize(deserializer)?;
        Alphabet::new(raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_trims_label() {
        let s = Symbol::new("  SR ").unwrap();
        assert_eq!(s.as_str(), "SR");
        assert_eq!(format!("{s}"), "SR");
    }

    #[test]
    fn test_symbol_rejects_empty_and_separators() {
        assert!(matches!(Symbol::new("   "), Err(ValidationError::EmptySymbol)));
        assert!(matches!(
            Symbol::new("S R"),
            Err(ValidationError::InvalidSymbolLabel { .. })
        ));
        assert!(matches!(
            Symbol::new("S,R"),
            Err(ValidationError::InvalidSymbolLabel { .. })
        ));
    }

    #[test]
    fn test_default_alphabet() {
        let alphabet = Alphabet::default();
        assert_eq!(alphabet.len(), 4);
        assert_eq!(format!("{alphabet}"), "SR, SG, BR, BG");
        assert!(alphabet.parse("BG").is_ok());
    }

    #[test]
    fn test_alphabet_parse_unknown() {
        let alphabet = Alphabet::default();
        let err = alphabet.parse("XX").unwrap_err();
        assert!(matches!(err, ValidationError::UnknownSymbol { ref label, .. } if label == "XX"));
    }

    #[test]
    fn test_alphabet_parse_is_case_sensitive() {
        let alphabet = Alphabet::default();
        assert!(alphabet.parse("sr").is_err());
        assert_eq!(alphabet.parse(" SR\n").unwrap().as_str(), "SR");
    }

    #[test]
    fn test_alphabet_rejects_duplicates() {
        let err = Alphabet::from_labels(["A", "B", "A"]).unwrap_err();
        assert!(matches!(err, ValidationError::DuplicateSymbol { ref label } if label == "A"));
    }

    #[test]
    fn test_alphabet_rejects_prefix_labels() {
        let err = Alphabet::from_labels(["A", "AB", "BA"]).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::AmbiguousSymbol { ref label, ref prefix } if label == "AB" && prefix == "A"
        ));

        // Order of declaration does not matter.
        let err = Alphabet::from_labels(["BG", "B"]).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::AmbiguousSymbol { ref label, ref prefix } if label == "BG" && prefix == "B"
        ));

        assert!(serde_json::from_str::<Alphabet>(r#"["A","AB","BA"]"#).is_err());
        assert!(Alphabet::from_labels(["AB", "BA", "C"]).is_ok());
    }

    #[test]
    fn test_alphabet_key_length() {
        let alphabet = Alphabet::default();
        assert_eq!(alphabet.key_length("BRBRBRBGSGSR"), Some(6));
        assert_eq!(alphabet.key_length("SR"), Some(1));
        assert_eq!(alphabet.key_length("GGGRRGGGGG"), None);
        assert_eq!(alphabet.key_length("SRB"), None);
    }

    #[test]
    fn test_alphabet_rejects_empty() {
        let err = Alphabet::from_labels(Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, ValidationError::EmptyAlphabet));
    }

    #[test]
    fn test_alphabet_deserialize_validates() {
        let ok: Alphabet = serde_json::from_str(r#"["A","B"]"#).unwrap();
        assert_eq!(ok.len(), 2);
        assert!(serde_json::from_str::<Alphabet>(r#"["A","A"]"#).is_err());
        assert!(serde_json::from_str::<Alphabet>("[]").is_err());
    }
}
