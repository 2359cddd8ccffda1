//! Error types for StreakQL.
//!
//! All errors in StreakQL are strongly typed using thiserror.
//! A missing prediction is never an error; failures only come from
//! malformed catalogs, unknown input symbols, and export I/O.

use std::path::PathBuf;

use thiserror::Error;

/// Validation errors raised while building a catalog or parsing input.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Unknown symbol '{label}' (expected one of: {expected})")]
    UnknownSymbol {
        label: String,
        expected: String,
    },

    #[error("Symbol label cannot be empty")]
    EmptySymbol,

    #[error("Symbol label '{label}' contains whitespace or a comma")]
    InvalidSymbolLabel {
        label: String,
    },

    #[error("Symbol '{label}' is declared more than once in the alphabet")]
    DuplicateSymbol {
        label: String,
    },

    #[error("Symbol '{label}' starts with symbol '{prefix}'; keys built from them would be ambiguous")]
    AmbiguousSymbol {
        label: String,
        prefix: String,
    },

    #[error("Alphabet cannot be empty")]
    EmptyAlphabet,

    #[error("Prediction cannot be empty")]
    BlankPrediction,

    #[error("Cycle rule '{key}' has an empty repeat list")]
    EmptyCycle {
        key: String,
    },

    #[error("{table} rule key cannot be empty")]
    EmptyRuleKey {
        table: &'static str,
    },

    #[error("{table} rule '{key}' has an empty prediction")]
    EmptyPrediction {
        table: &'static str,
        key: String,
    },

    #[error("Structural rule key '{key}' is not a shape string: {reason}")]
    InvalidShapeKey {
        key: String,
        reason: String,
    },

    #[error("Search lengths cannot be empty")]
    EmptySearchLengths,

    #[error("Window length must be greater than zero ({field})")]
    ZeroWindow {
        field: &'static str,
    },
}

/// Errors raised while reading a catalog from disk or text.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog: {source}")]
    Parse {
        #[source]
        source: toml::de::Error,
    },
}

/// Errors raised while exporting the session log.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write export: {0}")]
    Csv(#[from] csv::Error),

    #[error("Export I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Top-level error type for StreakQL.
#[derive(Debug, Error)]
pub enum StreakError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),
}

impl StreakError {
    /// Returns true if this is a validation error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if this is a catalog loading error.
    #[must_use]
    pub const fn is_catalog(&self) -> bool {
        matches!(self, Self::Catalog(_))
    }

    /// Returns true if this is an export error.
    #[must_use]
    pub const fn is_export(&self) -> bool {
        matches!(self, Self::Export(_))
    }
}

/// Result type alias for StreakQL operations.
pub type StreakResult<T> = Result<T, StreakError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_unknown_symbol() {
        let err = ValidationError::UnknownSymbol {
            label: "XX".to_string(),
            expected: "SR, SG".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("XX"));
        assert!(msg.contains("SR, SG"));
    }

    #[test]
    fn test_validation_error_empty_cycle() {
        let err = ValidationError::EmptyCycle {
            key: "GGGRRGGGGG".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("GGGRRGGGGG"));
        assert!(msg.contains("empty repeat list"));
    }

    #[test]
    fn test_validation_error_empty_prediction() {
        let err = ValidationError::EmptyPrediction {
            table: "exact",
            key: "AAAB".to_string(),
        };
        assert_eq!(format!("{err}"), "exact rule 'AAAB' has an empty prediction");
    }

    #[test]
    fn test_validation_error_ambiguous_symbol() {
        let err = ValidationError::AmbiguousSymbol {
            label: "AB".to_string(),
            prefix: "A".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("'AB' starts with symbol 'A'"));
    }

    #[test]
    fn test_streak_error_from_validation() {
        let err: StreakError = ValidationError::EmptyAlphabet.into();
        assert!(err.is_validation());
        assert!(!err.is_catalog());
        assert!(!err.is_export());
    }

    #[test]
    fn test_streak_error_from_catalog() {
        let parse = toml::from_str::<toml::Value>("alphabet = [").unwrap_err();
        let err: StreakError = CatalogError::Parse { source: parse }.into();
        assert!(err.is_catalog());
        assert!(format!("{err}").contains("Failed to parse catalog"));
    }

    #[test]
    fn test_streak_error_from_export() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let err: StreakError = ExportError::from(io).into();
        assert!(err.is_export());
        assert!(format!("{err}").contains("disk full"));
    }
}
