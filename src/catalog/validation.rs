//! Catalog validation.
//!
//! Catalogs are author-supplied data. Anything that would make a lookup
//! misbehave later (an empty cycle, a blank key) is rejected here, once, at
//! load time.

use crate::error::ValidationError;

/// Validate a literal or shape rule key.
pub(crate) fn validate_rule_key(table: &'static str, key: &str) -> Result<(), ValidationError> {
    if key.trim().is_empty() {
        return Err(ValidationError::EmptyRuleKey { table });
    }
    Ok(())
}

/// Validate a prediction string.
pub(crate) fn validate_prediction(
    table: &'static str,
    key: &str,
    value: &str,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyPrediction {
            table,
            key: key.to_string(),
        });
    }
    Ok(())
}

/// Validate a structural key: decimal first-occurrence indices.
///
/// With at most ten symbols every index is one digit, so the key must be
/// canonical: it starts at `0`, each new index is exactly one more than the
/// largest seen so far, and no index reaches `symbols`. Larger alphabets can
/// produce multi-digit indices; a key containing `10` is then ambiguous and
/// only its characters are checked.
pub(crate) fn validate_shape_key(key: &str, symbols: usize) -> Result<(), ValidationError> {
    validate_rule_key("structural", key)?;

    if let Some(bad) = key.chars().find(|c| !c.is_ascii_digit()) {
        return Err(ValidationError::InvalidShapeKey {
            key: key.to_string(),
            reason: format!("unexpected character '{bad}'"),
        });
    }

    let single_digit = symbols <= 10;
    if !single_digit && key.len() > 10 && key.contains("10") {
        return Ok(());
    }

    let mut next: u32 = 0;
    for c in key.chars() {
        let idx = c.to_digit(10).unwrap_or_default();
        if single_digit && idx as usize >= symbols {
            return Err(ValidationError::InvalidShapeKey {
                key: key.to_string(),
                reason: format!("index {idx} needs more than {symbols} symbols"),
            });
        }
        if idx > next {
            return Err(ValidationError::InvalidShapeKey {
                key: key.to_string(),
                reason: format!("index {idx} appears before index {next}"),
            });
        }
        if idx == next {
            next += 1;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_key_rejects_blank() {
        assert!(matches!(
            validate_rule_key("exact", "  "),
            Err(ValidationError::EmptyRuleKey { table: "exact" })
        ));
        assert!(validate_rule_key("exact", "AAAB").is_ok());
    }

    #[test]
    fn test_prediction_rejects_blank() {
        assert!(matches!(
            validate_prediction("cycle", "AB", ""),
            Err(ValidationError::EmptyPrediction { .. })
        ));
        assert!(validate_prediction("cycle", "AB", "X").is_ok());
    }

    #[test]
    fn test_shape_key_accepts_canonical() {
        assert!(validate_shape_key("011010000011", 4).is_ok());
        assert!(validate_shape_key("000001100101", 2).is_ok());
        assert!(validate_shape_key("0102", 3).is_ok());
    }

    #[test]
    fn test_shape_key_rejects_non_digits() {
        let err = validate_shape_key("01a0", 4).unwrap_err();
        assert!(format!("{err}").contains("unexpected character 'a'"));
    }

    #[test]
    fn test_shape_key_rejects_non_canonical() {
        assert!(validate_shape_key("1000", 4).is_err());
        assert!(validate_shape_key("0200", 4).is_err());
        // Twelve characters containing "10" are still checked for small alphabets.
        let err = validate_shape_key("100000000000", 4).unwrap_err();
        assert!(format!("{err}").contains("index 1 appears before index 0"));
    }

    #[test]
    fn test_shape_key_rejects_index_beyond_alphabet() {
        let err = validate_shape_key("012345678910", 4).unwrap_err();
        assert!(format!("{err}").contains("index 4 needs more than 4 symbols"));
        assert!(validate_shape_key("0120", 2).is_err());
    }

    #[test]
    fn test_shape_key_multi_digit_indices_with_large_alphabet() {
        assert!(validate_shape_key("012345678910", 11).is_ok());
        assert!(validate_shape_key("0213", 11).is_err());
    }
}
