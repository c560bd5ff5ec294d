//! Coercion of presentation text into stat values.

use crate::error::ExtractError;
use crate::models::StatValue;

/// Values shorter than this (in characters) on the compare panel are numbers
pub const COMPARE_NUMERIC_MAX_LEN: usize = 5;

pub fn real(field: &str, text: &str) -> Result<f64, ExtractError> {
    let trimmed = text.trim();
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| ExtractError::MalformedNumber {
            field: field.to_string(),
            value: trimmed.to_string(),
        })
}

/// `"67%"` -> `67.0`
pub fn percentage(field: &str, text: &str) -> Result<f64, ExtractError> {
    let trimmed = text.trim();
    let value = real(field, trimmed.strip_suffix('%').unwrap_or(trimmed))?;
    if !(0.0..=100.0).contains(&value) {
        return Err(ExtractError::OutOfRange {
            field: field.to_string(),
            value,
        });
    }
    Ok(value)
}

pub fn looks_numeric(text: &str) -> bool {
    text.chars().next().is_some_and(char::is_numeric)
}

pub fn leading_digits(text: &str) -> Option<&str> {
    let end = text
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(text.len(), |(i, _)| i);
    (end > 0).then(|| &text[..end])
}

/// Short values are numbers, longer ones are descriptive (stance names, dates)
pub fn compare_value(field: &str, text: &str) -> Result<StatValue, ExtractError> {
    let trimmed = text.trim();
    if trimmed.chars().count() < COMPARE_NUMERIC_MAX_LEN {
        real(field, trimmed).map(StatValue::Number)
    } else {
        Ok(StatValue::Text(trimmed.to_string()))
    }
}

pub fn bio_value(field: &str, text: &str) -> Result<StatValue, ExtractError> {
    if looks_numeric(text) {
        real(field, text).map(StatValue::Number)
    } else {
        Ok(StatValue::Text(text.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn percentage_strips_sign() {
        assert_eq!(percentage("Striking accuracy", "67%").unwrap(), 67.0);
        assert_eq!(percentage("Takedown accuracy", " 0% ").unwrap(), 0.0);
        assert_eq!(percentage("x", "100").unwrap(), 100.0);
    }

    #[test]
    fn percentage_rejects_garbage_and_range() {
        assert!(matches!(
            percentage("x", "n/a%"),
            Err(ExtractError::MalformedNumber { .. })
        ));
        assert!(matches!(
            percentage("x", "140%"),
            Err(ExtractError::OutOfRange { value, .. }) if value == 140.0
        ));
    }

    #[test]
    fn real_rejects_non_numbers() {
        assert_eq!(real("Sig. Str. Landed", "4.12").unwrap(), 4.12);
        let err = real("Sig. Str. Landed", "four").unwrap_err();
        assert_eq!(err.to_string(), "malformed number for 'Sig. Str. Landed': \"four\"");
        assert!(real("x", "NaN").is_err());
    }

    #[test]
    fn compare_uses_length_heuristic() {
        assert_eq!(compare_value("Reach", "73").unwrap(), StatValue::Number(73.0));
        assert_eq!(compare_value("x", " 4.12 ").unwrap(), StatValue::Number(4.12));
        assert_eq!(
            compare_value("Stance", "Orthodox").unwrap(),
            StatValue::Text("Orthodox".to_string())
        );
        assert_eq!(
            compare_value("Average fight time", "14:55").unwrap(),
            StatValue::Text("14:55".to_string())
        );
        assert!(compare_value("x", "N/A").is_err());
    }

    #[test]
    fn leading_digits_ignores_suffix() {
        assert_eq!(leading_digits("12 of 20"), Some("12"));
        assert_eq!(leading_digits("7"), Some("7"));
        assert_eq!(leading_digits("(45%)"), None);
        assert_eq!(leading_digits(""), None);
    }

    #[test]
    fn bio_coerces_only_numeric_prefix() {
        assert_eq!(bio_value("Age", "34").unwrap(), StatValue::Number(34.0));
        assert_eq!(bio_value("Height", "72.00").unwrap(), StatValue::Number(72.0));
        assert_eq!(
            bio_value("Hometown", "Rochester, United States").unwrap(),
            StatValue::Text("Rochester, United States".to_string())
        );
        assert!(bio_value("Height", "5'11\"").is_err());
    }

    #[test]
    fn looks_numeric_checks_first_char() {
        assert!(looks_numeric("1 of 2"));
        assert!(!looks_numeric("Active"));
        assert!(!looks_numeric(""));
    }

    proptest! {
        #[test]
        fn percentage_in_range(n in 0u32..=100) {
            let value = percentage("p", &format!("{n}%")).unwrap();
            prop_assert!((0.0..=100.0).contains(&value));
            prop_assert_eq!(value, f64::from(n));
        }
    }
}
