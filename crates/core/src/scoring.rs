//! Score entry rules: type tags, value parsing, and semester constraints.
//!
//! A score value may arrive as a JSON number or as a string-encoded number
//! ("8.5"); both are parsed here before range checking so the storage layer
//! only ever sees a validated `f64`.

use serde_json::Value;

pub const SCORE_MIN: f64 = 0.0;
pub const SCORE_MAX: f64 = 10.0;

/// Semester used when the request omits one.
pub const DEFAULT_SEMESTER: i32 = 1;

pub const SCORE_TYPE_REGULAR: &str = "REGULAR";
pub const SCORE_TYPE_MIDTERM: &str = "MIDTERM";
pub const SCORE_TYPE_FINAL: &str = "FINAL";

pub const VALID_SCORE_TYPES: &[&str] =
    &[SCORE_TYPE_REGULAR, SCORE_TYPE_MIDTERM, SCORE_TYPE_FINAL];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreType {
    Regular,
    Midterm,
    Final,
}

impl ScoreType {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s {
            SCORE_TYPE_REGULAR => Ok(Self::Regular),
            SCORE_TYPE_MIDTERM => Ok(Self::Midterm),
            SCORE_TYPE_FINAL => Ok(Self::Final),
            _ => Err(format!(
                "Invalid score type '{s}'. Must be one of: {}",
                VALID_SCORE_TYPES.join(", ")
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Regular => SCORE_TYPE_REGULAR,
            Self::Midterm => SCORE_TYPE_MIDTERM,
            Self::Final => SCORE_TYPE_FINAL,
        }
    }
}

/// Parse a raw JSON score value into an `f64`.
///
/// Accepts numbers and string-encoded numbers; anything else is rejected.
/// Range checking is a separate step ([`validate_score_value`]) so callers
/// can report parse and range failures distinctly.
pub fn parse_score_value(raw: &Value) -> Result<f64, String> {
    match raw {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| format!("Score value {n} is not representable")),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("Score value '{s}' is not a number")),
        _ => Err("Score value must be a number".to_string()),
    }
}

/// Check a score value against the inclusive [0, 10] range.
pub fn validate_score_value(value: f64) -> Result<(), String> {
    if !value.is_finite() || value < SCORE_MIN || value > SCORE_MAX {
        return Err("Score value must be between 0 and 10".to_string());
    }
    Ok(())
}

/// Check a semester indicator; only semesters 1 and 2 exist.
pub fn validate_semester(semester: i32) -> Result<(), String> {
    if semester == 1 || semester == 2 {
        Ok(())
    } else {
        Err("Semester must be 1 or 2".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_accepts_json_numbers() {
        assert_eq!(parse_score_value(&json!(8.5)).unwrap(), 8.5);
        assert_eq!(parse_score_value(&json!(0)).unwrap(), 0.0);
    }

    #[test]
    fn parse_accepts_string_encoded_numbers() {
        assert_eq!(parse_score_value(&json!("10")).unwrap(), 10.0);
        assert_eq!(parse_score_value(&json!(" 7.25 ")).unwrap(), 7.25);
        assert_eq!(parse_score_value(&json!("-1")).unwrap(), -1.0);
    }

    #[test]
    fn parse_rejects_non_numeric_input() {
        assert!(parse_score_value(&json!("ten")).is_err());
        assert!(parse_score_value(&json!(null)).is_err());
        assert!(parse_score_value(&json!([8.5])).is_err());
    }

    #[test]
    fn range_check_is_inclusive_at_both_ends() {
        assert!(validate_score_value(0.0).is_ok());
        assert!(validate_score_value(10.0).is_ok());
        assert!(validate_score_value(-0.1).is_err());
        assert!(validate_score_value(10.1).is_err());
    }

    #[test]
    fn range_check_rejects_non_finite() {
        assert!(validate_score_value(f64::NAN).is_err());
        assert!(validate_score_value(f64::INFINITY).is_err());
    }

    #[test]
    fn score_type_round_trips() {
        for s in VALID_SCORE_TYPES {
            assert_eq!(ScoreType::parse(s).unwrap().as_str(), *s);
        }
        assert!(ScoreType::parse("QUIZ").is_err());
    }

    #[test]
    fn semester_must_be_one_or_two() {
        assert!(validate_semester(1).is_ok());
        assert!(validate_semester(2).is_ok());
        assert!(validate_semester(0).is_err());
        assert!(validate_semester(3).is_err());
    }
}
