//! Validation rules for reference data (academic years, grades).

use chrono::NaiveDate;

pub const GRADE_LEVEL_MIN: i32 = 1;
pub const GRADE_LEVEL_MAX: i32 = 20;

/// An academic year must start strictly before it ends.
pub fn validate_year_dates(start: NaiveDate, end: NaiveDate) -> Result<(), String> {
    if start >= end {
        return Err("Start date must be before end date".to_string());
    }
    Ok(())
}

/// Grade levels are bounded to a sane range.
pub fn validate_grade_level(level: i32) -> Result<(), String> {
    if !(GRADE_LEVEL_MIN..=GRADE_LEVEL_MAX).contains(&level) {
        return Err(format!(
            "Grade level must be between {GRADE_LEVEL_MIN} and {GRADE_LEVEL_MAX}"
        ));
    }
    Ok(())
}
