use thiserror::Error;

use super::mood::UnknownMood;

pub const MIN_SCORE: i64 = 1;
pub const MAX_SCORE: i64 = 10;

/// Input that breaks a business rule before it ever reaches the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleViolation {
    #[error("score {0} is outside 1..=10")]
    ScoreOutOfRange(i64),
    #[error("category weight {weight} is outside {min}..={max}")]
    CategoryWeightOutOfRange { weight: i64, min: i64, max: i64 },
    #[error("{0} must not be blank")]
    Blank(&'static str),
    #[error("year {0} is not a positive release year")]
    InvalidYear(i64),
    #[error(transparent)]
    Mood(#[from] UnknownMood),
}

/// Film log ratings and rubric ratings share the same inclusive 1-10 scale.
pub fn check_score(score: i64) -> Result<i64, RuleViolation> {
    if (MIN_SCORE..=MAX_SCORE).contains(&score) {
        Ok(score)
    } else {
        Err(RuleViolation::ScoreOutOfRange(score))
    }
}

pub fn check_not_blank<'a>(field: &'static str, value: &'a str) -> Result<&'a str, RuleViolation> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(RuleViolation::Blank(field))
    } else {
        Ok(trimmed)
    }
}

pub fn check_year(year: i64) -> Result<i64, RuleViolation> {
    if year > 0 {
        Ok(year)
    } else {
        Err(RuleViolation::InvalidYear(year))
    }
}
