use crate::config::settings::RubricSettings;

use super::rules::RuleViolation;

/// Sum of category weights; zero for an empty rubric.
pub fn total_weight(weights: &[i64]) -> i64 {
    weights.iter().sum()
}

/// A rubric only produces meaningful scores once its weights add up to the target.
/// Writes never enforce this, so callers check before trusting a score.
pub fn is_valid(weights: &[i64], settings: &RubricSettings) -> bool {
    total_weight(weights) == settings.target_total_weight
}

pub fn check_category_weight(weight: i64, settings: &RubricSettings) -> Result<i64, RuleViolation> {
    let (min, max) = (settings.min_category_weight, settings.max_category_weight);
    if (min..=max).contains(&weight) {
        Ok(weight)
    } else {
        Err(RuleViolation::CategoryWeightOutOfRange { weight, min, max })
    }
}
