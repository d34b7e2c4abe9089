use std::cmp::Ordering;

/// One rubric rating joined with the category it scores.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedRating {
    pub rubric_id: i64,
    pub rating: i64,
    pub weight: i64,
}

#[derive(Debug)]
struct RubricGroup {
    rubric_id: i64,
    total_weighted: i64,
    total_weight: i64,
}

/// `sum(rating * weight) / sum(weight)` per rubric, rounded to one decimal.
///
/// Ratings may span several rubrics. Groups keep the order in which their first
/// rating arrives and the first group with positive weight is returned.
pub fn weighted_score(ratings: &[WeightedRating]) -> Option<f64> {
    let mut groups: Vec<RubricGroup> = Vec::new();

    for rating in ratings {
        let position = match groups.iter().position(|g| g.rubric_id == rating.rubric_id) {
            Some(position) => position,
            None => {
                groups.push(RubricGroup {
                    rubric_id: rating.rubric_id,
                    total_weighted: 0,
                    total_weight: 0,
                });
                groups.len() - 1
            }
        };
        let group = &mut groups[position];
        group.total_weighted += rating.rating * rating.weight;
        group.total_weight += rating.weight;
    }

    groups
        .iter()
        .find(|g| g.total_weight > 0)
        .map(|g| round_to_tenth(g.total_weighted, g.total_weight))
}

/// Rounds `numerator / denominator` to one decimal the way `round(x, 1)` does
/// on the nearest double: the binary value is compared exactly against the
/// halfway point and exact ties go to the even tenth.
fn round_to_tenth(numerator: i64, denominator: i64) -> f64 {
    let value = numerator as f64 / denominator as f64;
    let scaled = i128::from(numerator) * 10;
    let denominator = i128::from(denominator);
    let tenths = scaled.div_euclid(denominator);

    if scaled.rem_euclid(denominator) == 0 {
        return tenths as f64 / 10.0;
    }

    // Halfway between `tenths` and `tenths + 1` is (2 * tenths + 1) / 20.
    let rounded = match compare_exact(value, 2 * tenths + 1, 20) {
        Ordering::Less => tenths,
        Ordering::Greater => tenths + 1,
        Ordering::Equal if tenths % 2 == 0 => tenths,
        Ordering::Equal => tenths + 1,
    };
    rounded as f64 / 10.0
}

/// Compares a finite, non-negative double with `numerator / denominator`
/// without any intermediate rounding.
fn compare_exact(value: f64, numerator: i128, denominator: i128) -> Ordering {
    let bits = value.to_bits();
    let exponent_bits = ((bits >> 52) & 0x7ff) as i32;
    let fraction = (bits & ((1u64 << 52) - 1)) as i128;
    let (mantissa, exponent) = if exponent_bits == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1i128 << 52), exponent_bits - 1075)
    };

    // value = mantissa * 2^exponent
    if exponent >= 0 {
        return (mantissa * denominator)
            .checked_shl(exponent as u32)
            .map_or(Ordering::Greater, |lhs| lhs.cmp(&numerator));
    }
    let shift = (-exponent) as u32;
    if shift > 64 {
        // mantissa * denominator stays below 2^60, numerator << 64 does not.
        return if numerator > 0 { Ordering::Less } else { (mantissa * denominator).cmp(&0) };
    }
    (mantissa * denominator).cmp(&(numerator << shift))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rated(rubric_id: i64, rating: i64, weight: i64) -> WeightedRating {
        WeightedRating { rubric_id, rating, weight }
    }

    #[test]
    fn test_weighted_score_calculation() {
        // (10*40 + 8*30) / 70 = 9.142...
        let score = weighted_score(&[rated(1, 10, 40), rated(1, 8, 30)]);
        assert_eq!(score, Some(9.1));
    }

    #[test]
    fn test_no_ratings_means_no_score() {
        assert_eq!(weighted_score(&[]), None);
    }

    #[test]
    fn test_full_rubric() {
        let score = weighted_score(&[rated(3, 7, 50), rated(3, 9, 25), rated(3, 4, 25)]);
        assert_eq!(score, Some(6.8));
    }

    #[test]
    fn test_exact_ties_round_to_even() {
        // 250 / 40 = 6.25
        assert_eq!(weighted_score(&[rated(1, 4, 10), rated(1, 7, 30)]), Some(6.2));
        // 330 / 40 = 8.25
        assert_eq!(weighted_score(&[rated(1, 8, 30), rated(1, 9, 10)]), Some(8.2));
        // 270 / 40 = 6.75
        assert_eq!(weighted_score(&[rated(1, 6, 30), rated(1, 9, 10)]), Some(6.8));
    }

    #[test]
    fn test_near_ties_follow_the_stored_double() {
        // 127 / 20 is stored just below 6.35.
        assert_eq!(weighted_score(&[rated(1, 6, 13), rated(1, 7, 7)]), Some(6.3));
        // 129 / 20 is stored just above 6.45.
        assert_eq!(weighted_score(&[rated(1, 6, 11), rated(1, 7, 9)]), Some(6.5));
    }

    #[test]
    fn test_first_rubric_group_wins() {
        let ratings = [rated(2, 4, 20), rated(1, 10, 50), rated(2, 6, 20)];
        assert_eq!(weighted_score(&ratings), Some(5.0));
    }

    #[test]
    fn test_zero_weight_group_is_skipped() {
        let ratings = [rated(2, 4, 0), rated(1, 9, 10)];
        assert_eq!(weighted_score(&ratings), Some(9.0));
    }
}
