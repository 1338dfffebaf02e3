//! Pure aggregate computations over countable reviews.
//!
//! All arithmetic is exact decimal, so rounding at the half-way point is
//! reproducible regardless of platform.

use crate::dto::StarPercentages;
use rated_core::{CountableReview, StarRating, Stars};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Mean rating snapped to the nearest half star, halves rounding away from zero.
///
/// No reviews yields `0.0`.
#[must_use]
pub fn average_stars(reviews: &[CountableReview]) -> StarRating {
    if reviews.is_empty() {
        return StarRating::zero();
    }
    let total: Decimal = reviews.iter().map(|review| review.stars.value()).sum();
    let half_steps = (total * Decimal::TWO / Decimal::from(reviews.len()))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .unwrap_or(0);
    StarRating::from_half_steps(half_steps)
}

/// Share of reviews per whole-star bucket, as whole-number percentage strings.
///
/// Every bucket `"1"` to `"5"` is present. Fractional and zero ratings count
/// toward the total but belong to no bucket. No reviews yields `"0"` everywhere.
#[must_use]
pub fn star_percentages(reviews: &[CountableReview]) -> StarPercentages {
    let mut counts = [0u64; Stars::MAX as usize];
    for bucket in reviews.iter().filter_map(|review| review.stars.bucket()) {
        counts[usize::from(bucket) - 1] += 1;
    }

    let total = reviews.len() as u64;
    (1..=Stars::MAX)
        .map(|bucket| {
            let count = counts[usize::from(bucket) - 1];
            (bucket.to_string(), percentage(count, total))
        })
        .collect()
}

fn percentage(count: u64, total: u64) -> String {
    if total == 0 {
        return "0".to_string();
    }
    (Decimal::ONE_HUNDRED * Decimal::from(count) / Decimal::from(total))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
        .to_string()
}
