//! Cache key generators.
//!
//! The key layout is shared with every other process reading the same cache,
//! so these formats must not change.

use rated_core::WorkplaceId;

/// Key of the cached category listing.
pub const CATEGORIES: &str = "workplace:categories";

/// Generate the cache key for a workplace's average star rating.
#[must_use]
pub fn average_stars(id: WorkplaceId) -> String {
    format!("workplace:{id}:AverageStars")
}

/// Generate the cache key for a workplace's countable review count.
#[must_use]
pub fn review_count(id: WorkplaceId) -> String {
    format!("workplace:{id}:amountOfReviews")
}

/// Generate the cache key for a workplace's star histogram.
#[must_use]
pub fn star_percentages(id: WorkplaceId) -> String {
    format!("workplace:{id}:starsProcentages")
}

/// Generate the cache key for the first page of a workplace's reviews.
#[must_use]
pub fn first_review_page(id: WorkplaceId) -> String {
    format!("workplace:{id}:reviews:page:1")
}

/// Every per-workplace key, in eviction order.
#[must_use]
pub fn workplace_keys(id: WorkplaceId) -> [String; 4] {
    [
        average_stars(id),
        review_count(id),
        star_percentages(id),
        first_review_page(id),
    ]
}
