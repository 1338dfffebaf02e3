//! MySQL repository implementations.

mod category_repository;
mod review_repository;
mod workplace_repository;

pub use category_repository::MySqlCategoryRepository;
pub use review_repository::MySqlReviewRepository;
pub use workplace_repository::MySqlWorkplaceRepository;

use rated_core::{RatedError, RatedResult};
use uuid::Uuid;

/// Parses a `CHAR(36)` id column into a typed id.
fn parse_id<T: From<Uuid>>(value: &str) -> RatedResult<T> {
    Uuid::parse_str(value)
        .map(T::from)
        .map_err(|e| RatedError::Internal(format!("Invalid UUID in database: {e}")))
}

/// Builds a `LIKE` pattern matching `query` anywhere, with wildcards escaped.
fn contains_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Converts a page request to `LIMIT`/`OFFSET` bind values.
fn limit_offset(page: rated_core::PageRequest) -> (i64, i64) {
    (
        i64::try_from(page.limit()).unwrap_or(i64::MAX),
        i64::try_from(page.offset()).unwrap_or(i64::MAX),
    )
}
