//! MySQL review repository implementation.

use super::{limit_offset, parse_id};
use crate::{traits::ReviewRepository, DatabasePoolInterface};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rated_core::{
    CountableReview, Page, PageRequest, RatedError, RatedResult, Review, ReviewId, Stars,
    WorkplaceId,
};
use rust_decimal::Decimal;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

/// MySQL review repository implementation.
#[derive(Clone)]
pub struct MySqlReviewRepository {
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlReviewRepository {
    /// Creates a new MySQL review repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

const REVIEW_COLUMNS: &str = "id, workplace_id, author_id, stars, title, comment, \
                              verified_by, deleted_at, created_at, updated_at";

/// Database row representation of a review.
#[derive(Debug, FromRow)]
struct ReviewRow {
    id: String,
    workplace_id: String,
    author_id: String,
    stars: Decimal,
    title: String,
    comment: String,
    verified_by: Option<String>,
    deleted_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ReviewRow> for Review {
    type Error = RatedError;

    fn try_from(row: ReviewRow) -> Result<Self, Self::Error> {
        Ok(Review {
            id: parse_id(&row.id)?,
            workplace_id: parse_id(&row.workplace_id)?,
            author_id: parse_id(&row.author_id)?,
            stars: Stars::new(row.stars)?,
            title: row.title,
            comment: row.comment,
            verified_by: row.verified_by.as_deref().map(parse_id).transpose()?,
            deleted_at: row.deleted_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct CountableRow {
    stars: Decimal,
    created_at: DateTime<Utc>,
}

impl TryFrom<CountableRow> for CountableReview {
    type Error = RatedError;

    fn try_from(row: CountableRow) -> Result<Self, Self::Error> {
        Ok(CountableReview {
            stars: Stars::new(row.stars)?,
            created_at: row.created_at,
        })
    }
}

fn into_reviews(rows: Vec<ReviewRow>) -> RatedResult<Vec<Review>> {
    rows.into_iter().map(Review::try_from).collect()
}

#[async_trait]
impl ReviewRepository for MySqlReviewRepository {
    async fn find_by_id(&self, id: ReviewId) -> RatedResult<Option<Review>> {
        debug!("Finding review by id: {}", id);

        let row = sqlx::query_as::<_, ReviewRow>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE id = ?"
        ))
        .bind(id.to_string())
        .fetch_optional(self.pool.inner())
        .await?;

        row.map(Review::try_from).transpose()
    }

    async fn find_countable_by_workplace(
        &self,
        workplace_id: WorkplaceId,
    ) -> RatedResult<Vec<CountableReview>> {
        debug!("Loading countable reviews for workplace: {}", workplace_id);

        let rows = sqlx::query_as::<_, CountableRow>(
            r#"
            SELECT stars, created_at
            FROM reviews
            WHERE workplace_id = ? AND deleted_at IS NULL AND verified_by IS NOT NULL
            "#,
        )
        .bind(workplace_id.to_string())
        .fetch_all(self.pool.inner())
        .await?;

        rows.into_iter().map(CountableReview::try_from).collect()
    }

    async fn count_countable_by_workplace(&self, workplace_id: WorkplaceId) -> RatedResult<u64> {
        debug!("Counting countable reviews for workplace: {}", workplace_id);

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM reviews
            WHERE workplace_id = ? AND deleted_at IS NULL AND verified_by IS NOT NULL
            "#,
        )
        .bind(workplace_id.to_string())
        .fetch_one(self.pool.inner())
        .await?;

        Ok(total.unsigned_abs())
    }

    async fn find_countable_page(
        &self,
        workplace_id: WorkplaceId,
        page: PageRequest,
    ) -> RatedResult<Page<Review>> {
        debug!(
            "Finding reviews for workplace {}, page: {}, size: {}",
            workplace_id, page.page, page.size
        );

        let total = self.count_countable_by_workplace(workplace_id).await?;

        let (limit, offset) = limit_offset(page);
        let rows = sqlx::query_as::<_, ReviewRow>(&format!(
            r#"
            SELECT {REVIEW_COLUMNS}
            FROM reviews
            WHERE workplace_id = ? AND deleted_at IS NULL AND verified_by IS NOT NULL
            ORDER BY created_at DESC, id DESC
            LIMIT ? OFFSET ?
            "#
        ))
        .bind(workplace_id.to_string())
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.inner())
        .await?;

        Ok(Page::new(into_reviews(rows)?, page, total))
    }

    async fn find_unverified(&self, page: PageRequest) -> RatedResult<Page<Review>> {
        debug!("Finding unverified reviews, page: {}, size: {}", page.page, page.size);

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM reviews WHERE verified_by IS NULL AND deleted_at IS NULL",
        )
        .fetch_one(self.pool.inner())
        .await?;

        let (limit, offset) = limit_offset(page);
        let rows = sqlx::query_as::<_, ReviewRow>(&format!(
            r#"
            SELECT {REVIEW_COLUMNS}
            FROM reviews
            WHERE verified_by IS NULL AND deleted_at IS NULL
            ORDER BY created_at ASC, id ASC
            LIMIT ? OFFSET ?
            "#
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.inner())
        .await?;

        Ok(Page::new(into_reviews(rows)?, page, total.unsigned_abs()))
    }

    async fn insert(&self, review: &Review) -> RatedResult<Review> {
        debug!("Inserting review: {}", review.id);

        sqlx::query(
            r#"
            INSERT INTO reviews (id, workplace_id, author_id, stars, title, comment,
                                 verified_by, deleted_at, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(review.id.to_string())
        .bind(review.workplace_id.to_string())
        .bind(review.author_id.to_string())
        .bind(review.stars.value())
        .bind(&review.title)
        .bind(&review.comment)
        .bind(review.verified_by.map(|id| id.to_string()))
        .bind(review.deleted_at)
        .bind(review.created_at)
        .bind(review.updated_at)
        .execute(self.pool.inner())
        .await?;

        Ok(review.clone())
    }

    async fn update(&self, review: &Review) -> RatedResult<Review> {
        debug!("Updating review: {}", review.id);

        sqlx::query(
            r#"
            UPDATE reviews
            SET workplace_id = ?, stars = ?, title = ?, comment = ?,
                verified_by = ?, deleted_at = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(review.workplace_id.to_string())
        .bind(review.stars.value())
        .bind(&review.title)
        .bind(&review.comment)
        .bind(review.verified_by.map(|id| id.to_string()))
        .bind(review.deleted_at)
        .bind(review.updated_at)
        .bind(review.id.to_string())
        .execute(self.pool.inner())
        .await?;

        Ok(review.clone())
    }
}
