//! Workplace review entity.

use super::stars::Stars;
use crate::{Entity, ReviewId, UserId, WorkplaceId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A review of a workplace written by a student.
///
/// A review only contributes to a workplace's aggregates once it is
/// verified and for as long as it is not soft-deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// Unique identifier for the review.
    pub id: ReviewId,

    /// The reviewed workplace.
    pub workplace_id: WorkplaceId,

    /// The student who wrote the review.
    pub author_id: UserId,

    /// Star rating.
    pub stars: Stars,

    /// Review headline.
    pub title: String,

    /// Review body.
    pub comment: String,

    /// The user who verified the review, `None` while unverified.
    pub verified_by: Option<UserId>,

    /// Soft-delete marker.
    pub deleted_at: Option<DateTime<Utc>>,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Review {
    /// Creates a new, unverified review.
    #[must_use]
    pub fn new(
        workplace_id: WorkplaceId,
        author_id: UserId,
        stars: Stars,
        title: String,
        comment: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ReviewId::new(),
            workplace_id,
            author_id,
            stars,
            title,
            comment,
            verified_by: None,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns true if the review counts toward workplace aggregates.
    #[must_use]
    pub const fn is_countable(&self) -> bool {
        self.deleted_at.is_none() && self.verified_by.is_some()
    }

    /// Returns true if the review has been soft-deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Marks the review as verified by the given user.
    pub fn verify(&mut self, verifier: UserId) {
        self.verified_by = Some(verifier);
        self.updated_at = Utc::now();
    }

    /// Soft-deletes the review.
    pub fn soft_delete(&mut self) {
        let now = Utc::now();
        self.deleted_at = Some(now);
        self.updated_at = now;
    }

    /// Applies an author edit. `None` leaves a field untouched.
    pub fn edit(&mut self, stars: Option<Stars>, title: Option<String>, comment: Option<String>) {
        if let Some(stars) = stars {
            self.stars = stars;
        }
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(comment) = comment {
            self.comment = comment;
        }
        self.updated_at = Utc::now();
    }
}

impl Entity<ReviewId> for Review {
    fn id(&self) -> &ReviewId {
        &self.id
    }
}

/// The slice of a countable review the rating aggregates are computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountableReview {
    /// Star rating.
    pub stars: Stars,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<&Review> for CountableReview {
    fn from(review: &Review) -> Self {
        Self {
            stars: review.stars,
            created_at: review.created_at,
        }
    }
}
