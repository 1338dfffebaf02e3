//! Review service trait definition.

use crate::dto::{ReviewResponse, SubmitReviewRequest, UpdateReviewRequest};
use async_trait::async_trait;
use rated_core::{Interface, Page, PageRequest, RatedResult, ReviewId, UserId, WorkplaceId};

/// Review lifecycle: submission, verification, decline and author edits.
///
/// Every mutation loads the persisted review, runs the cache invalidator
/// against the pending state and only then writes to the store.
#[async_trait]
pub trait ReviewService: Interface + Send + Sync {
    /// Submits a new, unverified review of a workplace.
    async fn submit_review(
        &self,
        author: UserId,
        workplace_id: WorkplaceId,
        request: SubmitReviewRequest,
    ) -> RatedResult<ReviewResponse>;

    /// Marks a review as verified, making it count toward the aggregates.
    async fn verify_review(&self, id: ReviewId, verifier: UserId) -> RatedResult<ReviewResponse>;

    /// Declines a review by soft-deleting it.
    async fn decline_review(&self, id: ReviewId) -> RatedResult<()>;

    /// Applies an author edit.
    async fn update_review(
        &self,
        id: ReviewId,
        request: UpdateReviewRequest,
    ) -> RatedResult<ReviewResponse>;

    /// Lists reviews awaiting verification, oldest first.
    async fn list_unverified_reviews(&self, page: PageRequest)
        -> RatedResult<Page<ReviewResponse>>;

    /// Lists a workplace's countable reviews, newest first.
    async fn list_workplace_reviews(
        &self,
        workplace_id: WorkplaceId,
        page: PageRequest,
    ) -> RatedResult<Page<ReviewResponse>>;
}
