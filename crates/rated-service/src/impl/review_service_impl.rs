//! Review service implementation.

use crate::dto::{ReviewResponse, SubmitReviewRequest, UpdateReviewRequest};
use crate::invalidation::CacheInvalidator;
use crate::rating::WorkplaceRatingService;
use crate::review_service::ReviewService;
use async_trait::async_trait;
use rated_core::{
    Page, PageRequest, RatedError, RatedResult, Review, ReviewId, Stars, UserId, ValidateExt,
    WorkplaceId,
};
use rated_repository::{ReviewRepository, WorkplaceRepository};
use std::sync::Arc;
use tracing::{debug, info};

/// Review service over the review and workplace stores.
pub struct ReviewServiceImpl {
    reviews: Arc<dyn ReviewRepository>,
    workplaces: Arc<dyn WorkplaceRepository>,
    rating: Arc<dyn WorkplaceRatingService>,
    invalidator: CacheInvalidator,
}

impl ReviewServiceImpl {
    /// Creates a new review service.
    pub fn new(
        reviews: Arc<dyn ReviewRepository>,
        workplaces: Arc<dyn WorkplaceRepository>,
        rating: Arc<dyn WorkplaceRatingService>,
        invalidator: CacheInvalidator,
    ) -> Self {
        Self {
            reviews,
            workplaces,
            rating,
            invalidator,
        }
    }

    /// Loads the persisted review, treating declined reviews as gone.
    async fn snapshot(&self, id: ReviewId) -> RatedResult<Review> {
        self.reviews
            .find_by_id(id)
            .await?
            .filter(|review| !review.is_deleted())
            .ok_or_else(|| RatedError::not_found("Review", id))
    }

    async fn save(&self, prior: &Review, pending: Review) -> RatedResult<Review> {
        self.invalidator
            .on_before_review_save(Some(prior), &pending)
            .await;
        self.reviews.update(&pending).await
    }
}

#[async_trait]
impl ReviewService for ReviewServiceImpl {
    async fn submit_review(
        &self,
        author: UserId,
        workplace_id: WorkplaceId,
        request: SubmitReviewRequest,
    ) -> RatedResult<ReviewResponse> {
        debug!("Submitting review of workplace {} by {}", workplace_id, author);

        request.validate_request()?;

        if self.workplaces.find_by_id(workplace_id).await?.is_none() {
            return Err(RatedError::not_found("Workplace", workplace_id));
        }

        let review = Review::new(
            workplace_id,
            author,
            Stars::new(request.stars)?,
            request.title,
            request.comment,
        );

        self.invalidator.on_before_review_save(None, &review).await;
        let saved = self.reviews.insert(&review).await?;

        info!("Review submitted: {}", saved.id);
        Ok(ReviewResponse::from(saved))
    }

    async fn verify_review(&self, id: ReviewId, verifier: UserId) -> RatedResult<ReviewResponse> {
        debug!("Verifying review {} by {}", id, verifier);

        let prior = self.snapshot(id).await?;
        if prior.verified_by.is_some() {
            return Err(RatedError::Conflict(format!("Review '{id}' is already verified")));
        }

        let mut pending = prior.clone();
        pending.verify(verifier);
        let saved = self.save(&prior, pending).await?;

        info!("Review verified: {}", id);
        Ok(ReviewResponse::from(saved))
    }

    async fn decline_review(&self, id: ReviewId) -> RatedResult<()> {
        debug!("Declining review {}", id);

        let prior = self.snapshot(id).await?;
        let mut pending = prior.clone();
        pending.soft_delete();
        self.save(&prior, pending).await?;

        info!("Review declined: {}", id);
        Ok(())
    }

    async fn update_review(
        &self,
        id: ReviewId,
        request: UpdateReviewRequest,
    ) -> RatedResult<ReviewResponse> {
        debug!("Updating review {}", id);

        request.validate_request()?;
        let stars = request.stars.map(Stars::new).transpose()?;

        let prior = self.snapshot(id).await?;
        let mut pending = prior.clone();
        pending.edit(stars, request.title, request.comment);
        let saved = self.save(&prior, pending).await?;

        info!("Review updated: {}", id);
        Ok(ReviewResponse::from(saved))
    }

    async fn list_unverified_reviews(
        &self,
        page: PageRequest,
    ) -> RatedResult<Page<ReviewResponse>> {
        debug!("Listing unverified reviews, page: {}, size: {}", page.page, page.size);

        let reviews = self.reviews.find_unverified(page).await?;
        Ok(reviews.map(ReviewResponse::from))
    }

    async fn list_workplace_reviews(
        &self,
        workplace_id: WorkplaceId,
        page: PageRequest,
    ) -> RatedResult<Page<ReviewResponse>> {
        debug!(
            "Listing reviews of workplace {}, page: {}, size: {}",
            workplace_id, page.page, page.size
        );

        if page.is_first() && page.size == self.rating.review_page_size() {
            return self.rating.first_review_page(workplace_id).await;
        }

        let reviews = self.reviews.find_countable_page(workplace_id, page).await?;
        Ok(reviews.map(ReviewResponse::from))
    }
}

impl std::fmt::Debug for ReviewServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReviewServiceImpl").finish_non_exhaustive()
    }
}
