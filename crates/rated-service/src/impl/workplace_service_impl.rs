//! Workplace service implementation.

use crate::dto::{CreateWorkplaceRequest, RatingSummary, WorkplaceResponse, WorkplaceSummary};
use crate::rating::WorkplaceRatingService;
use crate::workplace_service::WorkplaceService;
use async_trait::async_trait;
use rated_core::{
    Page, PageRequest, RatedError, RatedResult, StarRating, ValidateExt, Workplace, WorkplaceId,
};
use rated_repository::WorkplaceRepository;
use std::sync::Arc;
use tracing::{debug, info};

/// Workplace service over the workplace store and the rating service.
pub struct WorkplaceServiceImpl {
    workplaces: Arc<dyn WorkplaceRepository>,
    rating: Arc<dyn WorkplaceRatingService>,
}

impl WorkplaceServiceImpl {
    /// Creates a new workplace service.
    pub fn new(
        workplaces: Arc<dyn WorkplaceRepository>,
        rating: Arc<dyn WorkplaceRatingService>,
    ) -> Self {
        Self { workplaces, rating }
    }

    async fn load(&self, id: WorkplaceId) -> RatedResult<Workplace> {
        self.workplaces
            .find_by_id(id)
            .await?
            .ok_or_else(|| RatedError::not_found("Workplace", id))
    }
}

#[async_trait]
impl WorkplaceService for WorkplaceServiceImpl {
    async fn create_workplace(
        &self,
        request: CreateWorkplaceRequest,
    ) -> RatedResult<WorkplaceResponse> {
        debug!("Creating workplace: {}", request.name);

        request.validate_request()?;

        let saved = self.workplaces.insert(&request.into_workplace()).await?;

        info!("Workplace created: {}", saved.id);
        Ok(WorkplaceResponse::new(saved, StarRating::zero(), 0))
    }

    async fn get_workplace(&self, id: WorkplaceId) -> RatedResult<WorkplaceResponse> {
        debug!("Getting workplace: {}", id);

        let workplace = self.load(id).await?;
        let stars = self.rating.average_stars(id).await?;
        let amount_of_reviews = self.rating.review_count(id).await?;

        Ok(WorkplaceResponse::new(workplace, stars, amount_of_reviews))
    }

    async fn search_workplaces(
        &self,
        query: &str,
        page: PageRequest,
    ) -> RatedResult<Page<WorkplaceSummary>> {
        debug!("Searching workplaces for '{}', page: {}, size: {}", query, page.page, page.size);

        let found = self.workplaces.search(query.trim(), page).await?;
        let mut summaries = Vec::with_capacity(found.len());
        for workplace in found.results {
            let stars = self.rating.average_stars(workplace.id).await?;
            let amount_of_reviews = self.rating.review_count(workplace.id).await?;
            summaries.push(WorkplaceSummary::new(workplace, stars, amount_of_reviews));
        }

        Ok(Page::new(summaries, page, found.count))
    }

    async fn rating_summary(&self, id: WorkplaceId) -> RatedResult<RatingSummary> {
        debug!("Getting rating summary for workplace: {}", id);

        self.load(id).await?;
        Ok(RatingSummary {
            workplace_id: id,
            stars: self.rating.average_stars(id).await?,
            amount_of_reviews: self.rating.review_count(id).await?,
            star_percentages: self.rating.star_percentages(id).await?,
        })
    }
}

impl std::fmt::Debug for WorkplaceServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkplaceServiceImpl").finish_non_exhaustive()
    }
}
