//! Cached rating aggregates per workplace.

use super::metrics;
use crate::cache::{cache_keys, read_through, CacheInterface};
use crate::dto::{ReviewResponse, StarPercentages};
use async_trait::async_trait;
use rated_config::CacheConfig;
use rated_core::{Interface, Page, PageRequest, RatedResult, StarRating, WorkplaceId};
use rated_repository::ReviewRepository;
use std::sync::Arc;
use tracing::debug;

/// Read path for workplace rating aggregates.
///
/// Every method answers from the cache when it can and otherwise recomputes
/// from the review store and repopulates the cache.
#[async_trait]
pub trait WorkplaceRatingService: Interface + Send + Sync {
    /// Mean rating of the countable reviews, on the half-star lattice.
    async fn average_stars(&self, workplace_id: WorkplaceId) -> RatedResult<StarRating>;

    /// Number of countable reviews.
    async fn review_count(&self, workplace_id: WorkplaceId) -> RatedResult<u64>;

    /// Percentage of countable reviews per whole-star bucket.
    async fn star_percentages(&self, workplace_id: WorkplaceId) -> RatedResult<StarPercentages>;

    /// First page of countable reviews, newest first.
    async fn first_review_page(&self, workplace_id: WorkplaceId)
        -> RatedResult<Page<ReviewResponse>>;

    /// The page size used for review listings.
    fn review_page_size(&self) -> usize;
}

/// Rating service backed by a review repository and a cache.
pub struct WorkplaceRatingServiceImpl {
    reviews: Arc<dyn ReviewRepository>,
    cache: Arc<dyn CacheInterface>,
    settings: CacheConfig,
}

impl WorkplaceRatingServiceImpl {
    /// Creates a new rating service.
    pub fn new(
        reviews: Arc<dyn ReviewRepository>,
        cache: Arc<dyn CacheInterface>,
        settings: CacheConfig,
    ) -> Self {
        Self {
            reviews,
            cache,
            settings,
        }
    }
}

#[async_trait]
impl WorkplaceRatingService for WorkplaceRatingServiceImpl {
    async fn average_stars(&self, workplace_id: WorkplaceId) -> RatedResult<StarRating> {
        let key = cache_keys::average_stars(workplace_id);
        read_through(self.cache.as_ref(), &key, self.settings.rating_ttl(), async {
            debug!("Computing average stars for workplace {}", workplace_id);
            let reviews = self.reviews.find_countable_by_workplace(workplace_id).await?;
            Ok(metrics::average_stars(&reviews))
        })
        .await
    }

    async fn review_count(&self, workplace_id: WorkplaceId) -> RatedResult<u64> {
        let key = cache_keys::review_count(workplace_id);
        read_through(self.cache.as_ref(), &key, self.settings.rating_ttl(), async {
            debug!("Counting reviews for workplace {}", workplace_id);
            self.reviews.count_countable_by_workplace(workplace_id).await
        })
        .await
    }

    async fn star_percentages(&self, workplace_id: WorkplaceId) -> RatedResult<StarPercentages> {
        let key = cache_keys::star_percentages(workplace_id);
        read_through(self.cache.as_ref(), &key, self.settings.rating_ttl(), async {
            debug!("Computing star percentages for workplace {}", workplace_id);
            let reviews = self.reviews.find_countable_by_workplace(workplace_id).await?;
            Ok(metrics::star_percentages(&reviews))
        })
        .await
    }

    async fn first_review_page(
        &self,
        workplace_id: WorkplaceId,
    ) -> RatedResult<Page<ReviewResponse>> {
        let key = cache_keys::first_review_page(workplace_id);
        let request = PageRequest::new(0, self.settings.review_page_size);
        read_through(self.cache.as_ref(), &key, self.settings.listing_ttl(), async {
            debug!("Loading first review page for workplace {}", workplace_id);
            let page = self.reviews.find_countable_page(workplace_id, request).await?;
            Ok(page.map(ReviewResponse::from))
        })
        .await
    }

    fn review_page_size(&self) -> usize {
        self.settings.review_page_size
    }
}

impl std::fmt::Debug for WorkplaceRatingServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkplaceRatingServiceImpl")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
