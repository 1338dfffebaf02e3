//! Repository trait definitions.
//!
//! Lookups by id return soft-deleted rows too, since write paths need the
//! current persisted state as a snapshot. Listing queries exclude them.

use async_trait::async_trait;
use rated_core::{
    Category, CategoryId, CountableReview, Interface, Page, PageRequest, RatedResult, Review,
    ReviewId, TopCategory, TopCategoryId, Workplace, WorkplaceId,
};

/// Review store.
#[async_trait]
pub trait ReviewRepository: Interface + Send + Sync {
    /// Finds a review by ID, deleted or not.
    async fn find_by_id(&self, id: ReviewId) -> RatedResult<Option<Review>>;

    /// Returns the rating inputs of every countable review of a workplace.
    async fn find_countable_by_workplace(
        &self,
        workplace_id: WorkplaceId,
    ) -> RatedResult<Vec<CountableReview>>;

    /// Counts a workplace's countable reviews.
    async fn count_countable_by_workplace(&self, workplace_id: WorkplaceId) -> RatedResult<u64>;

    /// Returns a page of a workplace's countable reviews, newest first.
    async fn find_countable_page(
        &self,
        workplace_id: WorkplaceId,
        page: PageRequest,
    ) -> RatedResult<Page<Review>>;

    /// Returns a page of unverified, non-deleted reviews, oldest first.
    async fn find_unverified(&self, page: PageRequest) -> RatedResult<Page<Review>>;

    /// Inserts a new review.
    async fn insert(&self, review: &Review) -> RatedResult<Review>;

    /// Persists every mutable field of an existing review.
    async fn update(&self, review: &Review) -> RatedResult<Review>;
}

/// Workplace store.
#[async_trait]
pub trait WorkplaceRepository: Interface + Send + Sync {
    /// Finds a non-deleted workplace by ID, with its non-deleted categories.
    async fn find_by_id(&self, id: WorkplaceId) -> RatedResult<Option<Workplace>>;

    /// Case-insensitive substring search over name, VAT and website.
    ///
    /// An empty query matches every non-deleted workplace.
    async fn search(&self, query: &str, page: PageRequest) -> RatedResult<Page<Workplace>>;

    /// Inserts a workplace together with its category links.
    async fn insert(&self, workplace: &Workplace) -> RatedResult<Workplace>;
}

/// Category and top category store.
#[async_trait]
pub trait CategoryRepository: Interface + Send + Sync {
    /// Finds a category by ID, deleted or not.
    async fn find_category(&self, id: CategoryId) -> RatedResult<Option<Category>>;

    /// Finds a top category by ID, deleted or not.
    async fn find_top_category(&self, id: TopCategoryId) -> RatedResult<Option<TopCategory>>;

    /// Lists non-deleted categories ordered by name.
    async fn list_categories(&self) -> RatedResult<Vec<Category>>;

    /// Lists non-deleted top categories ordered by name.
    async fn list_top_categories(&self) -> RatedResult<Vec<TopCategory>>;

    /// Inserts a category and its top category links.
    async fn insert_category(&self, category: &Category) -> RatedResult<Category>;

    /// Updates a category and replaces its top category links.
    async fn update_category(&self, category: &Category) -> RatedResult<Category>;

    /// Inserts a top category and its member links.
    async fn insert_top_category(&self, top_category: &TopCategory) -> RatedResult<TopCategory>;

    /// Updates a top category and replaces its member links.
    async fn update_top_category(&self, top_category: &TopCategory) -> RatedResult<TopCategory>;
}
