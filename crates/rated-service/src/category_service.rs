//! Category service trait definition.

use crate::dto::{CategoryNameRequest, CategoryResponse, TopCategoryResponse};
use async_trait::async_trait;
use rated_core::{CategoryId, Interface, RatedResult, TopCategoryId};
use std::collections::BTreeSet;

/// Category taxonomy management and the cached category listing.
#[async_trait]
pub trait CategoryService: Interface + Send + Sync {
    /// Lists top categories with their categories.
    async fn list_categories(&self) -> RatedResult<Vec<TopCategoryResponse>>;

    /// Creates a category.
    async fn create_category(&self, request: CategoryNameRequest)
        -> RatedResult<CategoryResponse>;

    /// Renames a category.
    async fn rename_category(
        &self,
        id: CategoryId,
        request: CategoryNameRequest,
    ) -> RatedResult<CategoryResponse>;

    /// Soft-deletes a category.
    async fn delete_category(&self, id: CategoryId) -> RatedResult<()>;

    /// Creates an empty top category.
    async fn create_top_category(
        &self,
        request: CategoryNameRequest,
    ) -> RatedResult<TopCategoryResponse>;

    /// Renames a top category.
    async fn rename_top_category(
        &self,
        id: TopCategoryId,
        request: CategoryNameRequest,
    ) -> RatedResult<TopCategoryResponse>;

    /// Replaces the categories grouped under a top category.
    async fn set_top_category_members(
        &self,
        id: TopCategoryId,
        members: BTreeSet<CategoryId>,
    ) -> RatedResult<TopCategoryResponse>;

    /// Soft-deletes a top category.
    async fn delete_top_category(&self, id: TopCategoryId) -> RatedResult<()>;
}
