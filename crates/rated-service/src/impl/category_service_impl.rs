//! Category service implementation.

use crate::cache::{cache_keys, read_through, CacheInterface};
use crate::category_service::CategoryService;
use crate::dto::{CategoryNameRequest, CategoryResponse, TopCategoryResponse};
use crate::invalidation::CacheInvalidator;
use async_trait::async_trait;
use rated_config::CacheConfig;
use rated_core::{
    Category, CategoryId, RatedError, RatedResult, TopCategory, TopCategoryId, ValidateExt,
};
use rated_repository::CategoryRepository;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info};

/// Category service over the category store, with a cached listing.
pub struct CategoryServiceImpl {
    categories: Arc<dyn CategoryRepository>,
    cache: Arc<dyn CacheInterface>,
    invalidator: CacheInvalidator,
    settings: CacheConfig,
}

impl CategoryServiceImpl {
    /// Creates a new category service.
    pub fn new(
        categories: Arc<dyn CategoryRepository>,
        cache: Arc<dyn CacheInterface>,
        invalidator: CacheInvalidator,
        settings: CacheConfig,
    ) -> Self {
        Self {
            categories,
            cache,
            invalidator,
            settings,
        }
    }

    async fn load_category(&self, id: CategoryId) -> RatedResult<Category> {
        self.categories
            .find_category(id)
            .await?
            .filter(|category| !category.is_deleted())
            .ok_or_else(|| RatedError::not_found("Category", id))
    }

    async fn load_top_category(&self, id: TopCategoryId) -> RatedResult<TopCategory> {
        self.categories
            .find_top_category(id)
            .await?
            .filter(|top| !top.is_deleted())
            .ok_or_else(|| RatedError::not_found("TopCategory", id))
    }

    async fn save_category(&self, prior: &Category, pending: Category) -> RatedResult<Category> {
        self.invalidator
            .on_before_category_save(Some(prior), &pending)
            .await;
        self.categories.update_category(&pending).await
    }

    async fn save_top_category(
        &self,
        prior: &TopCategory,
        pending: TopCategory,
    ) -> RatedResult<TopCategory> {
        self.invalidator
            .on_before_top_category_save(Some(prior), &pending)
            .await;
        self.categories.update_top_category(&pending).await
    }

    /// Resolves a top category's members for its response.
    async fn top_category_response(&self, top: TopCategory) -> RatedResult<TopCategoryResponse> {
        let mut members = Vec::with_capacity(top.category_ids.len());
        for id in &top.category_ids {
            if let Some(category) = self.categories.find_category(*id).await? {
                if !category.is_deleted() {
                    members.push(category);
                }
            }
        }
        Ok(TopCategoryResponse::new(top, &members))
    }
}

#[async_trait]
impl CategoryService for CategoryServiceImpl {
    async fn list_categories(&self) -> RatedResult<Vec<TopCategoryResponse>> {
        read_through(
            self.cache.as_ref(),
            cache_keys::CATEGORIES,
            self.settings.listing_ttl(),
            async {
                debug!("Loading category listing");
                let categories = self.categories.list_categories().await?;
                let tops = self.categories.list_top_categories().await?;
                Ok(tops
                    .into_iter()
                    .map(|top| TopCategoryResponse::new(top, &categories))
                    .collect())
            },
        )
        .await
    }

    async fn create_category(
        &self,
        request: CategoryNameRequest,
    ) -> RatedResult<CategoryResponse> {
        debug!("Creating category: {}", request.name);

        request.validate_request()?;

        let category = Category::new(request.name.trim().to_string());
        self.invalidator.on_before_category_save(None, &category).await;
        let saved = self.categories.insert_category(&category).await?;

        info!("Category created: {}", saved.id);
        Ok(CategoryResponse::from(saved))
    }

    async fn rename_category(
        &self,
        id: CategoryId,
        request: CategoryNameRequest,
    ) -> RatedResult<CategoryResponse> {
        debug!("Renaming category {} to '{}'", id, request.name);

        request.validate_request()?;

        let prior = self.load_category(id).await?;
        let mut pending = prior.clone();
        pending.rename(request.name.trim().to_string());
        let saved = self.save_category(&prior, pending).await?;

        info!("Category renamed: {}", id);
        Ok(CategoryResponse::from(saved))
    }

    async fn delete_category(&self, id: CategoryId) -> RatedResult<()> {
        debug!("Deleting category: {}", id);

        let prior = self.load_category(id).await?;
        let mut pending = prior.clone();
        pending.soft_delete();
        self.save_category(&prior, pending).await?;

        info!("Category deleted: {}", id);
        Ok(())
    }

    async fn create_top_category(
        &self,
        request: CategoryNameRequest,
    ) -> RatedResult<TopCategoryResponse> {
        debug!("Creating top category: {}", request.name);

        request.validate_request()?;

        let top = TopCategory::new(request.name.trim().to_string());
        self.invalidator.on_before_top_category_save(None, &top).await;
        let saved = self.categories.insert_top_category(&top).await?;

        info!("Top category created: {}", saved.id);
        Ok(TopCategoryResponse::new(saved, &[]))
    }

    async fn rename_top_category(
        &self,
        id: TopCategoryId,
        request: CategoryNameRequest,
    ) -> RatedResult<TopCategoryResponse> {
        debug!("Renaming top category {} to '{}'", id, request.name);

        request.validate_request()?;

        let prior = self.load_top_category(id).await?;
        let mut pending = prior.clone();
        pending.rename(request.name.trim().to_string());
        let saved = self.save_top_category(&prior, pending).await?;

        info!("Top category renamed: {}", id);
        self.top_category_response(saved).await
    }

    async fn set_top_category_members(
        &self,
        id: TopCategoryId,
        members: BTreeSet<CategoryId>,
    ) -> RatedResult<TopCategoryResponse> {
        debug!("Setting {} members of top category {}", members.len(), id);

        for member in &members {
            self.load_category(*member).await?;
        }

        let prior = self.load_top_category(id).await?;
        let mut pending = prior.clone();
        pending.set_members(members);
        let saved = self.save_top_category(&prior, pending).await?;

        info!("Top category members updated: {}", id);
        self.top_category_response(saved).await
    }

    async fn delete_top_category(&self, id: TopCategoryId) -> RatedResult<()> {
        debug!("Deleting top category: {}", id);

        let prior = self.load_top_category(id).await?;
        let mut pending = prior.clone();
        pending.soft_delete();
        self.save_top_category(&prior, pending).await?;

        info!("Top category deleted: {}", id);
        Ok(())
    }
}

impl std::fmt::Debug for CategoryServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CategoryServiceImpl")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
