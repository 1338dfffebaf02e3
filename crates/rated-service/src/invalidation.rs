//! Cache eviction ahead of review and category writes.
//!
//! Write services call into [`CacheInvalidator`] with the persisted snapshot
//! and the pending state right before committing. Keys are evicted only when
//! a field the cached aggregates depend on changes.

use crate::cache::{cache_keys, CacheInterface};
use chrono::{DateTime, Utc};
use rated_core::{Category, Review, Stars, TopCategory, UserId, WorkplaceId};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// The review fields the workplace aggregates depend on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewWatch {
    pub stars: Stars,
    pub verified_by: Option<UserId>,
    pub workplace_id: WorkplaceId,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<&Review> for ReviewWatch {
    fn from(review: &Review) -> Self {
        Self {
            stars: review.stars,
            verified_by: review.verified_by,
            workplace_id: review.workplace_id,
            deleted_at: review.deleted_at,
        }
    }
}

/// The category fields the category listing depends on.
///
/// `memberships` holds the top categories of a category, or the categories
/// of a top category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryWatch {
    pub name: String,
    pub memberships: BTreeSet<Uuid>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<&Category> for CategoryWatch {
    fn from(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            memberships: category.top_category_ids.iter().map(|id| id.0).collect(),
            deleted_at: category.deleted_at,
        }
    }
}

impl From<&TopCategory> for CategoryWatch {
    fn from(top: &TopCategory) -> Self {
        Self {
            name: top.name.clone(),
            memberships: top.category_ids.iter().map(|id| id.0).collect(),
            deleted_at: top.deleted_at,
        }
    }
}

/// Evicts cached aggregates invalidated by a pending write.
///
/// Best effort: cache failures are logged and never block the write.
#[derive(Clone)]
pub struct CacheInvalidator {
    cache: Arc<dyn CacheInterface>,
}

impl CacheInvalidator {
    /// Creates an invalidator over the given cache.
    pub fn new(cache: Arc<dyn CacheInterface>) -> Self {
        Self { cache }
    }

    /// Called before a review is persisted. `prior` is `None` for new reviews.
    pub async fn on_before_review_save(&self, prior: Option<&Review>, pending: &Review) {
        let Some(prior) = prior else {
            return;
        };
        let before = ReviewWatch::from(prior);
        let after = ReviewWatch::from(pending);
        if before == after {
            return;
        }

        debug!("Review {} changed watched fields, evicting aggregates", pending.id);
        self.evict_workplace(before.workplace_id).await;
        if after.workplace_id != before.workplace_id {
            self.evict_workplace(after.workplace_id).await;
        }
    }

    /// Called before a category is persisted. `prior` is `None` for new categories.
    pub async fn on_before_category_save(&self, prior: Option<&Category>, pending: &Category) {
        if let Some(prior) = prior {
            self.compare_categories(CategoryWatch::from(prior), CategoryWatch::from(pending))
                .await;
        }
    }

    /// Called before a top category is persisted. `prior` is `None` for new ones.
    pub async fn on_before_top_category_save(
        &self,
        prior: Option<&TopCategory>,
        pending: &TopCategory,
    ) {
        if let Some(prior) = prior {
            self.compare_categories(CategoryWatch::from(prior), CategoryWatch::from(pending))
                .await;
        }
    }

    async fn compare_categories(&self, before: CategoryWatch, after: CategoryWatch) {
        if before != after {
            debug!("Category '{}' changed watched fields, evicting listing", after.name);
            self.evict(cache_keys::CATEGORIES).await;
        }
    }

    async fn evict_workplace(&self, workplace_id: WorkplaceId) {
        for key in cache_keys::workplace_keys(workplace_id) {
            self.evict(&key).await;
        }
    }

    async fn evict(&self, key: &str) {
        if let Err(e) = self.cache.delete(key).await {
            warn!("Failed to evict cache key '{}': {}", key, e);
        }
    }
}

impl std::fmt::Debug for CacheInvalidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheInvalidator").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheExt, InMemoryCache};
    use crate::test_support::{review, CountingCache};
    use std::time::Duration;

    const TTL: Duration = Duration::from_secs(60);

    async fn warm(cache: &dyn CacheInterface, workplace: WorkplaceId) {
        for key in cache_keys::workplace_keys(workplace) {
            cache.set(&key, &"cached", TTL).await.unwrap();
        }
        cache.set(cache_keys::CATEGORIES, &"cached", TTL).await.unwrap();
    }

    async fn cached(cache: &dyn CacheInterface, key: &str) -> bool {
        cache.exists(key).await.unwrap()
    }

    fn setup() -> (Arc<InMemoryCache>, CacheInvalidator) {
        let cache = Arc::new(InMemoryCache::new());
        let invalidator = CacheInvalidator::new(cache.clone());
        (cache, invalidator)
    }

    #[tokio::test]
    async fn test_new_review_evicts_nothing() {
        let (cache, invalidator) = setup();
        let pending = review(WorkplaceId::new(), 4, false);
        warm(cache.as_ref(), pending.workplace_id).await;

        invalidator.on_before_review_save(None, &pending).await;

        for key in cache_keys::workplace_keys(pending.workplace_id) {
            assert!(cached(cache.as_ref(), &key).await);
        }
    }

    #[tokio::test]
    async fn test_stars_change_evicts_workplace_aggregates() {
        let (cache, invalidator) = setup();
        let prior = review(WorkplaceId::new(), 4, true);
        let mut pending = prior.clone();
        pending.edit(Some(Stars::whole(2).unwrap()), None, None);
        warm(cache.as_ref(), prior.workplace_id).await;

        invalidator.on_before_review_save(Some(&prior), &pending).await;

        for key in cache_keys::workplace_keys(prior.workplace_id) {
            assert!(!cached(cache.as_ref(), &key).await, "{key} should be evicted");
        }
        assert!(cached(cache.as_ref(), cache_keys::CATEGORIES).await);
    }

    #[tokio::test]
    async fn test_verification_and_deletion_evict() {
        let (cache, invalidator) = setup();
        let prior = review(WorkplaceId::new(), 4, false);

        let mut verified = prior.clone();
        verified.verify(UserId::new());
        warm(cache.as_ref(), prior.workplace_id).await;
        invalidator.on_before_review_save(Some(&prior), &verified).await;
        assert!(!cached(cache.as_ref(), &cache_keys::review_count(prior.workplace_id)).await);

        let mut deleted = verified.clone();
        deleted.soft_delete();
        warm(cache.as_ref(), prior.workplace_id).await;
        invalidator.on_before_review_save(Some(&verified), &deleted).await;
        assert!(!cached(cache.as_ref(), &cache_keys::average_stars(prior.workplace_id)).await);
    }

    #[tokio::test]
    async fn test_text_edit_keeps_cache() {
        let (cache, invalidator) = setup();
        let prior = review(WorkplaceId::new(), 4, true);
        let mut pending = prior.clone();
        pending.edit(None, Some("New title".to_string()), Some("New comment".to_string()));
        warm(cache.as_ref(), prior.workplace_id).await;

        invalidator.on_before_review_save(Some(&prior), &pending).await;

        for key in cache_keys::workplace_keys(prior.workplace_id) {
            assert!(cached(cache.as_ref(), &key).await);
        }
    }

    #[tokio::test]
    async fn test_moved_review_evicts_both_workplaces() {
        let (cache, invalidator) = setup();
        let prior = review(WorkplaceId::new(), 4, true);
        let mut pending = prior.clone();
        pending.workplace_id = WorkplaceId::new();
        warm(cache.as_ref(), prior.workplace_id).await;
        warm(cache.as_ref(), pending.workplace_id).await;

        invalidator.on_before_review_save(Some(&prior), &pending).await;

        for id in [prior.workplace_id, pending.workplace_id] {
            for key in cache_keys::workplace_keys(id) {
                assert!(!cached(cache.as_ref(), &key).await);
            }
        }
    }

    #[tokio::test]
    async fn test_category_changes() {
        let (cache, invalidator) = setup();
        let prior = Category::new("Retail".to_string());

        cache.set(cache_keys::CATEGORIES, &"cached", TTL).await.unwrap();
        invalidator.on_before_category_save(None, &prior).await;
        assert!(cached(cache.as_ref(), cache_keys::CATEGORIES).await);

        invalidator.on_before_category_save(Some(&prior), &prior.clone()).await;
        assert!(cached(cache.as_ref(), cache_keys::CATEGORIES).await);

        let mut renamed = prior.clone();
        renamed.rename("Trade".to_string());
        invalidator.on_before_category_save(Some(&prior), &renamed).await;
        assert!(!cached(cache.as_ref(), cache_keys::CATEGORIES).await);
    }

    #[tokio::test]
    async fn test_top_category_membership_change_evicts() {
        let (cache, invalidator) = setup();
        let prior = TopCategory::new("Trade".to_string());
        let mut pending = prior.clone();
        pending.set_members([Category::new("Retail".to_string()).id].into_iter().collect());
        cache.set(cache_keys::CATEGORIES, &"cached", TTL).await.unwrap();

        invalidator.on_before_top_category_save(Some(&prior), &pending).await;

        assert!(!cached(cache.as_ref(), cache_keys::CATEGORIES).await);
    }

    #[tokio::test]
    async fn test_cache_outage_is_swallowed() {
        let cache = Arc::new(CountingCache::new(InMemoryCache::new()));
        cache.fail(true);
        let invalidator = CacheInvalidator::new(cache.clone());
        let prior = review(WorkplaceId::new(), 4, true);
        let mut pending = prior.clone();
        pending.soft_delete();

        invalidator.on_before_review_save(Some(&prior), &pending).await;
        assert_eq!(cache.deletes(), 4);
    }
}
