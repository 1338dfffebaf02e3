//! In-memory collaborators shared by the service tests.

use crate::cache::{CacheInterface, InMemoryCache};
use async_trait::async_trait;
use rated_core::{
    Category, CategoryId, CountableReview, Page, PageRequest, RatedError, RatedResult, Review,
    ReviewId, Stars, TopCategory, TopCategoryId, UserId, Workplace, WorkplaceId,
};
use rated_repository::{CategoryRepository, ReviewRepository, WorkplaceRepository};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Builds a review with whole stars, optionally verified.
pub fn review(workplace_id: WorkplaceId, stars: u8, verified: bool) -> Review {
    let mut review = Review::new(
        workplace_id,
        UserId::new(),
        Stars::whole(stars).unwrap(),
        "Internship".to_string(),
        "Learned a lot".to_string(),
    );
    if verified {
        review.verify(UserId::new());
    }
    review
}

fn paginate<T: Clone>(items: &[T], page: PageRequest) -> Page<T> {
    let results = items
        .iter()
        .skip(page.offset())
        .take(page.limit())
        .cloned()
        .collect();
    Page::new(results, page, items.len() as u64)
}

fn store_down() -> RatedError {
    RatedError::Database("connection refused".to_string())
}

/// Mock review repository counting aggregate queries.
#[derive(Default)]
pub struct MockReviewRepository {
    reviews: Mutex<HashMap<ReviewId, Review>>,
    countable_queries: AtomicUsize,
    count_queries: AtomicUsize,
    page_queries: AtomicUsize,
    failing: AtomicBool,
}

impl MockReviewRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a review without going through a service.
    pub fn add(&self, review: Review) {
        self.reviews.lock().unwrap().insert(review.id, review);
    }

    pub fn get(&self, id: ReviewId) -> Option<Review> {
        self.reviews.lock().unwrap().get(&id).cloned()
    }

    pub fn countable_queries(&self) -> usize {
        self.countable_queries.load(Ordering::SeqCst)
    }

    pub fn count_queries(&self) -> usize {
        self.count_queries.load(Ordering::SeqCst)
    }

    pub fn page_queries(&self) -> usize {
        self.page_queries.load(Ordering::SeqCst)
    }

    pub fn fail(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> RatedResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(store_down());
        }
        Ok(())
    }

    fn countable(&self, workplace_id: WorkplaceId) -> Vec<Review> {
        let mut reviews: Vec<Review> = self
            .reviews
            .lock()
            .unwrap()
            .values()
            .filter(|r| r.workplace_id == workplace_id && r.is_countable())
            .cloned()
            .collect();
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        reviews
    }
}

#[async_trait]
impl ReviewRepository for MockReviewRepository {
    async fn find_by_id(&self, id: ReviewId) -> RatedResult<Option<Review>> {
        self.check()?;
        Ok(self.get(id))
    }

    async fn find_countable_by_workplace(
        &self,
        workplace_id: WorkplaceId,
    ) -> RatedResult<Vec<CountableReview>> {
        self.check()?;
        self.countable_queries.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .countable(workplace_id)
            .iter()
            .map(CountableReview::from)
            .collect())
    }

    async fn count_countable_by_workplace(&self, workplace_id: WorkplaceId) -> RatedResult<u64> {
        self.check()?;
        self.count_queries.fetch_add(1, Ordering::SeqCst);
        Ok(self.countable(workplace_id).len() as u64)
    }

    async fn find_countable_page(
        &self,
        workplace_id: WorkplaceId,
        page: PageRequest,
    ) -> RatedResult<Page<Review>> {
        self.check()?;
        self.page_queries.fetch_add(1, Ordering::SeqCst);
        Ok(paginate(&self.countable(workplace_id), page))
    }

    async fn find_unverified(&self, page: PageRequest) -> RatedResult<Page<Review>> {
        self.check()?;
        let mut reviews: Vec<Review> = self
            .reviews
            .lock()
            .unwrap()
            .values()
            .filter(|r| r.verified_by.is_none() && !r.is_deleted())
            .cloned()
            .collect();
        reviews.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(paginate(&reviews, page))
    }

    async fn insert(&self, review: &Review) -> RatedResult<Review> {
        self.check()?;
        self.add(review.clone());
        Ok(review.clone())
    }

    async fn update(&self, review: &Review) -> RatedResult<Review> {
        self.check()?;
        let mut reviews = self.reviews.lock().unwrap();
        if !reviews.contains_key(&review.id) {
            return Err(RatedError::not_found("Review", review.id));
        }
        reviews.insert(review.id, review.clone());
        Ok(review.clone())
    }
}

/// Mock workplace repository.
#[derive(Default)]
pub struct MockWorkplaceRepository {
    workplaces: Mutex<Vec<Workplace>>,
}

impl MockWorkplaceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(workplaces: Vec<Workplace>) -> Self {
        Self {
            workplaces: Mutex::new(workplaces),
        }
    }
}

#[async_trait]
impl WorkplaceRepository for MockWorkplaceRepository {
    async fn find_by_id(&self, id: WorkplaceId) -> RatedResult<Option<Workplace>> {
        Ok(self
            .workplaces
            .lock()
            .unwrap()
            .iter()
            .find(|w| w.id == id && !w.is_deleted())
            .cloned())
    }

    async fn search(&self, query: &str, page: PageRequest) -> RatedResult<Page<Workplace>> {
        let mut matches: Vec<Workplace> = self
            .workplaces
            .lock()
            .unwrap()
            .iter()
            .filter(|w| !w.is_deleted() && w.matches(query))
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(paginate(&matches, page))
    }

    async fn insert(&self, workplace: &Workplace) -> RatedResult<Workplace> {
        let mut workplaces = self.workplaces.lock().unwrap();
        if workplaces.iter().any(|w| w.name == workplace.name) {
            return Err(RatedError::conflict(format!(
                "Duplicate entry '{}' for key 'workplaces.name'",
                workplace.name
            )));
        }
        workplaces.push(workplace.clone());
        Ok(workplace.clone())
    }
}

/// Mock category repository counting listing queries.
#[derive(Default)]
pub struct MockCategoryRepository {
    categories: Mutex<HashMap<CategoryId, Category>>,
    top_categories: Mutex<HashMap<TopCategoryId, TopCategory>>,
    list_queries: AtomicUsize,
}

impl MockCategoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list_queries(&self) -> usize {
        self.list_queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CategoryRepository for MockCategoryRepository {
    async fn find_category(&self, id: CategoryId) -> RatedResult<Option<Category>> {
        Ok(self.categories.lock().unwrap().get(&id).cloned())
    }

    async fn find_top_category(&self, id: TopCategoryId) -> RatedResult<Option<TopCategory>> {
        Ok(self.top_categories.lock().unwrap().get(&id).cloned())
    }

    async fn list_categories(&self) -> RatedResult<Vec<Category>> {
        self.list_queries.fetch_add(1, Ordering::SeqCst);
        let mut categories: Vec<Category> = self
            .categories
            .lock()
            .unwrap()
            .values()
            .filter(|c| !c.is_deleted())
            .cloned()
            .collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn list_top_categories(&self) -> RatedResult<Vec<TopCategory>> {
        let mut tops: Vec<TopCategory> = self
            .top_categories
            .lock()
            .unwrap()
            .values()
            .filter(|t| !t.is_deleted())
            .cloned()
            .collect();
        tops.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tops)
    }

    async fn insert_category(&self, category: &Category) -> RatedResult<Category> {
        self.categories
            .lock()
            .unwrap()
            .insert(category.id, category.clone());
        Ok(category.clone())
    }

    async fn update_category(&self, category: &Category) -> RatedResult<Category> {
        self.insert_category(category).await
    }

    async fn insert_top_category(&self, top_category: &TopCategory) -> RatedResult<TopCategory> {
        self.top_categories
            .lock()
            .unwrap()
            .insert(top_category.id, top_category.clone());
        Ok(top_category.clone())
    }

    async fn update_top_category(&self, top_category: &TopCategory) -> RatedResult<TopCategory> {
        self.insert_top_category(top_category).await
    }
}

/// Cache wrapper counting hits and deletes and recording write TTLs,
/// with a switchable outage.
pub struct CountingCache {
    inner: InMemoryCache,
    hits: AtomicUsize,
    deletes: AtomicUsize,
    ttls: Mutex<HashMap<String, Duration>>,
    failing: AtomicBool,
}

impl CountingCache {
    pub fn new(inner: InMemoryCache) -> Self {
        Self {
            inner,
            hits: AtomicUsize::new(0),
            deletes: AtomicUsize::new(0),
            ttls: Mutex::new(HashMap::new()),
            failing: AtomicBool::new(false),
        }
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn deletes(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

    /// TTL of the last successful write to `key`.
    pub fn ttl_of(&self, key: &str) -> Option<Duration> {
        self.ttls.lock().unwrap().get(key).copied()
    }

    pub fn fail(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> RatedResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(RatedError::Cache("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl CacheInterface for CountingCache {
    async fn get_raw(&self, key: &str) -> RatedResult<Option<String>> {
        self.check()?;
        let value = self.inner.get_raw(key).await?;
        if value.is_some() {
            self.hits.fetch_add(1, Ordering::SeqCst);
        }
        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> RatedResult<()> {
        self.check()?;
        self.inner.set_raw(key, value, ttl).await?;
        self.ttls.lock().unwrap().insert(key.to_string(), ttl);
        Ok(())
    }

    async fn delete(&self, key: &str) -> RatedResult<bool> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.inner.delete(key).await
    }

    async fn exists(&self, key: &str) -> RatedResult<bool> {
        self.check()?;
        self.inner.exists(key).await
    }

    fn is_enabled(&self) -> bool {
        true
    }
}
