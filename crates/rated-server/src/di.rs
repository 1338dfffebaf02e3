//! Dependency wiring.
//!
//! The process builds one [`AppModule`] at startup: a single database pool,
//! a single aggregate cache, and the services sharing them.

use rated_config::{AppConfig, CacheBackend, CacheConfig, RedisConfig};
use rated_core::{HealthCheck, RatedError, RatedResult};
use rated_repository::{
    CategoryRepository, DatabasePool, DatabasePoolInterface, MySqlCategoryRepository,
    MySqlReviewRepository, MySqlWorkplaceRepository, ReviewRepository, WorkplaceRepository,
};
use rated_rest::AppState;
use rated_service::{
    create_redis_pool, CacheHealthCheck, CacheInterface, CacheInvalidator, CategoryService, CategoryServiceImpl,
    InMemoryCache, RedisCacheService, ReviewService, ReviewServiceImpl, WorkplaceRatingService,
    WorkplaceRatingServiceImpl, WorkplaceService, WorkplaceServiceImpl,
};
use std::sync::Arc;
use tracing::info;

/// Creates the aggregate cache selected by configuration.
pub fn create_cache(
    cache_config: &CacheConfig,
    redis_config: &RedisConfig,
) -> RatedResult<Arc<dyn CacheInterface>> {
    let cache: Arc<dyn CacheInterface> = match cache_config.backend {
        CacheBackend::Redis => {
            let pool = create_redis_pool(redis_config)?;
            Arc::new(RedisCacheService::new(Arc::new(pool)))
        }
        CacheBackend::Memory => Arc::new(InMemoryCache::new()),
        CacheBackend::Disabled => Arc::new(RedisCacheService::disabled()),
    };
    info!("Aggregate cache backend: {:?}", cache_config.backend);
    Ok(cache)
}

/// Every long-lived component of the process.
pub struct AppModule {
    database_pool: Arc<DatabasePool>,
    cache: Arc<dyn CacheInterface>,
    review_repository: Arc<dyn ReviewRepository>,
    rating_service: Arc<dyn WorkplaceRatingService>,
    workplace_service: Arc<dyn WorkplaceService>,
    review_service: Arc<dyn ReviewService>,
    category_service: Arc<dyn CategoryService>,
}

impl AppModule {
    /// Builds the REST application state from the module's services.
    pub fn app_state(&self) -> AppState {
        let database: Arc<dyn HealthCheck> = self.database_pool.clone();
        let cache: Arc<dyn HealthCheck> = Arc::new(CacheHealthCheck::new(self.cache.clone()));
        AppState::new(
            self.workplace_service.clone(),
            self.review_service.clone(),
            self.category_service.clone(),
        )
        .with_health_check(database)
        .with_health_check(cache)
    }
}

/// Builder for [`AppModule`].
#[derive(Default)]
pub struct AppModuleBuilder {
    database_pool: Option<Arc<DatabasePool>>,
    cache: Option<Arc<dyn CacheInterface>>,
    cache_config: CacheConfig,
}

impl AppModuleBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the database pool shared by every repository.
    #[must_use]
    pub fn with_database_pool(mut self, pool: Arc<DatabasePool>) -> Self {
        self.database_pool = Some(pool);
        self
    }

    /// Sets the aggregate cache.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<dyn CacheInterface>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Sets TTLs and page size of the cached aggregates.
    #[must_use]
    pub fn with_cache_config(mut self, config: CacheConfig) -> Self {
        self.cache_config = config;
        self
    }

    /// Wires repositories and services.
    pub fn build(self) -> RatedResult<AppModule> {
        let database_pool = self
            .database_pool
            .ok_or_else(|| RatedError::Configuration("database pool is required".to_string()))?;
        let cache = self
            .cache
            .ok_or_else(|| RatedError::Configuration("cache is required".to_string()))?;

        let pool: Arc<dyn DatabasePoolInterface> = database_pool.clone();
        let review_repository: Arc<dyn ReviewRepository> =
            Arc::new(MySqlReviewRepository::new(pool.clone()));
        let workplace_repository: Arc<dyn WorkplaceRepository> =
            Arc::new(MySqlWorkplaceRepository::new(pool.clone()));
        let category_repository: Arc<dyn CategoryRepository> =
            Arc::new(MySqlCategoryRepository::new(pool));

        let invalidator = CacheInvalidator::new(cache.clone());
        let rating_service: Arc<dyn WorkplaceRatingService> =
            Arc::new(WorkplaceRatingServiceImpl::new(
                review_repository.clone(),
                cache.clone(),
                self.cache_config.clone(),
            ));
        let workplace_service: Arc<dyn WorkplaceService> = Arc::new(WorkplaceServiceImpl::new(
            workplace_repository.clone(),
            rating_service.clone(),
        ));
        let review_service: Arc<dyn ReviewService> = Arc::new(ReviewServiceImpl::new(
            review_repository.clone(),
            workplace_repository,
            rating_service.clone(),
            invalidator.clone(),
        ));
        let category_service: Arc<dyn CategoryService> = Arc::new(CategoryServiceImpl::new(
            category_repository,
            cache.clone(),
            invalidator,
            self.cache_config,
        ));

        Ok(AppModule {
            database_pool,
            cache,
            review_repository,
            rating_service,
            workplace_service,
            review_service,
            category_service,
        })
    }
}

/// Builds the module for a configuration and an open database pool.
pub fn build_app_module(config: &AppConfig, pool: Arc<DatabasePool>) -> RatedResult<AppModule> {
    let cache = create_cache(&config.cache, &config.redis)?;
    AppModuleBuilder::new()
        .with_database_pool(pool)
        .with_cache(cache)
        .with_cache_config(config.cache.clone())
        .build()
}

// ============================================================================
// Module Resolution Helpers
// ============================================================================

/// Trait for resolving business services.
pub trait ServiceResolver {
    fn rating_service(&self) -> Arc<dyn WorkplaceRatingService>;
    fn workplace_service(&self) -> Arc<dyn WorkplaceService>;
    fn review_service(&self) -> Arc<dyn ReviewService>;
    fn category_service(&self) -> Arc<dyn CategoryService>;
}

impl ServiceResolver for AppModule {
    fn rating_service(&self) -> Arc<dyn WorkplaceRatingService> {
        self.rating_service.clone()
    }

    fn workplace_service(&self) -> Arc<dyn WorkplaceService> {
        self.workplace_service.clone()
    }

    fn review_service(&self) -> Arc<dyn ReviewService> {
        self.review_service.clone()
    }

    fn category_service(&self) -> Arc<dyn CategoryService> {
        self.category_service.clone()
    }
}

/// Trait for resolving storage components.
pub trait DatabaseResolver {
    fn database_pool(&self) -> Arc<dyn DatabasePoolInterface>;
    fn review_repository(&self) -> Arc<dyn ReviewRepository>;
}

impl DatabaseResolver for AppModule {
    fn database_pool(&self) -> Arc<dyn DatabasePoolInterface> {
        self.database_pool.clone()
    }

    fn review_repository(&self) -> Arc<dyn ReviewRepository> {
        self.review_repository.clone()
    }
}

/// Trait for resolving the aggregate cache.
pub trait CacheResolver {
    fn cache(&self) -> Arc<dyn CacheInterface>;
}

impl CacheResolver for AppModule {
    fn cache(&self) -> Arc<dyn CacheInterface> {
        self.cache.clone()
    }
}
