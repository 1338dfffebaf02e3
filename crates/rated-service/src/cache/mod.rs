//! Caching infrastructure for the service layer.
//!
//! Aggregates are stored as JSON behind [`CacheInterface`], backed by Redis
//! in shared deployments and by [`InMemoryCache`] for single-process runs.

mod cache_health;
mod cache_interface;
pub mod cache_keys;
mod memory_cache;
mod redis_cache;

pub use cache_health::CacheHealthCheck;
pub use cache_interface::{read_through, CacheExt, CacheInterface};
pub use memory_cache::InMemoryCache;
pub use redis_cache::{create_redis_pool, RedisCacheService};
