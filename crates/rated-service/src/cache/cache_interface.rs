//! Cache interface trait for abstracted caching operations.

use rated_core::RatedResult;
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use shaku::Interface;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Cache interface for storing and retrieving cached data.
///
/// Uses JSON strings for type-erased storage to maintain dyn-compatibility.
#[async_trait]
pub trait CacheInterface: Interface + Send + Sync {
    /// Get a raw JSON value from the cache.
    ///
    /// Returns `None` if the key doesn't exist or has expired.
    async fn get_raw(&self, key: &str) -> RatedResult<Option<String>>;

    /// Set a raw JSON value in the cache with a TTL.
    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> RatedResult<()>;

    /// Delete a value from the cache.
    ///
    /// Returns `true` if the key existed and was deleted.
    async fn delete(&self, key: &str) -> RatedResult<bool>;

    /// Check if a key exists in the cache.
    async fn exists(&self, key: &str) -> RatedResult<bool>;

    /// Check if caching is enabled.
    fn is_enabled(&self) -> bool;
}

/// Extension trait with typed methods for convenience.
#[async_trait]
pub trait CacheExt: CacheInterface {
    /// Get a typed value from the cache.
    async fn get<T: DeserializeOwned + Send>(&self, key: &str) -> RatedResult<Option<T>> {
        match self.get_raw(key).await? {
            Some(json) => {
                let value: T = serde_json::from_str(&json)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a typed value in the cache.
    async fn set<T: Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> RatedResult<()> {
        let json = serde_json::to_string(value)?;
        self.set_raw(key, &json, ttl).await
    }
}

// Blanket implementation for all CacheInterface implementations
impl<T: CacheInterface + ?Sized> CacheExt for T {}

/// Returns the cached value for `key`, or computes, stores and returns it.
///
/// Cache failures never fail the read: a failed lookup counts as a miss and
/// a failed store is dropped. Errors from `compute` propagate.
pub async fn read_through<T, Fut>(
    cache: &dyn CacheInterface,
    key: &str,
    ttl: Duration,
    compute: Fut,
) -> RatedResult<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
    Fut: Future<Output = RatedResult<T>> + Send,
{
    match cache.get::<T>(key).await {
        Ok(Some(cached)) => return Ok(cached),
        Ok(None) => {}
        Err(e) => warn!("Cache read failed for key '{}', recomputing: {}", key, e),
    }

    let value = compute.await?;

    if let Err(e) = cache.set(key, &value, ttl).await {
        warn!("Cache write failed for key '{}': {}", key, e);
    }

    Ok(value)
}
