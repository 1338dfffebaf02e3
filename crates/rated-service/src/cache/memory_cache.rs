//! Process-local cache implementation.

use super::CacheInterface;
use async_trait::async_trait;
use parking_lot::RwLock;
use rated_core::RatedResult;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use tracing::debug;

struct Entry {
    value: String,
    expires_at: Instant,
}

/// Map size that triggers the first sweep of expired entries.
const DEFAULT_SWEEP_THRESHOLD: usize = 1024;

/// In-memory cache with per-entry expiry.
///
/// Expired entries read as absent. They are dropped when their key is read,
/// and in bulk whenever a write finds the map past its sweep threshold.
pub struct InMemoryCache {
    entries: RwLock<HashMap<String, Entry>>,
    min_sweep_at: usize,
    sweep_at: AtomicUsize,
}

impl InMemoryCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::with_sweep_threshold(DEFAULT_SWEEP_THRESHOLD)
    }

    /// Create an empty cache that sweeps once it holds `threshold` entries.
    #[must_use]
    pub fn with_sweep_threshold(threshold: usize) -> Self {
        let threshold = threshold.max(1);
        Self {
            entries: RwLock::new(HashMap::new()),
            min_sweep_at: threshold,
            sweep_at: AtomicUsize::new(threshold),
        }
    }

    /// Drops expired entries once the map has grown past the threshold.
    ///
    /// The next threshold is twice the surviving size, so a map full of
    /// live entries is not rescanned on every write.
    fn sweep_if_due(&self, entries: &mut HashMap<String, Entry>, now: Instant) {
        if entries.len() < self.sweep_at.load(Ordering::Relaxed) {
            return;
        }
        let before = entries.len();
        entries.retain(|_, entry| entry.expires_at > now);
        let next = entries.len().saturating_mul(2).max(self.min_sweep_at);
        self.sweep_at.store(next, Ordering::Relaxed);
        debug!("Swept {} expired cache entries", before - entries.len());
    }

    /// Number of live (unexpired) entries.
    #[must_use]
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .values()
            .filter(|entry| entry.expires_at > now)
            .count()
    }

    /// Returns true if the cache holds no live entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CacheInterface for InMemoryCache {
    fn is_enabled(&self) -> bool {
        true
    }

    async fn get_raw(&self, key: &str) -> RatedResult<Option<String>> {
        let now = Instant::now();
        {
            let entries = self.entries.read();
            match entries.get(key) {
                Some(entry) if entry.expires_at > now => {
                    debug!("Cache hit for key '{}'", key);
                    return Ok(Some(entry.value.clone()));
                }
                Some(_) => {}
                None => {
                    debug!("Cache miss for key '{}'", key);
                    return Ok(None);
                }
            }
        }

        let mut entries = self.entries.write();
        if entries.get(key).is_some_and(|entry| entry.expires_at <= now) {
            entries.remove(key);
        }
        debug!("Cache entry expired for key '{}'", key);
        Ok(None)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> RatedResult<()> {
        let now = Instant::now();
        let mut entries = self.entries.write();
        self.sweep_if_due(&mut entries, now);
        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: now + ttl,
            },
        );
        drop(entries);
        debug!("Cached key '{}' with TTL {}s", key, ttl.as_secs());
        Ok(())
    }

    async fn delete(&self, key: &str) -> RatedResult<bool> {
        let now = Instant::now();
        let removed = self.entries.write().remove(key);
        Ok(removed.is_some_and(|entry| entry.expires_at > now))
    }

    async fn exists(&self, key: &str) -> RatedResult<bool> {
        let now = Instant::now();
        Ok(self
            .entries
            .read()
            .get(key)
            .is_some_and(|entry| entry.expires_at > now))
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InMemoryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryCache")
            .field("entries", &self.entries.read().len())
            .finish()
    }
}
