//! Readiness probe for the aggregate cache.

use super::CacheInterface;
use async_trait::async_trait;
use rated_core::{HealthCheck, HealthStatus};
use std::sync::Arc;

const PROBE_KEY: &str = "rated:health";

/// Reports a failing cache as degraded, never unhealthy.
///
/// Reads fall back to the store while the cache is down, so an outage costs
/// latency but not correctness.
pub struct CacheHealthCheck {
    cache: Arc<dyn CacheInterface>,
}

impl CacheHealthCheck {
    /// Creates a probe for the given cache.
    #[must_use]
    pub fn new(cache: Arc<dyn CacheInterface>) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl HealthCheck for CacheHealthCheck {
    fn name(&self) -> &str {
        "cache"
    }

    async fn check(&self) -> HealthStatus {
        if !self.cache.is_enabled() {
            return HealthStatus::Healthy;
        }
        match self.cache.exists(PROBE_KEY).await {
            Ok(_) => HealthStatus::Healthy,
            Err(e) => HealthStatus::Degraded(e.to_string()),
        }
    }
}
