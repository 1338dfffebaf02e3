//! Application state for Axum handlers.

use rated_core::HealthCheck;
use rated_service::{CategoryService, ReviewService, WorkplaceService};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub workplace_service: Arc<dyn WorkplaceService>,
    pub review_service: Arc<dyn ReviewService>,
    pub category_service: Arc<dyn CategoryService>,
    /// Dependencies probed by the readiness endpoint.
    pub health_checks: Vec<Arc<dyn HealthCheck>>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        workplace_service: Arc<dyn WorkplaceService>,
        review_service: Arc<dyn ReviewService>,
        category_service: Arc<dyn CategoryService>,
    ) -> Self {
        Self {
            workplace_service,
            review_service,
            category_service,
            health_checks: Vec::new(),
        }
    }

    /// Adds a dependency to the readiness probe.
    #[must_use]
    pub fn with_health_check(mut self, check: Arc<dyn HealthCheck>) -> Self {
        self.health_checks.push(check);
        self
    }
}
