//! Workplace service trait definition.

use crate::dto::{CreateWorkplaceRequest, RatingSummary, WorkplaceResponse, WorkplaceSummary};
use async_trait::async_trait;
use rated_core::{Interface, Page, PageRequest, RatedResult, WorkplaceId};

/// Workplace registration and views enriched with cached rating aggregates.
#[async_trait]
pub trait WorkplaceService: Interface + Send + Sync {
    /// Registers a new workplace. A taken name is a `Conflict`.
    async fn create_workplace(
        &self,
        request: CreateWorkplaceRequest,
    ) -> RatedResult<WorkplaceResponse>;

    /// Gets a workplace by ID.
    async fn get_workplace(&self, id: WorkplaceId) -> RatedResult<WorkplaceResponse>;

    /// Searches workplaces by name, VAT number or website.
    async fn search_workplaces(
        &self,
        query: &str,
        page: PageRequest,
    ) -> RatedResult<Page<WorkplaceSummary>>;

    /// Gets every rating aggregate of a workplace.
    async fn rating_summary(&self, id: WorkplaceId) -> RatedResult<RatingSummary>;
}
