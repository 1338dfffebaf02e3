//! Workplace controller: lookups, ratings and review listings.

use crate::{
    extractors::{PaginationQuery, SearchQuery},
    responses::{ok, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Router,
};
use rated_core::{Page, RatedError, WorkplaceId};
use rated_service::{RatingSummary, ReviewResponse, WorkplaceResponse, WorkplaceSummary};
use tracing::debug;

/// Creates the workplace router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(search_workplaces))
        .route("/:id", get(get_workplace))
        .route("/:id/rating", get(get_rating))
        .route("/:id/reviews", get(list_reviews))
}

/// Search workplaces by name, VAT number or website.
async fn search_workplaces(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Page<WorkplaceSummary>> {
    debug!("Search workplaces request: '{}'", query.text());

    let response = state
        .workplace_service
        .search_workplaces(query.text(), query.page_request())
        .await?;
    ok(response)
}

/// Get a workplace with its rating.
async fn get_workplace(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<WorkplaceResponse> {
    debug!("Get workplace request: {}", id);

    let response = state.workplace_service.get_workplace(parse_workplace_id(&id)?).await?;
    ok(response)
}

/// Get every rating aggregate of a workplace.
async fn get_rating(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<RatingSummary> {
    debug!("Get rating request: {}", id);

    let response = state.workplace_service.rating_summary(parse_workplace_id(&id)?).await?;
    ok(response)
}

/// List the verified reviews of a workplace, newest first.
async fn list_reviews(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(pagination): Query<PaginationQuery>,
) -> ApiResult<Page<ReviewResponse>> {
    debug!("List reviews request: {}", id);

    let response = state
        .review_service
        .list_workplace_reviews(parse_workplace_id(&id)?, pagination.into())
        .await?;
    ok(response)
}

/// Helper to parse a workplace ID from a path parameter.
fn parse_workplace_id(id: &str) -> Result<WorkplaceId, AppError> {
    WorkplaceId::parse(id)
        .map_err(|_| AppError(RatedError::Validation(format!("Invalid workplace ID: {id}"))))
}
