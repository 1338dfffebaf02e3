//! Category listing controller.

use crate::{
    responses::{ok, ApiResult},
    state::AppState,
};
use axum::{extract::State, routing::get, Router};
use rated_service::TopCategoryResponse;
use tracing::debug;

/// Creates the category router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_categories))
}

/// List top categories with their categories.
async fn list_categories(State(state): State<AppState>) -> ApiResult<Vec<TopCategoryResponse>> {
    debug!("List categories request");

    let response = state.category_service.list_categories().await?;
    ok(response)
}
