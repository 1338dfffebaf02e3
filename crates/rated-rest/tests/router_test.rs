//! Router tests driving the Axum app with stub services.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::Utc;
use http_body_util::BodyExt;
use rated_config::ServerConfig;
use rated_core::{
    CategoryId, HealthCheck, HealthStatus, Page, PageRequest, RatedError, RatedResult, ReviewId,
    StarRating, TopCategoryId, UserId, WorkplaceId,
};
use rated_rest::{create_router, AppState};
use rated_service::{
    CategoryNameRequest, CategoryResponse, CategoryService, CreateWorkplaceRequest, RatingSummary,
    ReviewResponse, ReviewService, SubmitReviewRequest, TopCategoryResponse, UpdateReviewRequest,
    WorkplaceResponse, WorkplaceService, WorkplaceSummary,
};
use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

struct StubWorkplaces {
    known: WorkplaceId,
    unavailable: WorkplaceId,
}

#[async_trait]
impl WorkplaceService for StubWorkplaces {
    async fn create_workplace(
        &self,
        _request: CreateWorkplaceRequest,
    ) -> RatedResult<WorkplaceResponse> {
        unimplemented!()
    }

    async fn get_workplace(&self, id: WorkplaceId) -> RatedResult<WorkplaceResponse> {
        if id == self.unavailable {
            return Err(RatedError::Database("connection reset".to_string()));
        }
        if id != self.known {
            return Err(RatedError::not_found("Workplace", id));
        }
        Ok(WorkplaceResponse {
            id,
            name: "Nordic Bakery".to_string(),
            vat: None,
            website: None,
            address: None,
            stars: StarRating::from_half_steps(8),
            amount_of_reviews: 5,
            categories: Vec::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        })
    }

    async fn search_workplaces(
        &self,
        query: &str,
        page: PageRequest,
    ) -> RatedResult<Page<WorkplaceSummary>> {
        let results = if "nordic bakery".contains(&query.to_lowercase()) {
            vec![WorkplaceSummary {
                id: self.known,
                name: "Nordic Bakery".to_string(),
                website: None,
                stars: StarRating::from_half_steps(8),
                amount_of_reviews: 5,
                categories: Vec::new(),
            }]
        } else {
            Vec::new()
        };
        let count = results.len() as u64;
        Ok(Page::new(results, page, count))
    }

    async fn rating_summary(&self, id: WorkplaceId) -> RatedResult<RatingSummary> {
        self.get_workplace(id).await?;
        Ok(RatingSummary {
            workplace_id: id,
            stars: StarRating::from_half_steps(8),
            amount_of_reviews: 5,
            star_percentages: [("1", "0"), ("2", "20"), ("3", "20"), ("4", "20"), ("5", "40")]
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        })
    }
}

#[derive(Default)]
struct StubReviews {
    requested: Mutex<Vec<PageRequest>>,
}

#[async_trait]
impl ReviewService for StubReviews {
    async fn submit_review(
        &self,
        _author: UserId,
        _workplace_id: WorkplaceId,
        _request: SubmitReviewRequest,
    ) -> RatedResult<ReviewResponse> {
        unimplemented!()
    }

    async fn verify_review(&self, _id: ReviewId, _verifier: UserId) -> RatedResult<ReviewResponse> {
        unimplemented!()
    }

    async fn decline_review(&self, _id: ReviewId) -> RatedResult<()> {
        unimplemented!()
    }

    async fn update_review(
        &self,
        _id: ReviewId,
        _request: UpdateReviewRequest,
    ) -> RatedResult<ReviewResponse> {
        unimplemented!()
    }

    async fn list_unverified_reviews(
        &self,
        _page: PageRequest,
    ) -> RatedResult<Page<ReviewResponse>> {
        unimplemented!()
    }

    async fn list_workplace_reviews(
        &self,
        _workplace_id: WorkplaceId,
        page: PageRequest,
    ) -> RatedResult<Page<ReviewResponse>> {
        self.requested.lock().unwrap().push(page);
        Ok(Page::empty(page))
    }
}

struct StubCategories;

#[async_trait]
impl CategoryService for StubCategories {
    async fn list_categories(&self) -> RatedResult<Vec<TopCategoryResponse>> {
        Ok(vec![TopCategoryResponse {
            id: TopCategoryId::new(),
            name: "Trade".to_string(),
            categories: vec![CategoryResponse {
                id: CategoryId::new(),
                name: "Retail".to_string(),
            }],
        }])
    }

    async fn create_category(
        &self,
        _request: CategoryNameRequest,
    ) -> RatedResult<CategoryResponse> {
        unimplemented!()
    }

    async fn rename_category(
        &self,
        _id: CategoryId,
        _request: CategoryNameRequest,
    ) -> RatedResult<CategoryResponse> {
        unimplemented!()
    }

    async fn delete_category(&self, _id: CategoryId) -> RatedResult<()> {
        unimplemented!()
    }

    async fn create_top_category(
        &self,
        _request: CategoryNameRequest,
    ) -> RatedResult<TopCategoryResponse> {
        unimplemented!()
    }

    async fn rename_top_category(
        &self,
        _id: TopCategoryId,
        _request: CategoryNameRequest,
    ) -> RatedResult<TopCategoryResponse> {
        unimplemented!()
    }

    async fn set_top_category_members(
        &self,
        _id: TopCategoryId,
        _members: BTreeSet<CategoryId>,
    ) -> RatedResult<TopCategoryResponse> {
        unimplemented!()
    }

    async fn delete_top_category(&self, _id: TopCategoryId) -> RatedResult<()> {
        unimplemented!()
    }
}

struct SwitchableCheck(AtomicBool);

#[async_trait]
impl HealthCheck for SwitchableCheck {
    fn name(&self) -> &str {
        "database"
    }

    async fn check(&self) -> HealthStatus {
        if self.0.load(Ordering::SeqCst) {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy("connection refused".to_string())
        }
    }
}

struct TestApp {
    workplace: WorkplaceId,
    unavailable: WorkplaceId,
    reviews: Arc<StubReviews>,
    database: Arc<SwitchableCheck>,
    router: Router,
}

fn app() -> TestApp {
    let workplace = WorkplaceId::new();
    let unavailable = WorkplaceId::new();
    let reviews = Arc::new(StubReviews::default());
    let database = Arc::new(SwitchableCheck(AtomicBool::new(true)));
    let state = AppState::new(
        Arc::new(StubWorkplaces {
            known: workplace,
            unavailable,
        }),
        reviews.clone(),
        Arc::new(StubCategories),
    )
    .with_health_check(database.clone());
    TestApp {
        workplace,
        unavailable,
        reviews,
        database,
        router: create_router(state, &ServerConfig::default()),
    }
}

async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

#[tokio::test]
async fn test_get_workplace() {
    let app = app();
    let (status, body) = get(&app.router, &format!("/api/v1/workplaces/{}", app.workplace)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["name"], "Nordic Bakery");
    assert_eq!(body["data"]["stars"], "4.0");
    assert_eq!(body["data"]["amount_of_reviews"], 5);
}

#[tokio::test]
async fn test_unknown_workplace_is_404() {
    let app = app();
    let (status, body) =
        get(&app.router, &format!("/api/v1/workplaces/{}", WorkplaceId::new())).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_store_outage_is_503_with_retry_hint() {
    let app = app();
    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/workplaces/{}", app.unavailable))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.headers()["retry-after"], "5");
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"]["code"], "DATABASE_ERROR");
}

#[tokio::test]
async fn test_malformed_id_is_400() {
    let app = app();
    let (status, body) = get(&app.router, "/api/v1/workplaces/not-a-uuid").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_rating_summary() {
    let app = app();
    let (status, body) =
        get(&app.router, &format!("/api/v1/workplaces/{}/rating", app.workplace)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["stars"], "4.0");
    assert_eq!(body["data"]["star_percentages"]["5"], "40");
    assert_eq!(body["data"]["star_percentages"]["1"], "0");
}

#[tokio::test]
async fn test_search_workplaces() {
    let app = app();
    let (status, body) = get(&app.router, "/api/v1/workplaces?search=bakery").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["count"], 1);
    assert_eq!(body["data"]["results"][0]["name"], "Nordic Bakery");

    let (_, body) = get(&app.router, "/api/v1/workplaces?search=garage").await;
    assert_eq!(body["data"]["count"], 0);
}

#[tokio::test]
async fn test_review_listing_forwards_page() {
    let app = app();
    let uri = format!("/api/v1/workplaces/{}/reviews?page=2", app.workplace);
    let (status, body) = get(&app.router, &uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["page"], 2);
    assert_eq!(
        app.reviews.requested.lock().unwrap().as_slice(),
        &[PageRequest::new(2, PageRequest::DEFAULT_SIZE)]
    );
}

#[tokio::test]
async fn test_huge_page_numbers_are_served() {
    let app = app();
    let huge = usize::MAX;

    let uri = format!("/api/v1/workplaces/{}/reviews?page={huge}", app.workplace);
    let (status, body) = get(&app.router, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["next"].is_null());

    let uri = format!("/api/v1/workplaces?search=bakery&page={huge}");
    let (status, body) = get(&app.router, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["next"].is_null());
    assert_eq!(body["data"]["page"], huge as u64);
}

#[tokio::test]
async fn test_category_listing() {
    let app = app();
    let (status, body) = get(&app.router, "/api/v1/categories").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["name"], "Trade");
    assert_eq!(body["data"][0]["categories"][0]["name"], "Retail");
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = app();
    assert_eq!(get(&app.router, "/health").await.0, StatusCode::OK);
    assert_eq!(get(&app.router, "/live").await.0, StatusCode::OK);

    let (status, body) = get(&app.router, "/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["checks"]["database"], "healthy");

    app.database.0.store(false, Ordering::SeqCst);
    let (status, body) = get(&app.router, "/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "not_ready");
}

struct DegradedCache;

#[async_trait]
impl HealthCheck for DegradedCache {
    fn name(&self) -> &str {
        "cache"
    }

    async fn check(&self) -> HealthStatus {
        HealthStatus::Degraded("connection refused".to_string())
    }
}

#[tokio::test]
async fn test_degraded_cache_keeps_service_ready() {
    let state = AppState::new(
        Arc::new(StubWorkplaces {
            known: WorkplaceId::new(),
            unavailable: WorkplaceId::new(),
        }),
        Arc::new(StubReviews::default()),
        Arc::new(StubCategories),
    )
    .with_health_check(Arc::new(DegradedCache));
    let router = create_router(state, &ServerConfig::default());

    let (status, body) = get(&router, "/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["checks"]["cache"], "degraded");
}
