//! Contract tests for the restaurant v2 API
//!
//! Validates status codes, bodies and headers of /restaurant/v2 against the
//! real route table, with the repository replaced by a stub.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::{test, App};
use async_trait::async_trait;
use restaurant_api::app::AppContext;
use restaurant_api::core::{AppError, ConnectionProbe, ConnectionStatus, Result};
use restaurant_api::health::HealthSettings;
use restaurant_api::http_client::ApiClient;
use restaurant_api::middleware::{ErrorHandler, OutputCache, RequestId};
use restaurant_api::restaurants::{Restaurant, RestaurantRepository, SearchCriteria};
use serde_json::json;

#[derive(Default)]
struct StubRepository {
    restaurants: Vec<Restaurant>,
    by_id: Restaurant,
    write_result: bool,
    unreachable: bool,
    get_all_calls: AtomicUsize,
    last_search: Mutex<Option<(String, String)>>,
    last_write: Mutex<Option<Restaurant>>,
}

impl StubRepository {
    fn check(&self) -> Result<()> {
        if self.unreachable {
            return Err(AppError::internal("store unreachable"));
        }
        Ok(())
    }
}

#[async_trait]
impl RestaurantRepository for StubRepository {
    async fn get_all(&self) -> Result<Vec<Restaurant>> {
        self.get_all_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.restaurants.clone())
    }

    async fn find(&self, name: &str, cuisine: &str) -> Result<Vec<Restaurant>> {
        self.check()?;
        *self.last_search.lock().unwrap() = Some((name.to_string(), cuisine.to_string()));
        Ok(self.restaurants.clone())
    }

    async fn get_by_id(&self, _id: &str) -> Result<Restaurant> {
        self.check()?;
        Ok(self.by_id.clone())
    }

    async fn insert(&self, restaurant: Restaurant) -> Result<bool> {
        self.check()?;
        *self.last_write.lock().unwrap() = Some(restaurant);
        Ok(self.write_result)
    }

    async fn update(&self, restaurant: Restaurant) -> Result<bool> {
        self.check()?;
        *self.last_write.lock().unwrap() = Some(restaurant);
        Ok(self.write_result)
    }
}

struct UpProbe;

#[async_trait]
impl ConnectionProbe for UpProbe {
    async fn connection_check(&self) -> ConnectionStatus {
        let now = chrono::Utc::now();
        ConnectionStatus::connected(now, now)
    }
}

fn context(repository: Arc<StubRepository>) -> AppContext {
    AppContext {
        repository,
        probe: Arc::new(UpProbe),
        api_client: ApiClient::new("http://127.0.0.1:9").unwrap(),
        output_cache: OutputCache::new(Duration::from_secs(60)),
        health: HealthSettings::default(),
    }
}

fn stored(id: &str) -> Restaurant {
    Restaurant {
        id: id.to_string(),
        ..Restaurant::new("test", "test")
    }
}

macro_rules! app_for {
    ($repository:expr) => {{
        let ctx = context($repository.clone());
        test::init_service(App::new().configure(|cfg| ctx.configure(cfg))).await
    }};
}

#[actix_web::test]
async fn test_get_all_empty_returns_404() {
    let repository = Arc::new(StubRepository::default());
    let app = app_for!(repository);

    let req = test::TestRequest::get().uri("/restaurant/v2").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn test_get_all_with_records_returns_200() {
    let repository = Arc::new(StubRepository {
        restaurants: vec![stored("a1"), stored("b2")],
        ..Default::default()
    });
    let app = app_for!(repository);

    let req = test::TestRequest::get().uri("/restaurant/v2").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    assert_eq!(resp.headers().get("api-supported-versions").unwrap(), "2.0");
    let body: Vec<Restaurant> = test::read_body_json(resp).await;
    assert_eq!(body.len(), 2);
}

#[actix_web::test]
async fn test_collection_accepts_trailing_slash() {
    let repository = Arc::new(StubRepository {
        restaurants: vec![stored("a1")],
        write_result: true,
        ..Default::default()
    });
    let app = app_for!(repository);

    let req = test::TestRequest::get().uri("/restaurant/v2/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let req = test::TestRequest::post()
        .uri("/restaurant/v2/")
        .set_json(Restaurant::new("test", "test"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: bool = test::read_body_json(resp).await;
    assert!(body);
}

#[actix_web::test]
async fn test_error_body_carries_request_id_as_trace_id() {
    let repository = Arc::new(StubRepository {
        unreachable: true,
        ..Default::default()
    });
    let ctx = context(repository);
    let app = test::init_service(
        App::new()
            .wrap(ErrorHandler)
            .wrap(RequestId)
            .configure(|cfg| ctx.configure(cfg)),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/restaurant/v2/123456")
        .insert_header(("X-Request-ID", "req-7"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 500);
    assert_eq!(resp.headers().get("api-supported-versions").unwrap(), "2.0");
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["traceId"], "req-7");
}

#[actix_web::test]
async fn test_get_all_is_output_cached() {
    let repository = Arc::new(StubRepository {
        restaurants: vec![stored("a1")],
        ..Default::default()
    });
    let app = app_for!(repository);

    for _ in 0..3 {
        let req = test::TestRequest::get().uri("/restaurant/v2").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
    }

    assert_eq!(repository.get_all_calls.load(Ordering::SeqCst), 1);
}

#[actix_web::test]
async fn test_empty_list_is_not_cached() {
    let repository = Arc::new(StubRepository::default());
    let app = app_for!(repository);

    for _ in 0..2 {
        let req = test::TestRequest::get().uri("/restaurant/v2").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);
    }

    assert_eq!(repository.get_all_calls.load(Ordering::SeqCst), 2);
}

#[actix_web::test]
async fn test_find_empty_returns_404() {
    let repository = Arc::new(StubRepository::default());
    let app = app_for!(repository);

    let req = test::TestRequest::post()
        .uri("/restaurant/v2/find")
        .set_json(SearchCriteria {
            name: "test".to_string(),
            cuisine: "test".to_string(),
        })
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn test_find_forwards_criteria_and_returns_200() {
    let repository = Arc::new(StubRepository {
        restaurants: vec![stored("a1"), stored("b2")],
        ..Default::default()
    });
    let app = app_for!(repository);

    let req = test::TestRequest::post()
        .uri("/restaurant/v2/find")
        .set_json(json!({ "name": "Jo", "cuisine": "Thai" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    assert_eq!(
        *repository.last_search.lock().unwrap(),
        Some(("Jo".to_string(), "Thai".to_string()))
    );
}

#[actix_web::test]
async fn test_get_by_id_missing_returns_404() {
    let repository = Arc::new(StubRepository::default());
    let app = app_for!(repository);

    let req = test::TestRequest::get()
        .uri("/restaurant/v2/123456")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn test_get_by_id_match_returns_200() {
    let repository = Arc::new(StubRepository {
        by_id: stored("123456"),
        ..Default::default()
    });
    let app = app_for!(repository);

    let req = test::TestRequest::get()
        .uri("/restaurant/v2/123456")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: Restaurant = test::read_body_json(resp).await;
    assert_eq!(body.id, "123456");
    assert_eq!(body.cuisine_type, "test");
}

#[actix_web::test]
async fn test_post_returns_200_with_outcome() {
    for outcome in [false, true] {
        let repository = Arc::new(StubRepository {
            write_result: outcome,
            ..Default::default()
        });
        let app = app_for!(repository);

        let req = test::TestRequest::post()
            .uri("/restaurant/v2")
            .set_json(json!({ "name": "test", "cuisineType": "test" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 200);
        let body: bool = test::read_body_json(resp).await;
        assert_eq!(body, outcome);

        let written = repository.last_write.lock().unwrap().clone().unwrap();
        assert_eq!(written.name, "test");
        assert!(written.id.is_empty());
    }
}

#[actix_web::test]
async fn test_put_returns_200_with_outcome() {
    for outcome in [false, true] {
        let repository = Arc::new(StubRepository {
            write_result: outcome,
            ..Default::default()
        });
        let app = app_for!(repository);

        let req = test::TestRequest::put()
            .uri("/restaurant/v2")
            .set_json(stored("123456"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 200);
        let body: bool = test::read_body_json(resp).await;
        assert_eq!(body, outcome);
    }
}

#[actix_web::test]
async fn test_writes_do_not_hit_the_list_cache() {
    let repository = Arc::new(StubRepository {
        write_result: true,
        ..Default::default()
    });
    let app = app_for!(repository);

    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri("/restaurant/v2")
            .set_json(stored(""))
            .to_request();
        let resp = test::call_service(&app, req).await;
        let body: bool = test::read_body_json(resp).await;
        assert!(body);
    }

    assert_eq!(repository.get_all_calls.load(Ordering::SeqCst), 0);
}

#[actix_web::test]
async fn test_malformed_body_returns_400() {
    let repository = Arc::new(StubRepository::default());
    let app = app_for!(repository);

    let req = test::TestRequest::post()
        .uri("/restaurant/v2")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"name\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_store_failure_returns_500() {
    let repository = Arc::new(StubRepository {
        unreachable: true,
        ..Default::default()
    });
    let app = app_for!(repository);

    let req = test::TestRequest::get()
        .uri("/restaurant/v2/123456")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 500);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["title"], "An unhandled error occurred");
}
