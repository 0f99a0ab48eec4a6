//! Contract tests for the deprecated restaurant v1 API
//!
//! v1 never answers 404 for empty results: lists come back empty and a
//! missing record comes back with an empty id.

use std::sync::Arc;
use std::time::Duration;

use actix_web::{test, App};
use async_trait::async_trait;
use restaurant_api::app::AppContext;
use restaurant_api::core::{ConnectionProbe, ConnectionStatus, Result};
use restaurant_api::health::HealthSettings;
use restaurant_api::http_client::ApiClient;
use restaurant_api::middleware::OutputCache;
use restaurant_api::restaurants::{Restaurant, RestaurantRepository};

#[derive(Default)]
struct FixedRepository {
    restaurants: Vec<Restaurant>,
    by_id: Restaurant,
}

#[async_trait]
impl RestaurantRepository for FixedRepository {
    async fn get_all(&self) -> Result<Vec<Restaurant>> {
        Ok(self.restaurants.clone())
    }

    async fn find(&self, name: &str, cuisine: &str) -> Result<Vec<Restaurant>> {
        Ok(self
            .restaurants
            .iter()
            .filter(|r| r.name.contains(name) && r.cuisine_type == cuisine)
            .cloned()
            .collect())
    }

    async fn get_by_id(&self, _id: &str) -> Result<Restaurant> {
        Ok(self.by_id.clone())
    }

    async fn insert(&self, _restaurant: Restaurant) -> Result<bool> {
        Ok(false)
    }

    async fn update(&self, _restaurant: Restaurant) -> Result<bool> {
        Ok(false)
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

fn context(repository: FixedRepository) -> AppContext {
    AppContext {
        repository: Arc::new(repository),
        probe: Arc::new(UpProbe),
        api_client: ApiClient::new("http://127.0.0.1:9").unwrap(),
        output_cache: OutputCache::new(Duration::from_secs(60)),
        health: HealthSettings::default(),
    }
}

fn named(name: &str, cuisine: &str) -> Restaurant {
    Restaurant {
        id: format!("id-{}", name),
        ..Restaurant::new(name, cuisine)
    }
}

#[actix_web::test]
async fn test_get_all_empty_returns_200_with_empty_list() {
    let ctx = context(FixedRepository::default());
    let app = test::init_service(App::new().configure(|cfg| ctx.configure(cfg))).await;

    let req = test::TestRequest::get().uri("/restaurant/v1").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    assert_eq!(resp.headers().get("api-deprecated-versions").unwrap(), "1.0");
    let body: Vec<Restaurant> = test::read_body_json(resp).await;
    assert!(body.is_empty());
}

#[actix_web::test]
async fn test_get_all_accepts_trailing_slash() {
    let ctx = context(FixedRepository {
        restaurants: vec![named("Thai Palace", "Thai")],
        ..Default::default()
    });
    let app = test::init_service(App::new().configure(|cfg| ctx.configure(cfg))).await;

    let req = test::TestRequest::get().uri("/restaurant/v1/").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: Vec<Restaurant> = test::read_body_json(resp).await;
    assert_eq!(body.len(), 1);
}

#[actix_web::test]
async fn test_find_uses_query_parameters() {
    let ctx = context(FixedRepository {
        restaurants: vec![named("Thai Palace", "Thai"), named("Burger Barn", "American")],
        ..Default::default()
    });
    let app = test::init_service(App::new().configure(|cfg| ctx.configure(cfg))).await;

    let req = test::TestRequest::get()
        .uri("/restaurant/v1/find?name=Palace&cuisine=Thai")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: Vec<Restaurant> = test::read_body_json(resp).await;
    assert_eq!(body.len(), 1);
    assert_eq!(body[0].name, "Thai Palace");
}

#[actix_web::test]
async fn test_find_without_parameters_returns_400() {
    let ctx = context(FixedRepository::default());
    let app = test::init_service(App::new().configure(|cfg| ctx.configure(cfg))).await;

    let req = test::TestRequest::get()
        .uri("/restaurant/v1/find?name=Palace")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_get_by_id_missing_returns_200_with_empty_id() {
    let ctx = context(FixedRepository::default());
    let app = test::init_service(App::new().configure(|cfg| ctx.configure(cfg))).await;

    let req = test::TestRequest::get()
        .uri("/restaurant/v1/123456")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: Restaurant = test::read_body_json(resp).await;
    assert!(body.id.is_empty());
}

#[actix_web::test]
async fn test_v1_has_no_write_routes() {
    let ctx = context(FixedRepository::default());
    let app = test::init_service(App::new().configure(|cfg| ctx.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/restaurant/v1")
        .set_json(Restaurant::new("test", "test"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_client_error());
}
