use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::http_client::ApiClient;
use crate::modules::restaurants::controllers::restaurant_v2_controller;
use crate::modules::restaurants::models::{Address, Restaurant};

fn sample_restaurant() -> Restaurant {
    Restaurant {
        website: Some("https://www.google.com/".to_string()),
        phone: Some("1112223333".to_string()),
        address: Address {
            street: Some("123 Test Street".to_string()),
            city: Some("Somewhere".to_string()),
            state: Some("KY".to_string()),
            zip_code: Some("12345".to_string()),
            country: Some("United States".to_string()),
        },
        ..Restaurant::new("Test", "Test")
    }
}

/// GET /test
///
/// Round trip through the public v2 API over HTTP: adds a sample restaurant
/// and returns the resulting list.
pub async fn smoke_test(client: web::Data<ApiClient>) -> Result<HttpResponse, AppError> {
    let added: Option<bool> = client
        .post(restaurant_v2_controller::SCOPE, &sample_restaurant())
        .await?;
    tracing::info!(added = ?added, "Smoke test insert finished");

    let restaurants: Vec<Restaurant> = client
        .get(restaurant_v2_controller::SCOPE)
        .await?
        .unwrap_or_default();

    Ok(HttpResponse::Ok().json(restaurants))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/test", web::get().to(smoke_test));
}
