//! Restaurant API v2
//!
//! Reads answer 404 when the list is empty or the id is missing. Writes
//! always answer 200 with the boolean outcome as the body.

use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::middleware::OutputCache;
use crate::modules::restaurants::controllers::version_headers;
use crate::modules::restaurants::models::{Restaurant, SearchCriteria};
use crate::modules::restaurants::repositories::RestaurantRepository;

pub const SCOPE: &str = "/restaurant/v2";

/// GET /restaurant/v2 (output cached)
pub async fn get_all(
    repository: web::Data<Arc<dyn RestaurantRepository>>,
) -> Result<HttpResponse, AppError> {
    tracing::info!("Get all restaurants request received");
    let restaurants = repository.get_all().await?;

    tracing::info!(count = restaurants.len(), "Get all restaurants request complete");
    if restaurants.is_empty() {
        return Ok(HttpResponse::NotFound().finish());
    }

    Ok(HttpResponse::Ok().json(restaurants))
}

/// POST /restaurant/v2/find
pub async fn find(
    repository: web::Data<Arc<dyn RestaurantRepository>>,
    criteria: web::Json<SearchCriteria>,
) -> Result<HttpResponse, AppError> {
    tracing::info!(
        name = %criteria.name,
        cuisine = %criteria.cuisine,
        "Find restaurants request received"
    );
    let restaurants = repository.find(&criteria.name, &criteria.cuisine).await?;

    tracing::info!(count = restaurants.len(), "Find restaurants request complete");
    if restaurants.is_empty() {
        return Ok(HttpResponse::NotFound().finish());
    }

    Ok(HttpResponse::Ok().json(restaurants))
}

/// GET /restaurant/v2/{id}
pub async fn get_by_id(
    repository: web::Data<Arc<dyn RestaurantRepository>>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    tracing::info!(id = %id, "Get restaurant request received");
    let restaurant = repository.get_by_id(&id).await?;

    tracing::info!(found = restaurant.is_persisted(), "Get restaurant request complete");
    if !restaurant.is_persisted() {
        return Ok(HttpResponse::NotFound().finish());
    }

    Ok(HttpResponse::Ok().json(restaurant))
}

/// POST /restaurant/v2
pub async fn add_restaurant(
    repository: web::Data<Arc<dyn RestaurantRepository>>,
    restaurant: web::Json<Restaurant>,
) -> Result<HttpResponse, AppError> {
    tracing::info!(name = %restaurant.name, "Add restaurant request received");
    let added = repository.insert(restaurant.into_inner()).await?;

    tracing::info!(added, "Add restaurant request complete");
    Ok(HttpResponse::Ok().json(added))
}

/// PUT /restaurant/v2
pub async fn update_restaurant(
    repository: web::Data<Arc<dyn RestaurantRepository>>,
    restaurant: web::Json<Restaurant>,
) -> Result<HttpResponse, AppError> {
    tracing::info!(id = %restaurant.id, "Update restaurant request received");
    let updated = repository.update(restaurant.into_inner()).await?;

    tracing::info!(updated, "Update restaurant request complete");
    Ok(HttpResponse::Ok().json(updated))
}

/// Configure v2 routes; only GET responses on the collection are cached.
/// The collection answers with and without a trailing slash.
pub fn configure(cfg: &mut web::ServiceConfig, cache: OutputCache) {
    cfg.service(
        web::scope(SCOPE)
            .wrap(version_headers())
            .service(
                web::resource(["", "/"])
                    .wrap(cache)
                    .route(web::get().to(get_all))
                    .route(web::post().to(add_restaurant))
                    .route(web::put().to(update_restaurant)),
            )
            .route("/find", web::post().to(find))
            .route("/{id}", web::get().to(get_by_id)),
    );
}
