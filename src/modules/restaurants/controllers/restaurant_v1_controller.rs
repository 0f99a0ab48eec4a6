//! Restaurant API v1 (deprecated)
//!
//! Returns raw bodies with an implicit 200: an empty list when nothing
//! matches and an entity with an empty id when a lookup misses.

use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::core::error::AppError;
use crate::modules::restaurants::controllers::version_headers;
use crate::modules::restaurants::repositories::RestaurantRepository;

pub const SCOPE: &str = "/restaurant/v1";

/// Both parameters are required
#[derive(Debug, Deserialize)]
pub struct FindQuery {
    pub name: String,
    pub cuisine: String,
}

/// GET /restaurant/v1
pub async fn get_all(
    repository: web::Data<Arc<dyn RestaurantRepository>>,
) -> Result<HttpResponse, AppError> {
    let restaurants = repository.get_all().await?;
    Ok(HttpResponse::Ok().json(restaurants))
}

/// GET /restaurant/v1/find?name=..&cuisine=..
pub async fn find(
    repository: web::Data<Arc<dyn RestaurantRepository>>,
    query: web::Query<FindQuery>,
) -> Result<HttpResponse, AppError> {
    let restaurants = repository.find(&query.name, &query.cuisine).await?;
    Ok(HttpResponse::Ok().json(restaurants))
}

/// GET /restaurant/v1/{id}
pub async fn get_by_id(
    repository: web::Data<Arc<dyn RestaurantRepository>>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let restaurant = repository.get_by_id(&id).await?;
    Ok(HttpResponse::Ok().json(restaurant))
}

/// Configure v1 routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope(SCOPE)
            .wrap(version_headers())
            .service(web::resource(["", "/"]).route(web::get().to(get_all)))
            .route("/find", web::get().to(find))
            .route("/{id}", web::get().to(get_by_id)),
    );
}
