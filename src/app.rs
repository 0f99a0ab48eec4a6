//! Route table and shared services for the HTTP server

use std::sync::Arc;

use actix_web::http::header::STRICT_TRANSPORT_SECURITY;
use actix_web::middleware::DefaultHeaders;
use actix_web::{web, HttpResponse};

use crate::config::Config;
use crate::core::{ConnectionProbe, Result};
use crate::http_client::ApiClient;
use crate::middleware::{json_error_handler, query_error_handler, OutputCache};
use crate::modules::health::{self, HealthSettings};
use crate::modules::restaurants::{self, RestaurantRepo, RestaurantRepository, StoreRestaurantData};
use crate::store::MongoStore;

const HSTS_VALUE: &str = "max-age=31536000; includeSubDomains; preload";

/// Everything the route handlers share across workers
#[derive(Clone)]
pub struct AppContext {
    pub repository: Arc<dyn RestaurantRepository>,
    pub probe: Arc<dyn ConnectionProbe>,
    pub api_client: ApiClient,
    pub output_cache: OutputCache,
    pub health: HealthSettings,
}

impl AppContext {
    /// Wire the layers over one shared store client
    pub fn from_store(store: Arc<MongoStore>, config: &Config) -> Result<Self> {
        let data = Arc::new(StoreRestaurantData::new(store.clone()));
        let repository: Arc<dyn RestaurantRepository> = Arc::new(RestaurantRepo::new(data));

        Ok(Self {
            repository,
            probe: store,
            api_client: ApiClient::new(config.app.self_base_url.clone())?,
            output_cache: OutputCache::new(config.app.output_cache_ttl()),
            health: HealthSettings {
                degraded_after: config.app.health_degraded_after(),
            },
        })
    }

    /// Register shared data and every route
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.repository.clone()))
            .app_data(web::Data::new(self.probe.clone()))
            .app_data(web::Data::new(self.api_client.clone()))
            .app_data(web::Data::new(self.health))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::QueryConfig::default().error_handler(query_error_handler))
            .route("/", web::get().to(index));

        health::configure(cfg);
        restaurants::configure(cfg, self.output_cache.clone());
    }
}

/// Security headers applied to every response
pub fn security_headers(enable_hsts: bool) -> DefaultHeaders {
    let headers = DefaultHeaders::new();
    if enable_hsts {
        headers.add((STRICT_TRANSPORT_SECURITY, HSTS_VALUE))
    } else {
        headers
    }
}

async fn index() -> HttpResponse {
    HttpResponse::Ok().body("Welcome to the Restaurant API")
}
