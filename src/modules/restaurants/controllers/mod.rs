pub mod restaurant_v1_controller;
pub mod restaurant_v2_controller;
pub mod smoke_controller;

use actix_web::middleware::DefaultHeaders;
use actix_web::web;

use crate::middleware::OutputCache;

pub const SUPPORTED_VERSIONS: &str = "2.0";
pub const DEPRECATED_VERSIONS: &str = "1.0";

/// API version reporting headers shared by every versioned scope
pub fn version_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("api-supported-versions", SUPPORTED_VERSIONS))
        .add(("api-deprecated-versions", DEPRECATED_VERSIONS))
}

/// Configure all restaurant routes
pub fn configure(cfg: &mut web::ServiceConfig, cache: OutputCache) {
    restaurant_v1_controller::configure(cfg);
    restaurant_v2_controller::configure(cfg, cache);
    smoke_controller::configure(cfg);
}
