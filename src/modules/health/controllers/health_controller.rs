use std::sync::Arc;
use std::time::Instant;

use actix_web::{web, HttpResponse, Responder};

use crate::core::ConnectionProbe;
use crate::modules::health::models::{evaluate, HealthReport, HealthSettings, HealthStatus};

/// GET /health - Store connectivity probe
///
/// Healthy and degraded answer 200, unhealthy answers 503.
pub async fn health_check(
    probe: web::Data<Arc<dyn ConnectionProbe>>,
    settings: web::Data<HealthSettings>,
) -> impl Responder {
    let started = Instant::now();
    let status = probe.connection_check().await;
    let entry = evaluate(&status, settings.degraded_after);

    let total_duration = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    let report = HealthReport::from_database(entry, total_duration);

    match report.status {
        HealthStatus::Unhealthy => {
            tracing::warn!("Health check failed: database unreachable");
            HttpResponse::ServiceUnavailable().json(report)
        }
        _ => HttpResponse::Ok().json(report),
    }
}

/// Configure health check routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}
