use std::sync::Arc;

use actix_web::{App, HttpServer};
use restaurant_api::app::{security_headers, AppContext};
use restaurant_api::config::Config;
use restaurant_api::middleware::{ErrorHandler, RequestId};
use restaurant_api::store::MongoStore;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("restaurant_api={},actix_web=info", config.app.log_level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if config.app.is_production() {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env()?;
    config.validate()?;

    init_tracing(&config);

    tracing::info!("Starting Restaurant API");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    let store = Arc::new(MongoStore::connect(&config.database).await?);
    let context = AppContext::from_store(store, &config)?;
    let enable_hsts = !config.app.is_development();

    let bind_address = config.server.bind_address();
    let server = HttpServer::new(move || {
        let context = context.clone();
        App::new()
            .wrap(security_headers(enable_hsts))
            .wrap(ErrorHandler)
            .wrap(RequestId)
            .wrap(TracingLogger::default())
            .configure(move |cfg| context.configure(cfg))
    })
    .workers(config.server.workers)
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await?;
    Ok(())
}
