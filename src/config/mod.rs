use crate::core::{AppError, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

pub mod database;
pub mod server;

pub use database::DatabaseConfig;
pub use server::ServerConfig;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
    pub output_cache_ttl_secs: u64,
    pub health_degraded_after_secs: u64,
    pub self_base_url: String,
}

impl AppConfig {
    pub fn is_development(&self) -> bool {
        self.env.eq_ignore_ascii_case("development")
    }

    pub fn is_production(&self) -> bool {
        self.env.eq_ignore_ascii_case("production")
    }

    pub fn output_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.output_cache_ttl_secs)
    }

    pub fn health_degraded_after(&self) -> Duration {
        Duration::from_secs(self.health_degraded_after_secs)
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server = ServerConfig::from_lookup(&lookup)?;
        let self_base_url = lookup("SELF_BASE_URL")
            .unwrap_or_else(|| format!("http://localhost:{}", server.port));

        let config = Config {
            app: AppConfig {
                env: lookup("APP_ENV").unwrap_or_else(|| "development".to_string()),
                log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
                output_cache_ttl_secs: parse_or(&lookup, "OUTPUT_CACHE_TTL_SECS", 60)?,
                health_degraded_after_secs: parse_or(&lookup, "HEALTH_DEGRADED_AFTER_SECS", 4)?,
                self_base_url,
            },
            database: DatabaseConfig::from_lookup(&lookup)?,
            server,
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.app.output_cache_ttl_secs == 0 {
            return Err(AppError::configuration("Output cache TTL must be greater than 0"));
        }

        if self.database.database_name.trim().is_empty() {
            return Err(AppError::configuration("MONGO_DATABASE must not be empty"));
        }

        Ok(())
    }
}

/// Parse `key` from the lookup, falling back to `default` when unset
pub(crate) fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::configuration(format!("Invalid {}", key))),
        None => Ok(default),
    }
}
