use crate::config::parse_or;
use crate::core::{AppError, Result};
use std::time::Duration;

/// Collection holding restaurant documents
pub const RESTAURANT_COLLECTION: &str = "restaurants";

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub database_name: String,
    pub connect_timeout_secs: u64,
}

impl DatabaseConfig {
    pub(crate) fn from_lookup<F>(lookup: &F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(DatabaseConfig {
            url: lookup("MONGO_CONNECTION_STRING").ok_or_else(|| {
                AppError::configuration("MONGO_CONNECTION_STRING not set")
            })?,
            database_name: lookup("MONGO_DATABASE")
                .unwrap_or_else(|| "restaurant_db".to_string()),
            connect_timeout_secs: parse_or(lookup, "MONGO_CONNECT_TIMEOUT_SECS", 10)?,
        })
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}
