pub mod controllers;
pub mod models;

pub use controllers::configure;
pub use models::{HealthReport, HealthSettings, HealthStatus};
