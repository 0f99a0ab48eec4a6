pub mod health_report;

pub use health_report::{evaluate, HealthEntry, HealthReport, HealthSettings, HealthStatus};
