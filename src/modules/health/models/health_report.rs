use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

use crate::core::ConnectionStatus;

/// Name of the store entry in the health document
pub const DATABASE_ENTRY: &str = "Database";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Result of a single named check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthEntry {
    pub status: HealthStatus,
    pub description: String,
    pub data: ConnectionStatus,
}

/// Health document returned by `GET /health`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub status: HealthStatus,
    pub total_duration: u64,
    pub entries: BTreeMap<String, HealthEntry>,
}

/// Latency threshold for the database check
#[derive(Debug, Clone, Copy)]
pub struct HealthSettings {
    pub degraded_after: Duration,
}

impl Default for HealthSettings {
    fn default() -> Self {
        Self {
            degraded_after: Duration::from_secs(4),
        }
    }
}

/// Classify a connection check.
///
/// Latency is compared in whole seconds: a 4.9 s round trip against a 4 s
/// threshold is still healthy.
pub fn evaluate(status: &ConnectionStatus, degraded_after: Duration) -> HealthEntry {
    let (health, description) = if !status.connected {
        (HealthStatus::Unhealthy, "Unable to connect to the database")
    } else if status
        .test_duration_ms
        .is_some_and(|ms| ms / 1000 > degraded_after.as_secs())
    {
        (HealthStatus::Degraded, "Database connection is slow")
    } else {
        (HealthStatus::Healthy, "Database connection is healthy")
    };

    HealthEntry {
        status: health,
        description: description.to_string(),
        data: status.clone(),
    }
}

impl HealthReport {
    /// Single-entry report; the overall status is the entry's status
    pub fn from_database(entry: HealthEntry, total_duration: u64) -> Self {
        let status = entry.status;
        let mut entries = BTreeMap::new();
        entries.insert(DATABASE_ENTRY.to_string(), entry);

        Self {
            status,
            total_duration,
            entries,
        }
    }
}
