use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::bson::{oid::ObjectId, Document};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::core::Result;

/// Error code reported by a failed connection check
pub const CONNECTION_ERROR_CODE: u16 = 99;

/// A document type that can be persisted by a [`DocumentStore`]
pub trait StoreDocument: Serialize + DeserializeOwned + Send + Sync + Unpin {
    /// Record the identifier generated by the store on insert
    fn assign_id(&mut self, id: ObjectId);
}

/// Outcome of a replace operation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationResult {
    pub acknowledged: bool,
    pub modified_count: u64,
}

impl MutationResult {
    pub fn new(acknowledged: bool, modified_count: u64) -> Self {
        Self {
            acknowledged,
            modified_count,
        }
    }
}

/// Result of a store round trip, consumed by the health check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionStatus {
    pub connected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_start_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_end_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_duration_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<u16>,
}

impl ConnectionStatus {
    /// Successful round trip between `start` and `end`
    pub fn connected(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        let duration_ms = (end - start).num_milliseconds().unsigned_abs();
        Self {
            connected: true,
            test_start_time: Some(start),
            test_end_time: Some(end),
            test_duration_ms: Some(duration_ms),
            error_code: None,
        }
    }

    pub fn unreachable() -> Self {
        Self {
            connected: false,
            test_start_time: None,
            test_end_time: None,
            test_duration_ms: None,
            error_code: Some(CONNECTION_ERROR_CODE),
        }
    }
}

/// Generic document operations over a named collection.
///
/// Filters are raw BSON documents so callers can express any predicate the
/// backing store understands. Zero matches is never an error; an unreachable
/// store surfaces as `AppError::Database` from every operation.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// All documents matching `filter`
    async fn find_many<T: StoreDocument>(&self, collection: &str, filter: Document)
        -> Result<Vec<T>>;

    /// First document matching `filter`, if any
    async fn find_one<T: StoreDocument>(&self, collection: &str, filter: Document)
        -> Result<Option<T>>;

    /// Persist `document` and return it with its generated identifier
    async fn insert_one<T: StoreDocument>(&self, collection: &str, document: T) -> Result<T>;

    /// Replace the document matching `filter`
    async fn replace_one<T: StoreDocument>(
        &self,
        collection: &str,
        filter: Document,
        document: T,
    ) -> Result<MutationResult>;
}

/// Lightweight connectivity probe used by the health endpoint
#[async_trait]
pub trait ConnectionProbe: Send + Sync {
    /// Never fails; an unreachable store reports `connected: false`
    async fn connection_check(&self) -> ConnectionStatus;
}
