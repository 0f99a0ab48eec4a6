use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::Document;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};

use crate::config::DatabaseConfig;
use crate::core::{
    ConnectionProbe, ConnectionStatus, DocumentStore, MutationResult, Result, StoreDocument,
};

const APP_NAME: &str = "restaurant_api";

/// Long-lived MongoDB client shared by every request.
///
/// The driver pools connections internally, so one instance is built at
/// start-up and handed to the data access layer behind an `Arc`.
#[derive(Clone, Debug)]
pub struct MongoStore {
    client: Client,
    database: Database,
}

impl MongoStore {
    /// Build the client from configuration.
    ///
    /// The driver connects lazily, so this only fails on an invalid
    /// connection string.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        tracing::info!("Configuring MongoDB client");
        let mut options = ClientOptions::parse(&config.url).await?;
        options.app_name = Some(APP_NAME.to_string());
        options.connect_timeout = Some(config.connect_timeout());
        options.server_selection_timeout = Some(config.connect_timeout());

        let client = Client::with_options(options)?;

        tracing::info!(database = %config.database_name, "Configuring MongoDB database");
        let database = client.database(&config.database_name);

        tracing::info!("MongoDB client ready");
        Ok(Self { client, database })
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    fn collection<T: StoreDocument>(&self, name: &str) -> Collection<T> {
        self.database.collection::<T>(name)
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn find_many<T: StoreDocument>(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Vec<T>> {
        tracing::debug!(collection, "Finding documents by filter");
        let cursor = self.collection::<T>(collection).find(filter).await?;
        let documents: Vec<T> = cursor.try_collect().await?;

        Ok(documents)
    }

    async fn find_one<T: StoreDocument>(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Option<T>> {
        tracing::debug!(collection, "Finding one document by filter");
        let document = self.collection::<T>(collection).find_one(filter).await?;

        Ok(document)
    }

    async fn insert_one<T: StoreDocument>(&self, collection: &str, mut document: T) -> Result<T> {
        tracing::debug!(collection, "Inserting new document");
        let result = self.collection::<T>(collection).insert_one(&document).await?;

        if let Some(id) = result.inserted_id.as_object_id() {
            document.assign_id(id);
        }

        Ok(document)
    }

    async fn replace_one<T: StoreDocument>(
        &self,
        collection: &str,
        filter: Document,
        document: T,
    ) -> Result<MutationResult> {
        tracing::debug!(collection, "Starting replace operation");
        let result = self
            .collection::<T>(collection)
            .replace_one(filter, &document)
            .await?;

        // The driver only reports results for acknowledged writes.
        Ok(MutationResult::new(true, result.modified_count))
    }
}

#[async_trait]
impl ConnectionProbe for MongoStore {
    async fn connection_check(&self) -> ConnectionStatus {
        let start = chrono::Utc::now();

        match self.client.list_database_names().await {
            Ok(_) => ConnectionStatus::connected(start, chrono::Utc::now()),
            Err(err) => {
                tracing::error!(error = %err, "Unable to establish database connection");
                ConnectionStatus::unreachable()
            }
        }
    }
}
