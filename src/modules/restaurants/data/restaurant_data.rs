use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::{doc, oid::ObjectId, Document};

use crate::config::database::RESTAURANT_COLLECTION;
use crate::core::{DocumentStore, MutationResult, Result};
use crate::modules::restaurants::models::{Restaurant, RestaurantDocument};

/// Translates restaurant queries into store filters against the
/// restaurant collection. No validation, retries or normalization here.
#[async_trait]
pub trait RestaurantData: Send + Sync {
    /// Every stored restaurant
    async fn get_all(&self) -> Result<Vec<Restaurant>>;

    /// Restaurants whose name contains `name` and whose cuisine equals `cuisine`
    async fn find(&self, name: &str, cuisine: &str) -> Result<Vec<Restaurant>>;

    async fn get_by_id(&self, id: &str) -> Result<Option<Restaurant>>;

    /// Insert and return the restaurant carrying its store-assigned id
    async fn insert(&self, restaurant: Restaurant) -> Result<Restaurant>;

    /// Replace the stored restaurant with the same id
    async fn update(&self, restaurant: Restaurant) -> Result<MutationResult>;
}

/// [`RestaurantData`] over any [`DocumentStore`]
pub struct StoreRestaurantData<S> {
    store: Arc<S>,
}

impl<S: DocumentStore> StoreRestaurantData<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

fn match_all() -> Document {
    doc! {}
}

fn by_id(id: &str) -> Document {
    // Ids that are not ObjectIds cannot match a stored document.
    match ObjectId::parse_str(id.trim()) {
        Ok(object_id) => doc! { "_id": object_id },
        Err(_) => doc! { "_id": id },
    }
}

fn by_name_and_cuisine(name: &str, cuisine: &str) -> Document {
    doc! {
        "name": { "$regex": regex::escape(name) },
        "cuisineType": cuisine,
    }
}

#[async_trait]
impl<S: DocumentStore + 'static> RestaurantData for StoreRestaurantData<S> {
    async fn get_all(&self) -> Result<Vec<Restaurant>> {
        tracing::info!("Finding all restaurants");
        let documents: Vec<RestaurantDocument> = self
            .store
            .find_many(RESTAURANT_COLLECTION, match_all())
            .await?;

        Ok(documents.into_iter().map(Restaurant::from).collect())
    }

    async fn find(&self, name: &str, cuisine: &str) -> Result<Vec<Restaurant>> {
        tracing::info!("Finding restaurants by name and cuisine type");
        let documents: Vec<RestaurantDocument> = self
            .store
            .find_many(RESTAURANT_COLLECTION, by_name_and_cuisine(name, cuisine))
            .await?;

        Ok(documents.into_iter().map(Restaurant::from).collect())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Restaurant>> {
        tracing::info!(id, "Finding restaurant by id");
        let document: Option<RestaurantDocument> =
            self.store.find_one(RESTAURANT_COLLECTION, by_id(id)).await?;

        Ok(document.map(Restaurant::from))
    }

    async fn insert(&self, restaurant: Restaurant) -> Result<Restaurant> {
        tracing::info!("Adding new restaurant");
        let stored = self
            .store
            .insert_one(RESTAURANT_COLLECTION, RestaurantDocument::from(restaurant))
            .await?;

        Ok(Restaurant::from(stored))
    }

    async fn update(&self, restaurant: Restaurant) -> Result<MutationResult> {
        tracing::info!(id = %restaurant.id, "Replacing restaurant document");
        let filter = by_id(&restaurant.id);

        self.store
            .replace_one(
                RESTAURANT_COLLECTION,
                filter,
                RestaurantDocument::from(restaurant),
            )
            .await
    }
}
