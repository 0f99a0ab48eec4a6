use std::sync::Arc;

use async_trait::async_trait;

use crate::core::Result;
use crate::modules::restaurants::data::RestaurantData;
use crate::modules::restaurants::models::Restaurant;

/// Caller-facing restaurant operations.
///
/// Absence never escapes this layer: empty lookups become empty lists, a
/// missing record becomes `Restaurant::default()` (empty id) and writes
/// report a plain success flag. Store failures still propagate as errors.
#[async_trait]
pub trait RestaurantRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Restaurant>>;

    async fn find(&self, name: &str, cuisine: &str) -> Result<Vec<Restaurant>>;

    /// Found restaurant, or a default one whose id is empty
    async fn get_by_id(&self, id: &str) -> Result<Restaurant>;

    /// True when the store assigned an id to the new restaurant
    async fn insert(&self, restaurant: Restaurant) -> Result<bool>;

    /// True only for an acknowledged replace that modified a document
    async fn update(&self, restaurant: Restaurant) -> Result<bool>;
}

#[derive(Clone)]
pub struct RestaurantRepo {
    data: Arc<dyn RestaurantData>,
}

impl RestaurantRepo {
    pub fn new(data: Arc<dyn RestaurantData>) -> Self {
        Self { data }
    }
}

#[async_trait]
impl RestaurantRepository for RestaurantRepo {
    async fn get_all(&self) -> Result<Vec<Restaurant>> {
        tracing::info!("Initiating get all restaurants");
        let restaurants = self.data.get_all().await?;

        tracing::info!(count = restaurants.len(), "Restaurants retrieved");
        Ok(restaurants)
    }

    async fn find(&self, name: &str, cuisine: &str) -> Result<Vec<Restaurant>> {
        tracing::info!("Initiating find restaurants");
        let restaurants = self.data.find(name, cuisine).await?;

        tracing::info!(count = restaurants.len(), "Restaurants retrieved");
        Ok(restaurants)
    }

    async fn get_by_id(&self, id: &str) -> Result<Restaurant> {
        tracing::info!("Initiating get restaurant by id");
        let restaurant = self.data.get_by_id(id).await?;

        Ok(restaurant.unwrap_or_default())
    }

    async fn insert(&self, restaurant: Restaurant) -> Result<bool> {
        tracing::info!("Adding new restaurant");
        let stored = self.data.insert(restaurant).await?;

        tracing::info!("Checking insert operation result");
        Ok(stored.is_persisted())
    }

    async fn update(&self, restaurant: Restaurant) -> Result<bool> {
        tracing::info!("Updating restaurant");
        let result = self.data.update(restaurant).await?;

        tracing::info!("Checking update operation result");
        Ok(result.acknowledged && result.modified_count > 0)
    }
}
