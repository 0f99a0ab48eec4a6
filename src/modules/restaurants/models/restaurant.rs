use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::core::StoreDocument;

/// Restaurant record as exchanged over HTTP.
///
/// An empty `id` means the record has not been persisted, or was not found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    pub cuisine_type: String,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub address: Address,
}

/// Embedded postal address
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Address {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl Restaurant {
    pub fn new(name: impl Into<String>, cuisine_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cuisine_type: cuisine_type.into(),
            ..Default::default()
        }
    }

    /// True once the store has assigned an identifier
    pub fn is_persisted(&self) -> bool {
        !self.id.trim().is_empty()
    }
}

/// Name and cuisine pair used by the search endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchCriteria {
    pub name: String,
    pub cuisine: String,
}

/// Stored form of a restaurant; the identifier lives in `_id` as an ObjectId
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantDocument {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub cuisine_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Address,
}

impl StoreDocument for RestaurantDocument {
    fn assign_id(&mut self, id: ObjectId) {
        self.id = Some(id);
    }
}

impl From<Restaurant> for RestaurantDocument {
    fn from(restaurant: Restaurant) -> Self {
        Self {
            id: ObjectId::parse_str(restaurant.id.trim()).ok(),
            name: restaurant.name,
            cuisine_type: restaurant.cuisine_type,
            website: restaurant.website,
            phone: restaurant.phone,
            address: restaurant.address,
        }
    }
}

impl From<RestaurantDocument> for Restaurant {
    fn from(document: RestaurantDocument) -> Self {
        Self {
            id: document.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: document.name,
            cuisine_type: document.cuisine_type,
            website: document.website,
            phone: document.phone,
            address: document.address,
        }
    }
}
