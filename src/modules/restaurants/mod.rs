pub mod controllers;
pub mod data;
pub mod models;
pub mod repositories;

pub use controllers::configure;
pub use data::{RestaurantData, StoreRestaurantData};
pub use models::{Address, Restaurant, SearchCriteria};
pub use repositories::{RestaurantRepo, RestaurantRepository};
