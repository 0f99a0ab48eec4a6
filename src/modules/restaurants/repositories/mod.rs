pub mod restaurant_repository;

pub use restaurant_repository::{RestaurantRepo, RestaurantRepository};
