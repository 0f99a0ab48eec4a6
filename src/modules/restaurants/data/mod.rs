pub mod restaurant_data;

pub use restaurant_data::{RestaurantData, StoreRestaurantData};
