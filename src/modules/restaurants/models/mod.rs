pub mod restaurant;

pub use restaurant::{Address, Restaurant, RestaurantDocument, SearchCriteria};
