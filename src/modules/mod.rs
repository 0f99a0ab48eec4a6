pub mod health;
pub mod restaurants;
