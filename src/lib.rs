//! Restaurant API Library
//!
//! Versioned CRUD service for restaurant records stored in MongoDB.

pub mod app;
pub mod config;
pub mod core;
pub mod http_client;
pub mod middleware;
pub mod modules;
pub mod store;

// Re-export commonly used types
pub use modules::health;
pub use modules::restaurants;
