//! Typed HTTP client for calling this API over the network

pub mod api_client;

pub use api_client::ApiClient;
