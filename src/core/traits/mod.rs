pub mod store;

pub use store::{ConnectionProbe, ConnectionStatus, DocumentStore, MutationResult, StoreDocument};
