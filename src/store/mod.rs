//! Document store client backed by MongoDB

pub mod mongo;

pub use mongo::MongoStore;
