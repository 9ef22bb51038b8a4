//! In-memory storage adapter.

mod store;
mod table;

pub use store::InMemoryStore;
