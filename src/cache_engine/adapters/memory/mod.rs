//! In-memory adapters for cache engine registration.

mod engine_store;

pub use engine_store::InMemoryEngineStore;
