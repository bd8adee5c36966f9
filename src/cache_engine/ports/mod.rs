//! Port contracts for cache engine registration.
//!
//! Ports define the backend contract engines satisfy and the
//! infrastructure-agnostic collaborators the registry service drives.

pub mod candidate;
pub mod engine;
pub mod resolver;
pub mod store;

pub use candidate::{EngineCandidate, EngineDescriptor};
pub use engine::{CacheEngine, CacheEngineError, CacheEngineResult};
pub use resolver::{CACHE_ENGINE_CATEGORY, CACHE_ENGINE_SUFFIX, EngineFactory, EngineResolver};
pub use store::{EngineHandle, EngineStore};
