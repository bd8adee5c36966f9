//! Application services for cache engine loading.

mod manager;
mod registry;

pub use manager::{CacheManager, CacheManagerError, CacheManagerResult};
pub use registry::{
    BackendUnavailableError, CacheEngineRegistry, CacheRegistryError, CacheRegistryResult,
    ConfigurationError, maintenance_due,
};
