//! Resolver port mapping symbolic engine names to factories.

use super::EngineCandidate;
use crate::cache_engine::domain::{EngineConfig, EngineName};
use std::sync::Arc;

/// Lookup category for cache engine implementations.
pub const CACHE_ENGINE_CATEGORY: &str = "Cache/Engine";

/// Conventional implementation-name suffix for cache engines.
pub const CACHE_ENGINE_SUFFIX: &str = "Engine";

/// Constructor for an engine implementation.
///
/// Receives the caller's configuration with `className` already removed.
pub type EngineFactory = Arc<dyn Fn(&EngineConfig) -> Box<dyn EngineCandidate> + Send + Sync>;

/// Name resolution contract.
pub trait EngineResolver: Send + Sync {
    /// Looks up the factory for `name`.
    ///
    /// `category` and `suffix` are lookup conventions chosen by the caller
    /// (for cache engines: `Cache/Engine` and `Engine`). Returns `None` when
    /// nothing matches.
    fn resolve(&self, name: &EngineName, category: &str, suffix: &str) -> Option<EngineFactory>;
}
