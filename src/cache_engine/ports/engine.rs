//! Backend contract every cache engine satisfies.

use crate::cache_engine::domain::{CacheEngineDomainError, EngineConfig};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// Result type for cache engine operations.
pub type CacheEngineResult<T> = Result<T, CacheEngineError>;

/// Capability contract for a pluggable cache engine.
///
/// The registry only drives [`initialize`](Self::initialize),
/// [`effective_config`](Self::effective_config) and
/// [`collect_garbage`](Self::collect_garbage). The storage operations are
/// for callers holding an [`EngineHandle`](super::EngineHandle).
pub trait CacheEngine: Send {
    /// Implementation name used in diagnostics, e.g. `MemoryEngine`.
    fn kind(&self) -> &str;

    /// Applies `config` over the engine defaults.
    ///
    /// # Errors
    ///
    /// Returns an error when the engine cannot operate with `config`.
    fn initialize(&mut self, config: &EngineConfig) -> CacheEngineResult<()>;

    /// Returns the configuration in effect after initialisation, including
    /// `probability`.
    fn effective_config(&self) -> EngineConfig;

    /// Removes expired entries.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing storage fails.
    fn collect_garbage(&mut self) -> CacheEngineResult<()>;

    /// Stores `value` under `key` for the configured duration.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing storage fails.
    fn write(&mut self, key: &str, value: Value) -> CacheEngineResult<()>;

    /// Reads a live value, or `None` when absent or expired.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing storage fails.
    fn read(&mut self, key: &str) -> CacheEngineResult<Option<Value>>;

    /// Deletes `key`, returning whether an entry existed.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing storage fails.
    fn delete(&mut self, key: &str) -> CacheEngineResult<bool>;

    /// Deletes every entry, or only expired ones when `check_expiry` is set.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing storage fails.
    fn clear(&mut self, check_expiry: bool) -> CacheEngineResult<()>;
}

/// Errors returned by cache engine implementations.
#[derive(Debug, Clone, Error)]
pub enum CacheEngineError {
    /// Engine settings failed validation.
    #[error(transparent)]
    Settings(#[from] CacheEngineDomainError),

    /// A required engine-specific option is absent.
    #[error("missing required option '{0}'")]
    MissingOption(&'static str),

    /// The engine was used before a successful initialisation.
    #[error("cache engine {0} has not been initialised")]
    NotInitialised(String),

    /// The lock guarding a shared engine was poisoned.
    #[error("cache engine {0} lock poisoned")]
    Poisoned(String),

    /// Backing storage failure.
    #[error("cache storage error: {0}")]
    Storage(Arc<dyn std::error::Error + Send + Sync>),
}

impl CacheEngineError {
    /// Wraps a storage-layer error.
    pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Storage(Arc::new(err))
    }
}
