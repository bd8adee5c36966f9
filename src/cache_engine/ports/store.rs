//! Store port for loaded engine instances.

use super::{CacheEngine, CacheEngineError, CacheEngineResult};
use crate::cache_engine::domain::EngineAlias;
use std::fmt;
use std::sync::{Arc, Mutex};

/// Shared handle to a loaded engine.
///
/// Clones refer to the same instance. Access is serialised through
/// [`with_engine`](Self::with_engine).
#[derive(Clone)]
pub struct EngineHandle {
    kind: Arc<str>,
    engine: Arc<Mutex<Box<dyn CacheEngine>>>,
}

impl EngineHandle {
    /// Wraps an initialised engine.
    #[must_use]
    pub fn new(engine: Box<dyn CacheEngine>) -> Self {
        Self {
            kind: Arc::from(engine.kind()),
            engine: Arc::new(Mutex::new(engine)),
        }
    }

    /// Returns the engine implementation name.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Runs `operation` with exclusive access to the engine.
    ///
    /// # Errors
    ///
    /// Returns [`CacheEngineError::Poisoned`] when a previous holder panicked.
    pub fn with_engine<T>(
        &self,
        operation: impl FnOnce(&mut dyn CacheEngine) -> T,
    ) -> CacheEngineResult<T> {
        let mut engine = self
            .engine
            .lock()
            .map_err(|_| CacheEngineError::Poisoned(self.kind.to_string()))?;
        Ok(operation(&mut **engine))
    }

    /// Returns `true` when both handles refer to the same instance.
    #[must_use]
    pub fn same_instance(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.engine, &other.engine)
    }
}

impl fmt::Debug for EngineHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineHandle")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Loaded-instance store keyed by alias.
///
/// Holds at most one engine per alias. Operations are infallible so that
/// unloading can never fail.
pub trait EngineStore: Send + Sync {
    /// Binds `engine` to `alias`, returning the engine it replaced.
    fn set(&self, alias: EngineAlias, engine: EngineHandle) -> Option<EngineHandle>;

    /// Returns the engine bound to `alias`.
    fn get(&self, alias: &EngineAlias) -> Option<EngineHandle>;

    /// Unbinds `alias`, returning the engine that was bound.
    fn remove(&self, alias: &EngineAlias) -> Option<EngineHandle>;

    /// Returns every bound alias in ascending order.
    fn aliases(&self) -> Vec<EngineAlias>;

    /// Unbinds every alias.
    fn clear(&self);
}
