//! Service layer for loading and unloading cache engines.
//!
//! Provides [`CacheEngineRegistry`], which resolves engine names, validates
//! candidates against the [`CacheEngine`] contract, initialises them, runs
//! the clock-driven maintenance trigger and binds the result to an alias.

use crate::cache_engine::{
    domain::{CacheEngineDomainError, EngineAlias, EngineConfig, EngineName},
    ports::{
        CACHE_ENGINE_CATEGORY, CACHE_ENGINE_SUFFIX, CacheEngine, CacheEngineError,
        EngineCandidate, EngineDescriptor, EngineFactory, EngineHandle, EngineResolver,
        EngineStore,
    },
};
use mockable::Clock;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tracing::{debug, info, warn};

/// A candidate was rejected or could not be configured.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// The candidate does not implement the backend contract.
    #[error("{kind} must implement the required backend contract")]
    ContractViolation {
        /// Implementation name of the rejected candidate.
        kind: String,
    },

    /// The engine reported failure from `initialize`.
    #[error("{kind} is not properly configured")]
    NotConfigured {
        /// Implementation name of the engine.
        kind: String,
        /// Reason reported by the engine.
        #[source]
        source: CacheEngineError,
    },

    /// The effective `probability` option is unusable.
    #[error("{kind} reported an invalid probability")]
    InvalidProbability {
        /// Implementation name of the engine.
        kind: String,
        /// Validation failure.
        #[source]
        source: CacheEngineDomainError,
    },
}

/// No implementation is registered for a symbolic engine name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("cache engine {engine} is not available")]
pub struct BackendUnavailableError {
    /// The name that failed to resolve, including any plugin qualifier.
    pub engine: EngineName,
}

/// Service-level errors for cache engine registry operations.
#[derive(Debug, Error)]
pub enum CacheRegistryError {
    /// Contract or initialisation failure.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    /// The engine name did not resolve.
    #[error(transparent)]
    Unavailable(#[from] BackendUnavailableError),
    /// `collect_garbage` failed during the maintenance trigger.
    #[error(transparent)]
    Maintenance(CacheEngineError),
    /// Alias or name validation failed.
    #[error(transparent)]
    Domain(#[from] CacheEngineDomainError),
}

/// Result type for cache engine registry operations.
pub type CacheRegistryResult<T> = Result<T, CacheRegistryError>;

/// Where the engine for a load comes from.
enum EngineSource {
    Instance(Box<dyn EngineCandidate>),
    Factory(EngineFactory),
}

/// Returns `true` when the maintenance trigger fires at `timestamp`.
///
/// The trigger is a pure function of wall-clock seconds: it fires whenever
/// `timestamp` is a multiple of `probability`, so every load within a
/// matching second fires. `probability == 0` never fires.
#[must_use]
pub fn maintenance_due(timestamp: i64, probability: u64) -> bool {
    if probability == 0 {
        return false;
    }
    match i64::try_from(probability) {
        Ok(divisor) => timestamp.rem_euclid(divisor) == 0,
        Err(_) => timestamp == 0,
    }
}

/// Registry of loaded cache engines.
///
/// A single registry lock covers every load, lookup and unload, so two
/// callers loading the same alias never both construct and store.
/// Clones share the resolver, the store and the lock.
pub struct CacheEngineRegistry<R, S, C>
where
    R: EngineResolver,
    S: EngineStore,
    C: Clock + Send + Sync,
{
    resolver: Arc<R>,
    store: Arc<S>,
    clock: Arc<C>,
    lock: Arc<Mutex<()>>,
}

impl<R, S, C> Clone for CacheEngineRegistry<R, S, C>
where
    R: EngineResolver,
    S: EngineStore,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            resolver: Arc::clone(&self.resolver),
            store: Arc::clone(&self.store),
            clock: Arc::clone(&self.clock),
            lock: Arc::clone(&self.lock),
        }
    }
}

impl<R, S, C> CacheEngineRegistry<R, S, C>
where
    R: EngineResolver,
    S: EngineStore,
    C: Clock + Send + Sync,
{
    /// Creates a registry over the given collaborators.
    #[must_use]
    pub fn new(resolver: Arc<R>, store: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            resolver,
            store,
            clock,
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// Builds, validates and initialises an engine, then binds it to
    /// `alias`, replacing whatever was bound before.
    ///
    /// # Errors
    ///
    /// Returns [`CacheRegistryError::Unavailable`] when a name does not
    /// resolve, [`CacheRegistryError::Configuration`] when the candidate is
    /// not an engine or fails to initialise, and
    /// [`CacheRegistryError::Maintenance`] when the maintenance trigger fires
    /// and `collect_garbage` fails. Nothing is bound on error.
    pub fn load(
        &self,
        alias: &str,
        descriptor: EngineDescriptor,
        config: EngineConfig,
    ) -> CacheRegistryResult<EngineHandle> {
        let engine_alias = EngineAlias::new(alias)?;
        let _guard = self.lock_registry();
        self.load_locked(engine_alias, descriptor, config)
    }

    /// Returns the engine bound to `alias`, loading it first when unbound.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`load`](Self::load) when a load is needed.
    pub fn get_or_load(
        &self,
        alias: &str,
        descriptor: EngineDescriptor,
        config: EngineConfig,
    ) -> CacheRegistryResult<EngineHandle> {
        let engine_alias = EngineAlias::new(alias)?;
        let _guard = self.lock_registry();
        if let Some(existing) = self.store.get(&engine_alias) {
            return Ok(existing);
        }
        self.load_locked(engine_alias, descriptor, config)
    }

    /// Returns the engine bound to `alias`.
    #[must_use]
    pub fn get(&self, alias: &str) -> Option<EngineHandle> {
        let engine_alias = EngineAlias::new(alias).ok()?;
        let _guard = self.lock_registry();
        self.store.get(&engine_alias)
    }

    /// Returns `true` when an engine is bound to `alias`.
    #[must_use]
    pub fn has(&self, alias: &str) -> bool {
        self.get(alias).is_some()
    }

    /// Returns the bound aliases in ascending order.
    #[must_use]
    pub fn loaded(&self) -> Vec<String> {
        let _guard = self.lock_registry();
        self.store
            .aliases()
            .into_iter()
            .map(|alias| alias.as_str().to_owned())
            .collect()
    }

    /// Removes `alias` from the registry.
    ///
    /// Unbound and invalid aliases are ignored. The engine receives no
    /// teardown call; it is released when the last handle drops.
    pub fn unload(&self, alias: &str) {
        let Ok(engine_alias) = EngineAlias::new(alias) else {
            return;
        };
        let _guard = self.lock_registry();
        if self.store.remove(&engine_alias).is_some() {
            info!(alias = %engine_alias, "unloaded cache engine");
        }
    }

    /// Unbinds every alias.
    pub fn reset(&self) {
        let _guard = self.lock_registry();
        self.store.clear();
        info!("unloaded all cache engines");
    }

    /// Builds the error reported when `engine` does not resolve.
    #[must_use]
    pub fn missing_engine(engine: EngineName) -> BackendUnavailableError {
        BackendUnavailableError { engine }
    }

    fn lock_registry(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn load_locked(
        &self,
        alias: EngineAlias,
        descriptor: EngineDescriptor,
        config: EngineConfig,
    ) -> CacheRegistryResult<EngineHandle> {
        let source = self.resolve(descriptor).map_err(Self::missing_engine)?;
        let engine = self.create(source, &alias, config)?;
        let handle = EngineHandle::new(engine);
        if self.store.set(alias.clone(), handle.clone()).is_some() {
            debug!(alias = %alias, "replaced previously loaded cache engine");
        }
        info!(alias = %alias, kind = handle.kind(), "loaded cache engine");
        Ok(handle)
    }

    /// Maps a descriptor to its engine source; `Err` carries a name that
    /// did not resolve.
    fn resolve(&self, descriptor: EngineDescriptor) -> Result<EngineSource, EngineName> {
        match descriptor {
            EngineDescriptor::Instance(candidate) => Ok(EngineSource::Instance(candidate)),
            EngineDescriptor::Named(name) => {
                debug!(engine = %name, "resolving cache engine");
                match self
                    .resolver
                    .resolve(&name, CACHE_ENGINE_CATEGORY, CACHE_ENGINE_SUFFIX)
                {
                    Some(factory) => Ok(EngineSource::Factory(factory)),
                    None => Err(name),
                }
            }
        }
    }

    /// Constructs (or accepts), validates and initialises an engine.
    fn create(
        &self,
        source: EngineSource,
        alias: &EngineAlias,
        config: EngineConfig,
    ) -> CacheRegistryResult<Box<dyn CacheEngine>> {
        let engine_config = config.without_class_name();
        let candidate = match source {
            EngineSource::Instance(candidate) => candidate,
            EngineSource::Factory(factory) => factory(&engine_config),
        };

        let kind = candidate.candidate_kind().to_owned();
        let Some(mut engine) = candidate.into_engine() else {
            warn!(alias = %alias, kind = %kind, "rejected candidate without backend contract");
            return Err(ConfigurationError::ContractViolation { kind }.into());
        };

        engine
            .initialize(&engine_config)
            .map_err(|source| ConfigurationError::NotConfigured {
                kind: kind.clone(),
                source,
            })?;

        let probability = engine
            .effective_config()
            .probability()
            .map_err(|source| ConfigurationError::InvalidProbability {
                kind: kind.clone(),
                source,
            })?;
        let timestamp = self.clock.utc().timestamp();
        if maintenance_due(timestamp, probability) {
            debug!(alias = %alias, kind = %kind, timestamp, probability, "running cache engine maintenance");
            engine
                .collect_garbage()
                .map_err(CacheRegistryError::Maintenance)?;
        }

        Ok(engine)
    }
}
