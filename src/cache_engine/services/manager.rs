//! Configuration-driven front end that builds engines on first use.

use super::registry::{CacheEngineRegistry, CacheRegistryError};
use crate::cache_engine::{
    domain::{CacheEngineDomainError, EngineAlias, EngineConfig},
    ports::{EngineDescriptor, EngineHandle, EngineResolver, EngineStore},
};
use mockable::Clock;
use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};
use thiserror::Error;
use tracing::debug;

/// Service-level errors for cache manager operations.
#[derive(Debug, Error)]
pub enum CacheManagerError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] CacheEngineDomainError),
    /// The registry failed to build the engine.
    #[error(transparent)]
    Registry(#[from] CacheRegistryError),
    /// No configuration exists for the alias.
    #[error("no cache configuration named {0}")]
    NotConfigured(String),
    /// The alias is already configured.
    #[error("cache configuration {0} already exists; drop it before reconfiguring")]
    AlreadyConfigured(String),
    /// The configuration does not name an engine.
    #[error("cache configuration {0} is missing a className")]
    MissingClassName(String),
    /// A configuration document could not be parsed.
    #[error("invalid cache configuration document: {0}")]
    Parse(String),
}

/// Result type for cache manager operations.
pub type CacheManagerResult<T> = Result<T, CacheManagerError>;

/// Holds named engine configurations and builds each engine lazily.
///
/// Configurations are plain [`EngineConfig`] maps whose `className` names
/// the engine. The engine is constructed through the registry the first
/// time [`engine`](Self::engine) is called for its alias.
pub struct CacheManager<R, S, C>
where
    R: EngineResolver,
    S: EngineStore,
    C: Clock + Send + Sync,
{
    registry: CacheEngineRegistry<R, S, C>,
    configs: RwLock<BTreeMap<EngineAlias, EngineConfig>>,
}

impl<R, S, C> CacheManager<R, S, C>
where
    R: EngineResolver,
    S: EngineStore,
    C: Clock + Send + Sync,
{
    /// Creates a manager with no configurations.
    #[must_use]
    pub fn new(registry: CacheEngineRegistry<R, S, C>) -> Self {
        Self {
            registry,
            configs: RwLock::new(BTreeMap::new()),
        }
    }

    /// Creates a manager from a JSON object keyed by alias.
    ///
    /// ```json
    /// { "default": { "className": "Memory", "probability": 1 } }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`CacheManagerError::Parse`] for malformed documents and the
    /// errors of [`configure`](Self::configure) for each entry.
    pub fn from_json(
        registry: CacheEngineRegistry<R, S, C>,
        document: &str,
    ) -> CacheManagerResult<Self> {
        let entries: BTreeMap<String, EngineConfig> = serde_json::from_str(document)
            .map_err(|err| CacheManagerError::Parse(err.to_string()))?;
        let manager = Self::new(registry);
        for (alias, config) in entries {
            manager.configure(&alias, config)?;
        }
        Ok(manager)
    }

    /// Stores the configuration for `alias` without building the engine.
    ///
    /// # Errors
    ///
    /// Returns [`CacheManagerError::MissingClassName`] when `config` has no
    /// string `className`, or [`CacheManagerError::AlreadyConfigured`] when
    /// `alias` is taken.
    pub fn configure(&self, alias: &str, config: EngineConfig) -> CacheManagerResult<()> {
        let engine_alias = EngineAlias::new(alias)?;
        if config.class_name().is_none() {
            return Err(CacheManagerError::MissingClassName(engine_alias.to_string()));
        }

        let mut configs = self.configs.write().unwrap_or_else(PoisonError::into_inner);
        if configs.contains_key(&engine_alias) {
            return Err(CacheManagerError::AlreadyConfigured(engine_alias.to_string()));
        }
        debug!(alias = %engine_alias, "stored cache configuration");
        configs.insert(engine_alias, config);
        Ok(())
    }

    /// Returns the engine for `alias`, building it on first use.
    ///
    /// The configuration table stays read-locked while the engine is built,
    /// so a concurrent [`drop_config`](Self::drop_config) either runs first
    /// or unloads the engine built here.
    ///
    /// # Errors
    ///
    /// Returns [`CacheManagerError::NotConfigured`] for unknown aliases and
    /// [`CacheManagerError::Registry`] when the engine cannot be built.
    pub fn engine(&self, alias: &str) -> CacheManagerResult<EngineHandle> {
        let engine_alias = EngineAlias::new(alias)?;
        let configs = self.configs.read().unwrap_or_else(PoisonError::into_inner);
        let config = configs
            .get(&engine_alias)
            .cloned()
            .ok_or_else(|| CacheManagerError::NotConfigured(engine_alias.to_string()))?;

        let class_name = config
            .class_name()
            .ok_or_else(|| CacheManagerError::MissingClassName(engine_alias.to_string()))?;
        let descriptor = EngineDescriptor::named(class_name)?;
        Ok(self
            .registry
            .get_or_load(engine_alias.as_str(), descriptor, config)?)
    }

    /// Forgets the configuration for `alias` and unloads its engine.
    ///
    /// Returns whether a configuration existed.
    pub fn drop_config(&self, alias: &str) -> bool {
        let Ok(engine_alias) = EngineAlias::new(alias) else {
            return false;
        };
        let removed = self
            .configs
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&engine_alias)
            .is_some();
        self.registry.unload(engine_alias.as_str());
        removed
    }

    /// Returns the configured aliases in ascending order.
    #[must_use]
    pub fn configured(&self) -> Vec<String> {
        self.configs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .map(|alias| alias.as_str().to_owned())
            .collect()
    }

    /// Returns the underlying registry.
    #[must_use]
    pub const fn registry(&self) -> &CacheEngineRegistry<R, S, C> {
        &self.registry
    }
}
