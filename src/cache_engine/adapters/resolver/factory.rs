//! Resolver backed by a map of registered engine factories.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use crate::cache_engine::{
    adapters::engines::{FileEngine, MemoryEngine, NullEngine},
    domain::{CacheEngineDomainError, EngineConfig, EngineName},
    ports::{
        CACHE_ENGINE_CATEGORY, CACHE_ENGINE_SUFFIX, EngineCandidate, EngineFactory,
        EngineResolver,
    },
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct FactoryKey {
    category: String,
    plugin: Option<String>,
    implementation: String,
}

impl FactoryKey {
    fn new(category: &str, name: &EngineName, suffix: &str) -> Self {
        let implementation = if name.name().ends_with(suffix) {
            name.name().to_owned()
        } else {
            format!("{}{suffix}", name.name())
        };
        Self {
            category: category.to_owned(),
            plugin: name.plugin().map(str::to_owned),
            implementation,
        }
    }
}

impl fmt::Display for FactoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.plugin {
            Some(plugin) => write!(f, "{plugin}/{}/{}", self.category, self.implementation),
            None => write!(f, "{}/{}", self.category, self.implementation),
        }
    }
}

/// Resolver that looks names up in a registered-factory map.
///
/// Keys combine the lookup category, the optional plugin and the
/// implementation name with the suffix applied, so `File` and `FileEngine`
/// resolve to the same factory.
#[derive(Clone, Default)]
pub struct FactoryResolver {
    factories: Arc<RwLock<HashMap<FactoryKey, EngineFactory>>>,
}

impl FactoryResolver {
    /// Creates a resolver with no registered factories.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a resolver with the `Memory`, `File` and `Null` engines
    /// registered.
    #[must_use]
    pub fn with_builtin_engines() -> Self {
        let resolver = Self::new();
        let builtins: [(&'static str, EngineFactory); 3] = [
            ("Memory", Arc::new(|_: &EngineConfig| -> Box<dyn EngineCandidate> {
                Box::new(MemoryEngine::new())
            })),
            ("File", Arc::new(|_: &EngineConfig| -> Box<dyn EngineCandidate> {
                Box::new(FileEngine::new())
            })),
            ("Null", Arc::new(|_: &EngineConfig| -> Box<dyn EngineCandidate> {
                Box::new(NullEngine::new())
            })),
        ];
        for (name, factory) in builtins {
            resolver.register_factory(
                CACHE_ENGINE_CATEGORY,
                &EngineName::from_static(name),
                CACHE_ENGINE_SUFFIX,
                factory,
            );
        }
        resolver
    }

    /// Registers a cache engine factory under `name` (`Name` or
    /// `Plugin.Name`), replacing any previous registration.
    ///
    /// # Errors
    ///
    /// Returns [`CacheEngineDomainError`] when `name` is invalid.
    pub fn register_engine<F>(&self, name: &str, factory: F) -> Result<(), CacheEngineDomainError>
    where
        F: Fn(&EngineConfig) -> Box<dyn EngineCandidate> + Send + Sync + 'static,
    {
        let engine_name = EngineName::new(name)?;
        self.register_factory(
            CACHE_ENGINE_CATEGORY,
            &engine_name,
            CACHE_ENGINE_SUFFIX,
            Arc::new(factory),
        );
        Ok(())
    }

    /// Registers `factory` for an arbitrary lookup category and suffix.
    pub fn register_factory(
        &self,
        category: &str,
        name: &EngineName,
        suffix: &str,
        factory: EngineFactory,
    ) {
        let key = FactoryKey::new(category, name, suffix);
        debug!(factory = %key, "registering engine factory");
        let mut factories = self
            .factories
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        factories.insert(key, factory);
    }
}

impl EngineResolver for FactoryResolver {
    fn resolve(&self, name: &EngineName, category: &str, suffix: &str) -> Option<EngineFactory> {
        let key = FactoryKey::new(category, name, suffix);
        let factories = self
            .factories
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let factory = factories.get(&key).cloned();
        debug!(factory = %key, found = factory.is_some(), "resolved engine name");
        factory
    }
}

impl fmt::Debug for FactoryResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let factories = self
            .factories
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let mut keys: Vec<String> = factories.keys().map(ToString::to_string).collect();
        keys.sort();
        f.debug_struct("FactoryResolver")
            .field("factories", &keys)
            .finish()
    }
}
