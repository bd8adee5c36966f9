//! Shared fixtures for cache engine integration tests.

use cache_registry::cache_engine::{
    adapters::{
        engines::MemoryEngine, memory::InMemoryEngineStore, resolver::FactoryResolver,
    },
    domain::EngineConfig,
    ports::{CacheEngine, CacheEngineResult, EngineCandidate},
    services::{CacheEngineRegistry, CacheManager},
};
use chrono::{DateTime, Local, Utc};
use mockable::Clock;
use rstest::fixture;
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

/// A timestamp divisible by every probability used in these tests.
pub const ALIGNED: i64 = 1_700_000_000;

/// Registry type exercised by the integration tests.
pub type TestRegistry = CacheEngineRegistry<FactoryResolver, InMemoryEngineStore, FixedClock>;

/// Manager type exercised by the integration tests.
pub type TestManager = CacheManager<FactoryResolver, InMemoryEngineStore, FixedClock>;

/// Clock pinned to a settable unix timestamp.
#[derive(Debug, Default)]
pub struct FixedClock {
    now: AtomicI64,
}

impl FixedClock {
    /// Creates a clock reading `timestamp`.
    #[must_use]
    pub const fn at(timestamp: i64) -> Self {
        Self {
            now: AtomicI64::new(timestamp),
        }
    }

    /// Moves the clock to `timestamp`.
    pub fn set(&self, timestamp: i64) {
        self.now.store(timestamp, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.now.load(Ordering::SeqCst), 0).unwrap_or_default()
    }
}

/// Memory engine that counts how often it was asked to collect garbage.
pub struct CountingEngine {
    inner: MemoryEngine,
    collections: Arc<AtomicUsize>,
}

impl CountingEngine {
    /// Wraps a fresh memory engine reporting into `collections`.
    #[must_use]
    pub fn new(collections: &Arc<AtomicUsize>) -> Self {
        Self {
            inner: MemoryEngine::new(),
            collections: Arc::clone(collections),
        }
    }
}

impl CacheEngine for CountingEngine {
    fn kind(&self) -> &str {
        "CountingEngine"
    }

    fn initialize(&mut self, config: &EngineConfig) -> CacheEngineResult<()> {
        self.inner.initialize(config)
    }

    fn effective_config(&self) -> EngineConfig {
        self.inner.effective_config()
    }

    fn collect_garbage(&mut self) -> CacheEngineResult<()> {
        self.collections.fetch_add(1, Ordering::SeqCst);
        self.inner.collect_garbage()
    }

    fn write(&mut self, key: &str, value: Value) -> CacheEngineResult<()> {
        self.inner.write(key, value)
    }

    fn read(&mut self, key: &str) -> CacheEngineResult<Option<Value>> {
        self.inner.read(key)
    }

    fn delete(&mut self, key: &str) -> CacheEngineResult<bool> {
        self.inner.delete(key)
    }

    fn clear(&mut self, check_expiry: bool) -> CacheEngineResult<()> {
        self.inner.clear(check_expiry)
    }
}

/// Value that is not a cache engine.
pub struct NotAnEngine;

impl EngineCandidate for NotAnEngine {
    fn candidate_kind(&self) -> &str {
        "NotAnEngine"
    }

    fn into_engine(self: Box<Self>) -> Option<Box<dyn CacheEngine>> {
        None
    }
}

/// Provides a clock pinned to [`ALIGNED`].
#[fixture]
pub fn clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::at(ALIGNED))
}

/// Builds a registry over the built-in engines reading `clock`.
#[must_use]
pub fn registry_with(resolver: FactoryResolver, clock: &Arc<FixedClock>) -> TestRegistry {
    CacheEngineRegistry::new(
        Arc::new(resolver),
        Arc::new(InMemoryEngineStore::new()),
        Arc::clone(clock),
    )
}

/// Provides a registry over the built-in engines at [`ALIGNED`].
#[fixture]
pub fn registry(clock: Arc<FixedClock>) -> TestRegistry {
    registry_with(FactoryResolver::with_builtin_engines(), &clock)
}
