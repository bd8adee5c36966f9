//! Test doubles shared by cache engine unit tests.

use crate::cache_engine::{
    domain::EngineConfig,
    ports::{CacheEngine, CacheEngineError, CacheEngineResult, EngineCandidate},
};
use chrono::{DateTime, Local, Utc};
use mockable::Clock;
use serde_json::Value;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Clock pinned to a settable unix timestamp.
#[derive(Debug, Default)]
pub struct TestClock {
    now: AtomicI64,
}

impl TestClock {
    pub fn at(timestamp: i64) -> Self {
        Self {
            now: AtomicI64::new(timestamp),
        }
    }

    pub fn advance(&self, seconds: i64) {
        self.now.fetch_add(seconds, Ordering::SeqCst);
    }
}

impl Clock for TestClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.now.load(Ordering::SeqCst), 0).unwrap_or_default()
    }
}

/// Counters observed by a [`RecordingEngine`] and its test.
#[derive(Debug, Clone, Default)]
pub struct EngineProbe {
    constructed: Arc<AtomicUsize>,
    initialised: Arc<AtomicUsize>,
    collected: Arc<AtomicUsize>,
    last_config: Arc<Mutex<Option<EngineConfig>>>,
}

impl EngineProbe {
    pub fn constructed(&self) -> usize {
        self.constructed.load(Ordering::SeqCst)
    }

    pub fn initialised(&self) -> usize {
        self.initialised.load(Ordering::SeqCst)
    }

    pub fn collected(&self) -> usize {
        self.collected.load(Ordering::SeqCst)
    }

    pub fn last_config(&self) -> Option<EngineConfig> {
        self.last_config.lock().expect("probe lock").clone()
    }
}

/// Engine that records contract calls instead of caching anything.
pub struct RecordingEngine {
    probe: EngineProbe,
    config: EngineConfig,
    reject_init: bool,
    fail_collection: bool,
}

impl RecordingEngine {
    pub fn new(probe: &EngineProbe) -> Self {
        probe.constructed.fetch_add(1, Ordering::SeqCst);
        Self {
            probe: probe.clone(),
            config: EngineConfig::new(),
            reject_init: false,
            fail_collection: false,
        }
    }

    pub fn rejecting_init(mut self) -> Self {
        self.reject_init = true;
        self
    }

    pub fn failing_collection(mut self) -> Self {
        self.fail_collection = true;
        self
    }
}

impl CacheEngine for RecordingEngine {
    fn kind(&self) -> &str {
        "RecordingEngine"
    }

    fn initialize(&mut self, config: &EngineConfig) -> CacheEngineResult<()> {
        self.probe.initialised.fetch_add(1, Ordering::SeqCst);
        *self.probe.last_config.lock().expect("probe lock") = Some(config.clone());
        if self.reject_init {
            return Err(CacheEngineError::MissingOption("servers"));
        }
        self.config = config.clone();
        Ok(())
    }

    fn effective_config(&self) -> EngineConfig {
        self.config.clone()
    }

    fn collect_garbage(&mut self) -> CacheEngineResult<()> {
        self.probe.collected.fetch_add(1, Ordering::SeqCst);
        if self.fail_collection {
            return Err(CacheEngineError::storage(std::io::Error::other(
                "disk unavailable",
            )));
        }
        Ok(())
    }

    fn write(&mut self, _key: &str, _value: Value) -> CacheEngineResult<()> {
        Ok(())
    }

    fn read(&mut self, _key: &str) -> CacheEngineResult<Option<Value>> {
        Ok(None)
    }

    fn delete(&mut self, _key: &str) -> CacheEngineResult<bool> {
        Ok(false)
    }

    fn clear(&mut self, _check_expiry: bool) -> CacheEngineResult<()> {
        Ok(())
    }
}

/// Candidate that does not implement the engine contract.
pub struct PlainObject;

impl EngineCandidate for PlainObject {
    fn candidate_kind(&self) -> &str {
        "PlainObject"
    }

    fn into_engine(self: Box<Self>) -> Option<Box<dyn CacheEngine>> {
        None
    }
}
