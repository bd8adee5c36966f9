//! Process-local cache engine.

use super::{SharedClock, default_clock, expires_at, merge_settings};
use crate::cache_engine::{
    domain::{EngineConfig, EngineSettings},
    ports::{CacheEngine, CacheEngineResult},
};
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Clone)]
struct MemoryEntry {
    value: Value,
    expires_at: i64,
}

/// Cache engine keeping entries in a `HashMap`.
///
/// An entry is live while its expiry timestamp is strictly after the current
/// clock second.
pub struct MemoryEngine {
    config: EngineConfig,
    settings: EngineSettings,
    entries: HashMap<String, MemoryEntry>,
    clock: SharedClock,
}

impl MemoryEngine {
    /// Implementation name reported in diagnostics.
    pub const KIND: &'static str = "MemoryEngine";

    /// Creates an engine using the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(default_clock())
    }

    /// Creates an engine using `clock` for expiry decisions.
    #[must_use]
    pub fn with_clock(clock: SharedClock) -> Self {
        Self {
            config: EngineSettings::defaults_config(),
            settings: EngineSettings::default(),
            entries: HashMap::new(),
            clock,
        }
    }

    /// Returns the number of stored entries, expired ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn now(&self) -> i64 {
        self.clock.utc().timestamp()
    }

    fn key(&self, key: &str) -> String {
        format!("{}{key}", self.settings.prefix)
    }
}

impl Default for MemoryEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheEngine for MemoryEngine {
    fn kind(&self) -> &str {
        Self::KIND
    }

    fn initialize(&mut self, config: &EngineConfig) -> CacheEngineResult<()> {
        let (merged, settings) = merge_settings(config)?;
        self.config = merged;
        self.settings = settings;
        Ok(())
    }

    fn effective_config(&self) -> EngineConfig {
        self.config.clone()
    }

    fn collect_garbage(&mut self) -> CacheEngineResult<()> {
        let now = self.now();
        self.entries.retain(|_, entry| entry.expires_at > now);
        Ok(())
    }

    fn write(&mut self, key: &str, value: Value) -> CacheEngineResult<()> {
        let entry = MemoryEntry {
            value,
            expires_at: expires_at(self.now(), self.settings.duration),
        };
        self.entries.insert(self.key(key), entry);
        Ok(())
    }

    fn read(&mut self, key: &str) -> CacheEngineResult<Option<Value>> {
        let now = self.now();
        let prefixed = self.key(key);
        match self.entries.get(&prefixed) {
            Some(entry) if entry.expires_at > now => Ok(Some(entry.value.clone())),
            Some(_) => {
                self.entries.remove(&prefixed);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    fn delete(&mut self, key: &str) -> CacheEngineResult<bool> {
        Ok(self.entries.remove(&self.key(key)).is_some())
    }

    fn clear(&mut self, check_expiry: bool) -> CacheEngineResult<()> {
        if check_expiry {
            return self.collect_garbage();
        }
        self.entries.clear();
        Ok(())
    }
}
