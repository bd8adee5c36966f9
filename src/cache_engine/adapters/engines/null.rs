//! Engine that accepts every operation and stores nothing.

use super::merge_settings;
use crate::cache_engine::{
    domain::{EngineConfig, EngineSettings},
    ports::{CacheEngine, CacheEngineResult},
};
use serde_json::Value;

/// Cache engine that discards writes and never returns a value.
#[derive(Debug, Clone)]
pub struct NullEngine {
    config: EngineConfig,
}

impl NullEngine {
    /// Implementation name reported in diagnostics.
    pub const KIND: &'static str = "NullEngine";

    /// Creates a null engine with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: EngineSettings::defaults_config(),
        }
    }
}

impl Default for NullEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheEngine for NullEngine {
    fn kind(&self) -> &str {
        Self::KIND
    }

    fn initialize(&mut self, config: &EngineConfig) -> CacheEngineResult<()> {
        let (merged, _) = merge_settings(config)?;
        self.config = merged;
        Ok(())
    }

    fn effective_config(&self) -> EngineConfig {
        self.config.clone()
    }

    fn collect_garbage(&mut self) -> CacheEngineResult<()> {
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
