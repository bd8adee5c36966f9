//! Option map passed to engines at construction and initialisation.

use super::CacheEngineDomainError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key naming the engine implementation inside a configuration map.
pub const CLASS_NAME_KEY: &str = "className";

/// Key holding the maintenance trigger divisor.
pub const PROBABILITY_KEY: &str = "probability";

/// Mapping from option name to value for one engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EngineConfig(Map<String, Value>);

impl EngineConfig {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the configuration with `key` set to `value`.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Sets `key` to `value`, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns `true` when `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the engine implementation name, if the map carries one.
    #[must_use]
    pub fn class_name(&self) -> Option<&str> {
        self.0.get(CLASS_NAME_KEY).and_then(Value::as_str)
    }

    /// Returns the configuration without the `className` entry.
    #[must_use]
    pub fn without_class_name(mut self) -> Self {
        self.0.remove(CLASS_NAME_KEY);
        self
    }

    /// Reads the `probability` option.
    ///
    /// A missing, `null` or `false` value reads as `0`.
    ///
    /// # Errors
    ///
    /// Returns [`CacheEngineDomainError::InvalidProbability`] for negative,
    /// fractional or non-numeric values.
    pub fn probability(&self) -> Result<u64, CacheEngineDomainError> {
        match self.0.get(PROBABILITY_KEY) {
            None | Some(Value::Null | Value::Bool(false)) => Ok(0),
            Some(value) => value
                .as_u64()
                .ok_or_else(|| CacheEngineDomainError::InvalidProbability(value.to_string())),
        }
    }

    /// Returns `self` laid over `defaults`; keys present in `self` win.
    #[must_use]
    pub fn merged_over(&self, defaults: &Self) -> Self {
        let mut merged = defaults.0.clone();
        for (key, value) in &self.0 {
            merged.insert(key.clone(), value.clone());
        }
        Self(merged)
    }

    /// Returns the underlying JSON object.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for EngineConfig {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for EngineConfig {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
