//! Typed settings shared by every built-in engine.

use super::{CacheEngineDomainError, EngineConfig};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Settings every engine understands, with their defaults applied.
///
/// Engine-specific options (such as the file engine's `path`) stay in the
/// [`EngineConfig`] and are ignored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Prefix prepended to every key the engine stores.
    pub prefix: String,
    /// Entry lifetime in seconds.
    pub duration: u64,
    /// Maintenance trigger divisor; `0` disables the trigger.
    #[serde(deserialize_with = "probability_or_zero")]
    pub probability: u64,
    /// Group names the engine's entries belong to.
    pub groups: Vec<String>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            prefix: "cache_".to_owned(),
            duration: 3600,
            probability: 100,
            groups: Vec::new(),
        }
    }
}

impl EngineSettings {
    /// Reads settings from a configuration map, filling in defaults.
    ///
    /// # Errors
    ///
    /// Returns [`CacheEngineDomainError::InvalidSettings`] when a known key
    /// holds a value of the wrong type.
    pub fn from_config(config: &EngineConfig) -> Result<Self, CacheEngineDomainError> {
        serde_json::from_value(Value::Object(config.as_map().clone()))
            .map_err(|err| CacheEngineDomainError::InvalidSettings(err.to_string()))
    }

    /// Returns the default settings as a configuration map.
    #[must_use]
    pub fn defaults_config() -> EngineConfig {
        let defaults = Self::default();
        EngineConfig::new()
            .with("prefix", defaults.prefix)
            .with("duration", defaults.duration)
            .with("probability", defaults.probability)
            .with("groups", defaults.groups)
    }
}

/// Reads `null` and `false` as a disabled trigger.
fn probability_or_zero<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null | Value::Bool(false) => Ok(0),
        value => value
            .as_u64()
            .ok_or_else(|| serde::de::Error::custom(format!("invalid probability {value}"))),
    }
}
