//! Validated engine alias type.

use super::CacheEngineDomainError;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Key under which one loaded engine instance is stored.
///
/// Aliases are trimmed but otherwise kept verbatim; `default` and `Default`
/// are distinct aliases.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EngineAlias(String);

impl EngineAlias {
    /// Creates a validated alias.
    ///
    /// # Errors
    ///
    /// Returns [`CacheEngineDomainError::EmptyAlias`] when the value is empty
    /// after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, CacheEngineDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CacheEngineDomainError::EmptyAlias);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the alias as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EngineAlias {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for EngineAlias {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EngineAlias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
