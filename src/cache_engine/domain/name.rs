//! Symbolic engine name, optionally qualified by a plugin.

use super::CacheEngineDomainError;
use std::fmt;

/// Symbolic name of a cache engine implementation.
///
/// Names take the form `Memory` or `Plugin.Memory`. The plugin part scopes
/// resolution to engines contributed by that plugin.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EngineName {
    plugin: Option<String>,
    name: String,
}

impl EngineName {
    /// Parses a symbolic engine name.
    ///
    /// # Errors
    ///
    /// Returns [`CacheEngineDomainError::EmptyEngineName`] when the value is
    /// empty after trimming, or [`CacheEngineDomainError::InvalidEngineName`]
    /// when either part is empty or contains whitespace, `.` or `/`.
    pub fn new(value: impl Into<String>) -> Result<Self, CacheEngineDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CacheEngineDomainError::EmptyEngineName);
        }

        let (plugin, name) = match trimmed.split_once('.') {
            Some((plugin, name)) => (Some(plugin), name),
            None => (None, trimmed),
        };

        let valid_part = |part: &str| {
            !part.is_empty()
                && part
                    .chars()
                    .all(|c| !c.is_whitespace() && c != '.' && c != '/' && c != '\\')
        };
        if !valid_part(name) || plugin.is_some_and(|p| !valid_part(p)) {
            return Err(CacheEngineDomainError::InvalidEngineName(raw));
        }

        Ok(Self {
            plugin: plugin.map(str::to_owned),
            name: name.to_owned(),
        })
    }

    /// Builds an unqualified name from a trusted identifier.
    pub(crate) fn from_static(name: &'static str) -> Self {
        Self {
            plugin: None,
            name: name.to_owned(),
        }
    }

    /// Returns the plugin qualifier, if any.
    #[must_use]
    pub fn plugin(&self) -> Option<&str> {
        self.plugin.as_deref()
    }

    /// Returns the unqualified engine name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for EngineName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.plugin {
            Some(plugin) => write!(f, "{plugin}.{}", self.name),
            None => f.write_str(&self.name),
        }
    }
}
