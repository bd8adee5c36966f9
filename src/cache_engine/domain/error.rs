//! Error types for cache engine domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing cache engine domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CacheEngineDomainError {
    /// The engine alias is empty after trimming.
    #[error("cache engine alias must not be empty")]
    EmptyAlias,

    /// The engine name is empty after trimming.
    #[error("cache engine name must not be empty")]
    EmptyEngineName,

    /// The engine name is not of the form `Name` or `Plugin.Name`.
    #[error(
        "cache engine name '{0}' is invalid (expected `Name` or `Plugin.Name` without whitespace or path separators)"
    )]
    InvalidEngineName(String),

    /// The `probability` option is not a non-negative integer.
    #[error("probability must be a non-negative integer, got {0}")]
    InvalidProbability(String),

    /// Engine settings could not be read from the configuration map.
    #[error("invalid cache engine settings: {0}")]
    InvalidSettings(String),
}
