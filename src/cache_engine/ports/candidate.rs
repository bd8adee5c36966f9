//! Runtime contract conformance for objects offered as engines.

use super::CacheEngine;
use crate::cache_engine::domain::{CacheEngineDomainError, EngineName};
use std::fmt;

/// An object offered to the registry as a cache engine.
///
/// Factories and callers hand the registry candidates rather than engines;
/// the registry only trusts a candidate once
/// [`into_engine`](Self::into_engine) yields the backend contract. Every
/// [`CacheEngine`] is a conforming candidate.
pub trait EngineCandidate: Send {
    /// Implementation name used in diagnostics.
    fn candidate_kind(&self) -> &str;

    /// Converts the candidate into an engine, or `None` when it does not
    /// implement the backend contract.
    fn into_engine(self: Box<Self>) -> Option<Box<dyn CacheEngine>>;
}

impl<T: CacheEngine + 'static> EngineCandidate for T {
    fn candidate_kind(&self) -> &str {
        self.kind()
    }

    fn into_engine(self: Box<Self>) -> Option<Box<dyn CacheEngine>> {
        Some(self)
    }
}

/// What to load: a symbolic name to resolve, or a pre-built candidate.
pub enum EngineDescriptor {
    /// Resolve the name and construct a new instance.
    Named(EngineName),
    /// Use this instance directly; resolution and construction are skipped.
    Instance(Box<dyn EngineCandidate>),
}

impl EngineDescriptor {
    /// Parses `name` into a [`EngineDescriptor::Named`].
    ///
    /// # Errors
    ///
    /// Returns [`CacheEngineDomainError`] when the name is invalid.
    pub fn named(name: &str) -> Result<Self, CacheEngineDomainError> {
        Ok(Self::Named(EngineName::new(name)?))
    }

    /// Wraps a pre-built candidate.
    pub fn instance(candidate: impl EngineCandidate + 'static) -> Self {
        Self::Instance(Box::new(candidate))
    }
}

impl fmt::Debug for EngineDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.debug_tuple("Named").field(name).finish(),
            Self::Instance(candidate) => f
                .debug_tuple("Instance")
                .field(&candidate.candidate_kind())
                .finish(),
        }
    }
}
