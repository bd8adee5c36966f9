//! In-memory store for loaded engine instances.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::cache_engine::{
    domain::EngineAlias,
    ports::{EngineHandle, EngineStore},
};

/// Thread-safe in-memory engine store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEngineStore {
    state: Arc<RwLock<BTreeMap<EngineAlias, EngineHandle>>>,
}

impl InMemoryEngineStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl EngineStore for InMemoryEngineStore {
    fn set(&self, alias: EngineAlias, engine: EngineHandle) -> Option<EngineHandle> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.insert(alias, engine)
    }

    fn get(&self, alias: &EngineAlias) -> Option<EngineHandle> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.get(alias).cloned()
    }

    fn remove(&self, alias: &EngineAlias) -> Option<EngineHandle> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.remove(alias)
    }

    fn aliases(&self) -> Vec<EngineAlias> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.keys().cloned().collect()
    }

    fn clear(&self) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.clear();
    }
}
