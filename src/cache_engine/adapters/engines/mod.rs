//! Built-in cache engines.
//!
//! - [`MemoryEngine`]: process-local map with per-entry expiry
//! - [`FileEngine`]: one JSON file per key under a configured directory
//! - [`NullEngine`]: stores nothing

mod file;
mod memory;
mod null;

pub use file::FileEngine;
pub use memory::MemoryEngine;
pub use null::NullEngine;

use crate::cache_engine::{
    domain::{EngineConfig, EngineSettings},
    ports::CacheEngineResult,
};
use mockable::{Clock, DefaultClock};
use std::sync::Arc;

/// Clock shared by an engine and whoever constructed it.
pub type SharedClock = Arc<dyn Clock + Send + Sync>;

fn default_clock() -> SharedClock {
    Arc::new(DefaultClock)
}

/// Merges `config` over the engine defaults and reads the typed settings.
fn merge_settings(config: &EngineConfig) -> CacheEngineResult<(EngineConfig, EngineSettings)> {
    let merged = config.merged_over(&EngineSettings::defaults_config());
    let settings = EngineSettings::from_config(&merged)?;
    Ok((merged, settings))
}

fn expires_at(now: i64, duration: u64) -> i64 {
    now.saturating_add(i64::try_from(duration).unwrap_or(i64::MAX))
}
