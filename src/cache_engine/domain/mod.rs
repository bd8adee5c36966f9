//! Domain model for cache engine registration.
//!
//! Value types describing how an engine is named, keyed and configured.
//! Engine instances themselves live behind the port traits.

mod alias;
mod config;
mod error;
mod name;
mod settings;

pub use alias::EngineAlias;
pub use config::{CLASS_NAME_KEY, EngineConfig, PROBABILITY_KEY};
pub use error::CacheEngineDomainError;
pub use name::EngineName;
pub use settings::EngineSettings;
