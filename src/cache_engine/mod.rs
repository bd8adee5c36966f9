//! Pluggable cache engine registry.
//!
//! Engines are selected by symbolic name, constructed on first use,
//! validated against the [`ports::CacheEngine`] contract, initialised with
//! their configuration and given a clock-driven chance to collect garbage
//! each time they are loaded. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
