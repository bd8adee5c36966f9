//! Cache registry: pluggable cache engines loaded by name.
//!
//! This crate manages cache engine *instances*: resolving a configured
//! engine name to an implementation, constructing it on first use,
//! validating it against the engine contract, initialising it and binding it
//! to an alias for reuse.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Names, aliases and configuration values
//! - **Ports**: The engine contract and the resolver and store seams
//! - **Adapters**: Built-in engines, the factory resolver and the in-memory store
//!
//! # Modules
//!
//! - [`cache_engine`]: Engine registry, lazy cache manager and built-in engines

pub mod cache_engine;
