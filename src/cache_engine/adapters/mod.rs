//! Adapter implementations for cache engine ports.

pub mod engines;
pub mod memory;
pub mod resolver;
