//! Gateway configuration
//!
//! Board-agnostic settings, stored by the board as postcard binary data.

pub mod gateway;

pub use gateway::*;
