//! Policy Cache - A thread-safe in-memory cache
//!
//! Generic key-value cache with a pluggable eviction policy (FIFO, LRU, LFU,
//! LIFO) and optional per-entry TTL expiration.

pub mod cache;
pub mod config;
pub mod error;
pub mod tasks;

pub use cache::{Cache, CacheBuilder, CacheStats, EvictionPolicy, EvictionPolicyKind};
pub use config::Config;
pub use error::{CacheError, Result};
pub use tasks::spawn_sweeper;
