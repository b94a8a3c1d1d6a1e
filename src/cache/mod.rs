//! Cache Module
//!
//! Provides in-memory caching with pluggable eviction policies and TTL expiration.

mod builder;
mod concurrent;
mod entry;
mod fifo;
mod key_list;
mod lfu;
mod lifo;
mod lru;
mod policy;
mod stats;
mod store;


// Re-export public types
pub use builder::CacheBuilder;
pub use concurrent::Cache;
pub use entry::CacheEntry;
pub use fifo::FifoPolicy;
pub use key_list::KeyList;
pub use lfu::LfuPolicy;
pub use lifo::LifoPolicy;
pub use lru::LruPolicy;
pub use policy::{EvictionPolicy, EvictionPolicyKind};
pub use stats::CacheStats;
pub use store::CacheStore;
