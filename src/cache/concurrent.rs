//! Thread-safe Cache
//!
//! Wraps a [`CacheStore`] in a single reader/writer lock so one instance can be
//! shared across threads behind an `Arc`.
//!
//! Every `get` takes the write lock: a hit reorders LRU/LFU bookkeeping and
//! updates the entry's access metadata, and an expired hit removes the entry
//! inside the same critical section. Only operations that never mutate
//! (`contains_key`, `len`, `stats`, ...) share the read lock.

use std::hash::Hash;
use std::time::Duration;

use parking_lot::RwLock;
use tracing::info;

use crate::cache::{CacheBuilder, CacheStats, CacheStore, EvictionPolicy, EvictionPolicyKind};
use crate::config::Config;
use crate::error::Result;

// == Cache ==
/// Generic, thread-safe, in-memory key-value cache.
#[derive(Debug)]
pub struct Cache<K, V> {
    store: RwLock<CacheStore<K, V>>,
    /// Fixed at construction, readable without locking
    capacity: usize,
}

impl<K, V> Cache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    // == Constructors ==
    /// Creates a cache with one of the built-in eviction policies.
    ///
    /// Fails with `InvalidConfiguration` if `capacity` is zero.
    pub fn new(capacity: usize, policy: EvictionPolicyKind) -> Result<Self>
    where
        K: Send + Sync + 'static,
    {
        CacheBuilder::new(capacity).policy(policy).build()
    }

    /// Starts a builder for a cache holding at most `capacity` entries.
    pub fn builder(capacity: usize) -> CacheBuilder<K, V> {
        CacheBuilder::new(capacity)
    }

    /// Creates a cache from loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self>
    where
        K: Send + Sync + 'static,
    {
        CacheBuilder::new(config.capacity)
            .policy(config.policy)
            .default_ttl(config.default_ttl)
            .build()
    }

    pub(crate) fn from_store(store: CacheStore<K, V>) -> Self {
        info!(
            capacity = store.capacity(),
            policy = store.policy_name(),
            default_ttl_ms = store.default_ttl().map(|ttl| ttl.as_millis() as u64),
            "Cache initialized"
        );
        Self {
            capacity: store.capacity(),
            store: RwLock::new(store),
        }
    }

    /// Creates a cache driven by a caller-supplied policy.
    pub fn with_policy(capacity: usize, policy: Box<dyn EvictionPolicy<K, V>>) -> Result<Self>
    where
        K: Send + Sync + 'static,
    {
        CacheBuilder::new(capacity).custom_policy(policy).build()
    }

    // == Reads ==
    /// Returns a clone of the value if present and not expired.
    pub fn get(&self, key: &K) -> Option<V> {
        self.store.write().get(key)
    }

    /// True if the key is present and not expired. Does not count as a lookup.
    pub fn contains_key(&self, key: &K) -> bool {
        self.store.read().contains_key(key)
    }

    /// Remaining TTL of a live entry.
    pub fn ttl_remaining(&self, key: &K) -> Option<Duration> {
        self.store.read().ttl_remaining(key)
    }

    // == Writes ==
    /// Stores a value with an optional TTL.
    ///
    /// Fails with `InvalidArgument` for a zero TTL, leaving the cache unchanged.
    pub fn put(&self, key: K, value: V, ttl: Option<Duration>) -> Result<()> {
        self.store.write().put(key, value, ttl)
    }

    /// Stores a value with the cache's default TTL.
    pub fn insert(&self, key: K, value: V) -> Result<()> {
        self.put(key, value, None)
    }

    pub fn remove(&self, key: &K) -> bool {
        self.store.write().remove(key)
    }

    /// Empties the table and the policy in one critical section.
    pub fn clear(&self) {
        self.store.write().clear();
    }

    /// Removes every expired entry; returns how many were dropped.
    pub fn purge_expired(&self) -> usize {
        self.store.write().purge_expired()
    }

    // == Introspection ==
    pub fn len(&self) -> usize {
        self.store.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.read().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Immutable snapshot of the counters.
    pub fn stats(&self) -> CacheStats {
        self.store.read().stats()
    }

    pub fn policy_name(&self) -> &'static str {
        self.store.read().policy_name()
    }

    /// Verifies dual-structure consistency and the capacity bound.
    pub fn check_invariants(&self) -> Result<()> {
        self.store.read().check_invariants()
    }
}
