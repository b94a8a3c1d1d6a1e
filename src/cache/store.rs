//! Cache Store Module
//!
//! Cache engine combining HashMap storage with a pluggable eviction policy and
//! TTL expiration. Not synchronized; [`Cache`](crate::cache::Cache) wraps it
//! in a lock.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::time::{Duration, Instant};

use tracing::{debug, error};

use crate::cache::{CacheEntry, CacheStats, EvictionPolicy, EvictionPolicyKind};
use crate::error::{CacheError, Result};

// == Cache Store ==
/// Cache storage with policy-driven eviction and TTL support.
///
/// The entry table and the policy always track the same set of keys.
pub struct CacheStore<K, V> {
    /// Key-value storage
    entries: HashMap<K, CacheEntry<K, V>>,
    /// Eviction policy, fixed for the lifetime of the store
    policy: Box<dyn EvictionPolicy<K, V>>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
    /// TTL for entries stored without an explicit one
    default_ttl: Option<Duration>,
}

impl<K, V> CacheStore<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    // == Constructor ==
    /// Creates a new CacheStore with one of the built-in policies.
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of entries the cache can hold
    /// * `kind` - Eviction algorithm
    pub fn new(capacity: usize, kind: EvictionPolicyKind) -> Result<Self>
    where
        K: Send + Sync + 'static,
    {
        Self::with_policy(capacity, kind.build())
    }

    /// Creates a new CacheStore driven by a caller-supplied policy.
    ///
    /// The policy must not track any keys yet.
    pub fn with_policy(capacity: usize, policy: Box<dyn EvictionPolicy<K, V>>) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidConfiguration(
                "capacity must be greater than zero".to_string(),
            ));
        }
        if !policy.is_empty() {
            return Err(CacheError::InvalidConfiguration(format!(
                "eviction policy '{}' already tracks {} keys",
                policy.name(),
                policy.len()
            )));
        }

        Ok(Self {
            entries: HashMap::with_capacity(capacity.min(1024)),
            policy,
            stats: CacheStats::new(),
            capacity,
            default_ttl: None,
        })
    }

    // == Default TTL ==
    /// Sets the TTL applied to puts without an explicit one.
    pub fn set_default_ttl(&mut self, ttl: Option<Duration>) -> Result<()> {
        if ttl == Some(Duration::ZERO) {
            return Err(CacheError::InvalidConfiguration(
                "default TTL must be greater than zero".to_string(),
            ));
        }
        self.default_ttl = ttl;
        Ok(())
    }

    pub fn default_ttl(&self) -> Option<Duration> {
        self.default_ttl
    }

    // == Put ==
    /// Stores a key-value pair with optional TTL.
    ///
    /// If the key already exists, the value is overwritten in place and the TTL
    /// restarts. If the key is new and the cache is full, exactly one key is
    /// evicted before the insert.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `value` - The value to store
    /// * `ttl` - Optional TTL (falls back to the default TTL if None)
    pub fn put(&mut self, key: K, value: V, ttl: Option<Duration>) -> Result<()> {
        if ttl == Some(Duration::ZERO) {
            return Err(CacheError::InvalidArgument(
                "TTL must be greater than zero".to_string(),
            ));
        }
        let ttl = ttl.or(self.default_ttl);

        // A stale entry under the same key is dropped so the put becomes a fresh insert
        if self.entries.get(&key).is_some_and(|entry| entry.is_expired()) {
            self.expire(&key);
        }

        if let Some(entry) = self.entries.get_mut(&key) {
            entry.replace(value, ttl);
            self.policy.record_access(&key);
            self.stats.record_put();
            return Ok(());
        }

        if self.entries.len() >= self.capacity {
            if !self.policy.admit(&key) {
                self.stats.record_put();
                self.stats.record_eviction();
                debug!(policy = self.policy.name(), "Incoming entry refused by policy");
                return Ok(());
            }
            self.evict_one()?;
        }

        let entry = CacheEntry::new(key.clone(), value, ttl);
        self.policy.record_put(&key, &entry);
        self.entries.insert(key, entry);
        self.stats.record_put();

        Ok(())
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Expired entries are removed on the spot and counted as both an
    /// expiration and a miss.
    pub fn get(&mut self, key: &K) -> Option<V> {
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if expired {
            self.expire(key);
            self.stats.record_miss();
            return None;
        }

        let entry = self.entries.get_mut(key)?;
        entry.touch();
        let value = entry.value.clone();
        self.policy.record_access(key);
        self.stats.record_hit();
        Some(value)
    }

    // == Remove ==
    /// Removes an entry by key. Returns whether anything was removed.
    pub fn remove(&mut self, key: &K) -> bool {
        if self.entries.remove(key).is_some() {
            self.policy.record_removal(key);
            self.stats.record_removal();
            true
        } else {
            false
        }
    }

    // == Contains Key ==
    /// True if the key is present and not expired.
    ///
    /// Touches neither the stats nor the policy.
    pub fn contains_key(&self, key: &K) -> bool {
        self.entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired())
    }

    /// Remaining TTL of a live entry; None if absent, expired or never expiring.
    pub fn ttl_remaining(&self, key: &K) -> Option<Duration> {
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired())
            .and_then(|entry| entry.ttl_remaining())
    }

    // == Clear ==
    /// Drops every entry and resets the policy. Counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.policy.clear();
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot(self.entries.len(), self.capacity)
    }

    // == Purge Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = Instant::now();
        let expired_keys: Vec<K> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.expire(key);
        }

        expired_keys.len()
    }

    // == Invariants ==
    /// Verifies that the table and the policy agree on the live key set and
    /// that the table is within capacity.
    pub fn check_invariants(&self) -> Result<()> {
        if self.entries.len() > self.capacity {
            return Err(self.violation(format!(
                "{} entries exceed capacity {}",
                self.entries.len(),
                self.capacity
            )));
        }
        if self.entries.len() != self.policy.len() {
            return Err(self.violation(format!(
                "table holds {} keys but policy '{}' tracks {}",
                self.entries.len(),
                self.policy.name(),
                self.policy.len()
            )));
        }
        let untracked = self
            .entries
            .keys()
            .filter(|key| !self.policy.contains(key))
            .count();
        if untracked > 0 {
            return Err(self.violation(format!(
                "{} table keys are not tracked by policy '{}'",
                untracked,
                self.policy.name()
            )));
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    // == Internals ==

    fn expire(&mut self, key: &K) {
        if self.entries.remove(key).is_some() {
            self.policy.record_removal(key);
            self.stats.record_expiration();
            debug!(policy = self.policy.name(), "Expired entry removed");
        }
    }

    fn evict_one(&mut self) -> Result<()> {
        let Some(victim) = self.policy.evict() else {
            return Err(self.violation(format!(
                "cache holds {} entries but policy '{}' has nothing to evict",
                self.entries.len(),
                self.policy.name()
            )));
        };

        if self.entries.remove(&victim).is_none() {
            return Err(self.violation(format!(
                "policy '{}' evicted a key missing from the table",
                self.policy.name()
            )));
        }

        self.stats.record_eviction();
        debug!(policy = self.policy.name(), "Evicted entry to make room");
        Ok(())
    }

    fn violation(&self, message: String) -> CacheError {
        error!(policy = self.policy.name(), "Cache invariant violated: {}", message);
        CacheError::InvariantViolation(message)
    }
}

impl<K, V> fmt::Debug for CacheStore<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheStore")
            .field("len", &self.entries.len())
            .field("capacity", &self.capacity)
            .field("policy", &self.policy.name())
            .field("default_ttl", &self.default_ttl)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
