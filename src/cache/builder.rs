//! Cache Builder
//!
//! Fluent construction of a [`Cache`]: capacity, eviction policy and an
//! optional default TTL.

use std::hash::Hash;
use std::time::Duration;

use crate::cache::{Cache, CacheStore, EvictionPolicy, EvictionPolicyKind};
use crate::error::{CacheError, Result};

enum PolicyChoice<K, V> {
    Kind(EvictionPolicyKind),
    Custom(Box<dyn EvictionPolicy<K, V>>),
}

// == Cache Builder ==
/// Builder for [`Cache`].
///
/// A policy must be chosen explicitly; building without one is a
/// configuration error.
///
/// ```
/// use policy_cache::{Cache, EvictionPolicyKind};
/// use std::time::Duration;
///
/// let cache: Cache<String, u64> = Cache::builder(128)
///     .policy(EvictionPolicyKind::Lfu)
///     .default_ttl(Some(Duration::from_secs(30)))
///     .build()
///     .unwrap();
/// assert_eq!(cache.capacity(), 128);
/// ```
pub struct CacheBuilder<K, V> {
    capacity: usize,
    policy: Option<PolicyChoice<K, V>>,
    default_ttl: Option<Duration>,
}

impl<K, V> CacheBuilder<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            policy: None,
            default_ttl: None,
        }
    }

    /// Selects one of the built-in eviction policies.
    pub fn policy(mut self, kind: EvictionPolicyKind) -> Self {
        self.policy = Some(PolicyChoice::Kind(kind));
        self
    }

    /// Supplies a custom eviction policy. It must not track any keys yet.
    pub fn custom_policy(mut self, policy: Box<dyn EvictionPolicy<K, V>>) -> Self {
        self.policy = Some(PolicyChoice::Custom(policy));
        self
    }

    /// TTL applied to puts that don't specify one. None = never expire.
    pub fn default_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.default_ttl = ttl;
        self
    }

    // == Build ==
    pub fn build(self) -> Result<Cache<K, V>>
    where
        K: Send + Sync + 'static,
    {
        let policy = match self.policy {
            Some(PolicyChoice::Kind(kind)) => kind.build(),
            Some(PolicyChoice::Custom(policy)) => policy,
            None => {
                return Err(CacheError::InvalidConfiguration(
                    "no eviction policy supplied".to_string(),
                ))
            }
        };

        let mut store = CacheStore::with_policy(self.capacity, policy)?;
        store.set_default_ttl(self.default_ttl)?;
        Ok(Cache::from_store(store))
    }
}
