//! Eviction Policy Module
//!
//! Defines the contract every eviction algorithm implements and the selector
//! used to pick one at construction time.

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cache::{CacheEntry, FifoPolicy, LfuPolicy, LifoPolicy, LruPolicy};
use crate::error::CacheError;

// == Eviction Policy ==
/// Decides which key leaves the cache when it is full.
///
/// Implementations track keys only, never values, and hold no locks of their
/// own: the cache calls them while it holds its exclusive lock. The set of
/// tracked keys must always equal the set of keys in the cache's entry table.
pub trait EvictionPolicy<K, V>: Send + Sync {
    /// Called on every successful read and on in-place updates.
    fn record_access(&mut self, key: &K);

    /// Called when a new key enters the table (never on updates).
    fn record_put(&mut self, key: &K, entry: &CacheEntry<K, V>);

    /// Called whenever a key leaves the table other than through [`evict`](Self::evict).
    fn record_removal(&mut self, key: &K);

    /// Picks a victim and drops it from the policy's own bookkeeping.
    ///
    /// Returns None only when nothing is tracked.
    fn evict(&mut self) -> Option<K>;

    /// Asked when a new key arrives at a full cache. Returning false makes the
    /// incoming key the victim: it is counted as evicted and never stored.
    fn admit(&self, _key: &K) -> bool {
        true
    }

    fn contains(&self, key: &K) -> bool;

    fn clear(&mut self);

    /// Number of tracked keys.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}

// == Policy Kind ==
/// Selector for the built-in eviction algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvictionPolicyKind {
    /// Insertion order: the oldest inserted key goes first
    Fifo,
    /// Access order: the least recently touched key goes first
    #[default]
    Lru,
    /// Frequency order: the least frequently used key goes first
    Lfu,
    /// Reverse insertion order: the newest inserted key goes first
    Lifo,
}

impl EvictionPolicyKind {
    pub const ALL: [EvictionPolicyKind; 4] = [
        EvictionPolicyKind::Fifo,
        EvictionPolicyKind::Lru,
        EvictionPolicyKind::Lfu,
        EvictionPolicyKind::Lifo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EvictionPolicyKind::Fifo => "fifo",
            EvictionPolicyKind::Lru => "lru",
            EvictionPolicyKind::Lfu => "lfu",
            EvictionPolicyKind::Lifo => "lifo",
        }
    }

    // == Factory ==
    /// Builds a fresh, empty policy of this kind.
    pub fn build<K, V>(&self) -> Box<dyn EvictionPolicy<K, V>>
    where
        K: Hash + Eq + Clone + Send + Sync + 'static,
    {
        match self {
            EvictionPolicyKind::Fifo => Box::new(FifoPolicy::new()),
            EvictionPolicyKind::Lru => Box::new(LruPolicy::new()),
            EvictionPolicyKind::Lfu => Box::new(LfuPolicy::new()),
            EvictionPolicyKind::Lifo => Box::new(LifoPolicy::new()),
        }
    }
}

impl fmt::Display for EvictionPolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EvictionPolicyKind {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fifo" | "insertion-order" => Ok(EvictionPolicyKind::Fifo),
            "lru" | "access-order" => Ok(EvictionPolicyKind::Lru),
            "lfu" | "frequency-order" => Ok(EvictionPolicyKind::Lfu),
            "lifo" | "reverse-insertion-order" => Ok(EvictionPolicyKind::Lifo),
            other => Err(CacheError::InvalidConfiguration(format!(
                "unknown eviction policy '{}'",
                other
            ))),
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_short_names() {
        assert_eq!("fifo".parse::<EvictionPolicyKind>(), Ok(EvictionPolicyKind::Fifo));
        assert_eq!("LRU".parse::<EvictionPolicyKind>(), Ok(EvictionPolicyKind::Lru));
        assert_eq!(" lfu ".parse::<EvictionPolicyKind>(), Ok(EvictionPolicyKind::Lfu));
        assert_eq!("Lifo".parse::<EvictionPolicyKind>(), Ok(EvictionPolicyKind::Lifo));
    }

    #[test]
    fn test_parse_descriptive_names() {
        assert_eq!(
            "insertion-order".parse::<EvictionPolicyKind>(),
            Ok(EvictionPolicyKind::Fifo)
        );
        assert_eq!(
            "access-order".parse::<EvictionPolicyKind>(),
            Ok(EvictionPolicyKind::Lru)
        );
        assert_eq!(
            "frequency-order".parse::<EvictionPolicyKind>(),
            Ok(EvictionPolicyKind::Lfu)
        );
        assert_eq!(
            "reverse-insertion-order".parse::<EvictionPolicyKind>(),
            Ok(EvictionPolicyKind::Lifo)
        );
    }

    #[test]
    fn test_parse_unknown() {
        let err = "random".parse::<EvictionPolicyKind>().unwrap_err();
        assert!(matches!(err, CacheError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for kind in EvictionPolicyKind::ALL {
            assert_eq!(kind.to_string().parse::<EvictionPolicyKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&EvictionPolicyKind::Lfu).unwrap();
        assert_eq!(json, "\"lfu\"");

        let kind: EvictionPolicyKind = serde_json::from_str("\"lifo\"").unwrap();
        assert_eq!(kind, EvictionPolicyKind::Lifo);
    }

    #[test]
    fn test_factory_builds_matching_policy() {
        for kind in EvictionPolicyKind::ALL {
            let policy: Box<dyn EvictionPolicy<String, u32>> = kind.build();
            assert_eq!(policy.name(), kind.as_str());
            assert!(policy.is_empty());
        }
    }

    #[test]
    fn test_factory_policy_tracks_keys() {
        let mut policy: Box<dyn EvictionPolicy<&str, u32>> = EvictionPolicyKind::Lru.build();
        let a = CacheEntry::new("a", 1, None);
        let b = CacheEntry::new("b", 2, None);

        policy.record_put(&"a", &a);
        policy.record_put(&"b", &b);
        policy.record_access(&"a");

        assert_eq!(policy.len(), 2);
        assert!(policy.contains(&"a"));
        assert_eq!(policy.evict(), Some("b"));

        policy.record_removal(&"a");
        assert!(policy.is_empty());
        assert_eq!(policy.evict(), None);
    }
}
