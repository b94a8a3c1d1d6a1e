//! LFU Policy Module
//!
//! Implements Least Frequently Used eviction with frequency buckets.
//!
//! Each key carries an access count. Keys sharing a count live in one bucket,
//! ordered by when they entered it, and `min_frequency` points at the lowest
//! non-empty bucket so the victim is found without re-sorting anything.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use crate::cache::{CacheEntry, EvictionPolicy, KeyList};

// == LFU Policy ==
/// Frequency-order eviction; ties go to the key that entered the bucket first.
#[derive(Debug)]
pub struct LfuPolicy<K> {
    /// Current frequency of every tracked key
    frequencies: HashMap<K, u64>,
    /// Frequency -> keys at that frequency, oldest first
    buckets: BTreeMap<u64, KeyList<K>>,
    /// Lowest non-empty bucket, 0 when empty
    min_frequency: u64,
}

impl<K: Hash + Eq + Clone> LfuPolicy<K> {
    pub fn new() -> Self {
        Self {
            frequencies: HashMap::new(),
            buckets: BTreeMap::new(),
            min_frequency: 0,
        }
    }

    // == Insert ==
    /// Starts tracking a key at frequency 1. Tracked keys are left alone.
    pub fn insert(&mut self, key: &K) {
        if self.frequencies.contains_key(key) {
            return;
        }
        self.frequencies.insert(key.clone(), 1);
        self.buckets.entry(1).or_default().push_back(key.clone());
        // A fresh key is always the global minimum
        self.min_frequency = 1;
    }

    // == Increment ==
    /// Moves a tracked key from its bucket to the next one up.
    pub fn increment(&mut self, key: &K) {
        let Some(frequency) = self.frequencies.get_mut(key) else {
            return;
        };
        let old = *frequency;
        let new = old.saturating_add(1);
        if new == old {
            return;
        }
        *frequency = new;

        if let Some(bucket) = self.buckets.get_mut(&old) {
            bucket.remove(key);
            if bucket.is_empty() {
                self.buckets.remove(&old);
                if self.min_frequency == old {
                    self.min_frequency = new;
                }
            }
        }
        self.buckets.entry(new).or_default().push_back(key.clone());
    }

    // == Remove ==
    pub fn remove(&mut self, key: &K) -> bool {
        let Some(frequency) = self.frequencies.remove(key) else {
            return false;
        };
        if let Some(bucket) = self.buckets.get_mut(&frequency) {
            bucket.remove(key);
            if bucket.is_empty() {
                self.buckets.remove(&frequency);
                if self.min_frequency == frequency {
                    self.refresh_min_frequency();
                }
            }
        }
        true
    }

    // == Evict ==
    /// Removes the earliest-inserted key of the lowest frequency bucket.
    pub fn evict_least_frequent(&mut self) -> Option<K> {
        let frequency = if self.buckets.contains_key(&self.min_frequency) {
            self.min_frequency
        } else {
            *self.buckets.keys().next()?
        };

        let bucket = self.buckets.get_mut(&frequency)?;
        let key = bucket.pop_front()?;
        if bucket.is_empty() {
            self.buckets.remove(&frequency);
            self.refresh_min_frequency();
        }
        self.frequencies.remove(&key);
        Some(key)
    }

    /// Current access count of a tracked key.
    pub fn frequency(&self, key: &K) -> Option<u64> {
        self.frequencies.get(key).copied()
    }

    pub fn min_frequency(&self) -> u64 {
        self.min_frequency
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    fn refresh_min_frequency(&mut self) {
        self.min_frequency = self.buckets.keys().next().copied().unwrap_or(0);
    }
}

impl<K: Hash + Eq + Clone> Default for LfuPolicy<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> EvictionPolicy<K, V> for LfuPolicy<K>
where
    K: Hash + Eq + Clone + Send + Sync,
{
    fn record_access(&mut self, key: &K) {
        self.increment(key);
    }

    fn record_put(&mut self, key: &K, _entry: &CacheEntry<K, V>) {
        self.insert(key);
    }

    fn record_removal(&mut self, key: &K) {
        self.remove(key);
    }

    fn evict(&mut self) -> Option<K> {
        self.evict_least_frequent()
    }

    fn contains(&self, key: &K) -> bool {
        self.frequencies.contains_key(key)
    }

    fn clear(&mut self) {
        self.frequencies.clear();
        self.buckets.clear();
        self.min_frequency = 0;
    }

    fn len(&self) -> usize {
        self.frequencies.len()
    }

    fn name(&self) -> &'static str {
        "lfu"
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lfu_new_key_starts_at_one() {
        let mut lfu = LfuPolicy::new();
        lfu.insert(&"a");

        assert_eq!(lfu.frequency(&"a"), Some(1));
        assert_eq!(lfu.min_frequency(), 1);
    }

    #[test]
    fn test_lfu_evicts_least_frequent() {
        let mut lfu = LfuPolicy::new();
        lfu.insert(&"a");
        lfu.insert(&"b");
        lfu.increment(&"a");
        lfu.increment(&"a");
        lfu.increment(&"a");

        assert_eq!(lfu.frequency(&"a"), Some(4));
        assert_eq!(lfu.evict_least_frequent(), Some("b"));
        assert_eq!(lfu.evict_least_frequent(), Some("a"));
        assert_eq!(lfu.evict_least_frequent(), None);
        assert_eq!(lfu.min_frequency(), 0);
    }

    #[test]
    fn test_lfu_ties_break_by_bucket_arrival() {
        let mut lfu = LfuPolicy::new();
        lfu.insert(&"a");
        lfu.insert(&"b");
        lfu.insert(&"c");

        // b reaches frequency 2 before a does
        lfu.increment(&"b");
        lfu.increment(&"a");

        assert_eq!(lfu.evict_least_frequent(), Some("c"));
        assert_eq!(lfu.evict_least_frequent(), Some("b"));
        assert_eq!(lfu.evict_least_frequent(), Some("a"));
    }

    #[test]
    fn test_lfu_min_frequency_advances_on_access() {
        let mut lfu = LfuPolicy::new();
        lfu.insert(&"a");
        lfu.increment(&"a");

        assert_eq!(lfu.min_frequency(), 2);

        lfu.insert(&"b");
        assert_eq!(lfu.min_frequency(), 1);
    }

    #[test]
    fn test_lfu_remove_recomputes_min_frequency() {
        let mut lfu = LfuPolicy::new();
        lfu.insert(&"a");
        lfu.insert(&"b");
        lfu.increment(&"b");
        lfu.increment(&"b");

        assert!(lfu.remove(&"a"));
        assert_eq!(lfu.min_frequency(), 3);
        assert_eq!(lfu.evict_least_frequent(), Some("b"));
        assert!(!lfu.remove(&"a"));
    }

    #[test]
    fn test_lfu_insert_existing_keeps_frequency() {
        let mut lfu = LfuPolicy::new();
        lfu.insert(&"a");
        lfu.increment(&"a");
        lfu.insert(&"a");

        assert_eq!(lfu.frequency(&"a"), Some(2));
        assert_eq!(lfu.len(), 1);
    }

    #[test]
    fn test_lfu_increment_untracked_is_noop() {
        let mut lfu: LfuPolicy<&str> = LfuPolicy::new();
        lfu.increment(&"ghost");

        assert!(lfu.is_empty());
        assert!(lfu.buckets.is_empty());
    }

    #[test]
    fn test_lfu_clear_through_trait() {
        let mut lfu = LfuPolicy::new();
        lfu.insert(&1);
        lfu.insert(&2);
        lfu.increment(&1);

        EvictionPolicy::<i32, ()>::clear(&mut lfu);

        assert!(lfu.is_empty());
        assert_eq!(lfu.min_frequency(), 0);
        assert_eq!(EvictionPolicy::<i32, ()>::evict(&mut lfu), None);
    }
}
