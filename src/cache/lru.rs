//! LRU Policy Module
//!
//! Implements Least Recently Used tracking for cache eviction.

use std::hash::Hash;

use crate::cache::{CacheEntry, EvictionPolicy, KeyList};

// == LRU Policy ==
/// Tracks access order for LRU eviction.
///
/// Keys are stored in a [`KeyList`] where:
/// - Front = Least recently used
/// - Back = Most recently used
#[derive(Debug)]
pub struct LruPolicy<K> {
    /// Order of keys by access time
    order: KeyList<K>,
}

impl<K: Hash + Eq + Clone> LruPolicy<K> {
    // == Constructor ==
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self {
            order: KeyList::new(),
        }
    }

    // == Touch ==
    /// Marks a key as recently used (moves to the back).
    ///
    /// If the key is new it is appended.
    pub fn touch(&mut self, key: &K) {
        if !self.order.move_to_back(key) {
            self.order.push_back(key.clone());
        }
    }

    // == Remove ==
    /// Removes a key from the tracker.
    pub fn remove(&mut self, key: &K) -> bool {
        self.order.remove(key)
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used key.
    ///
    /// Returns None if tracker is empty.
    pub fn evict_oldest(&mut self) -> Option<K> {
        self.order.pop_front()
    }

    // == Peek Oldest ==
    /// Returns the least recently used key without removing it.
    pub fn peek_oldest(&self) -> Option<&K> {
        self.order.front()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.order.contains(key)
    }
}

impl<K: Hash + Eq + Clone> Default for LruPolicy<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> EvictionPolicy<K, V> for LruPolicy<K>
where
    K: Hash + Eq + Clone + Send + Sync,
{
    fn record_access(&mut self, key: &K) {
        // Only keys already tracked are reordered
        self.order.move_to_back(key);
    }

    fn record_put(&mut self, key: &K, _entry: &CacheEntry<K, V>) {
        self.touch(key);
    }

    fn record_removal(&mut self, key: &K) {
        self.remove(key);
    }

    fn evict(&mut self) -> Option<K> {
        self.evict_oldest()
    }

    fn contains(&self, key: &K) -> bool {
        self.order.contains(key)
    }

    fn clear(&mut self) {
        self.order.clear();
    }

    fn len(&self) -> usize {
        self.order.len()
    }

    fn name(&self) -> &'static str {
        "lru"
    }
}
