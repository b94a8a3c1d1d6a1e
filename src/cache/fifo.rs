//! FIFO Policy Module
//!
//! Evicts keys in the order they were first inserted. Reads never reorder.

use std::hash::Hash;

use crate::cache::{CacheEntry, EvictionPolicy, KeyList};

// == FIFO Policy ==
/// Insertion-order eviction.
///
/// - Front = first inserted (next victim)
/// - Back = last inserted
#[derive(Debug)]
pub struct FifoPolicy<K> {
    queue: KeyList<K>,
}

impl<K: Hash + Eq + Clone> FifoPolicy<K> {
    pub fn new() -> Self {
        Self {
            queue: KeyList::new(),
        }
    }

    /// Enqueues a key; re-inserting a tracked key keeps its original position.
    pub fn insert(&mut self, key: &K) {
        self.queue.push_back(key.clone());
    }

    pub fn remove(&mut self, key: &K) -> bool {
        self.queue.remove(key)
    }

    pub fn pop_oldest(&mut self) -> Option<K> {
        self.queue.pop_front()
    }

    pub fn peek_oldest(&self) -> Option<&K> {
        self.queue.front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl<K: Hash + Eq + Clone> Default for FifoPolicy<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> EvictionPolicy<K, V> for FifoPolicy<K>
where
    K: Hash + Eq + Clone + Send + Sync,
{
    fn record_access(&mut self, _key: &K) {}

    fn record_put(&mut self, key: &K, _entry: &CacheEntry<K, V>) {
        self.insert(key);
    }

    fn record_removal(&mut self, key: &K) {
        self.remove(key);
    }

    fn evict(&mut self) -> Option<K> {
        self.pop_oldest()
    }

    fn contains(&self, key: &K) -> bool {
        self.queue.contains(key)
    }

    fn clear(&mut self) {
        self.queue.clear();
    }

    fn len(&self) -> usize {
        self.queue.len()
    }

    fn name(&self) -> &'static str {
        "fifo"
    }
}
