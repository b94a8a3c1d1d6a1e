//! LIFO Policy Module
//!
//! Evicts the most recently inserted key. Rarely the right choice for a
//! general cache, but keeps the policy set interchangeable.

use std::hash::Hash;

use crate::cache::{CacheEntry, EvictionPolicy, KeyList};

// == LIFO Policy ==
/// Reverse-insertion-order eviction backed by a stack of keys.
///
/// When the cache is full the incoming key is the newest one, so it is
/// refused admission and becomes the victim itself.
#[derive(Debug)]
pub struct LifoPolicy<K> {
    /// Back of the list is the top of the stack
    stack: KeyList<K>,
}

impl<K: Hash + Eq + Clone> LifoPolicy<K> {
    pub fn new() -> Self {
        Self {
            stack: KeyList::new(),
        }
    }

    pub fn push(&mut self, key: &K) {
        self.stack.push_back(key.clone());
    }

    pub fn pop_newest(&mut self) -> Option<K> {
        self.stack.pop_back()
    }

    pub fn peek_newest(&self) -> Option<&K> {
        self.stack.back()
    }

    pub fn remove(&mut self, key: &K) -> bool {
        self.stack.remove(key)
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

impl<K: Hash + Eq + Clone> Default for LifoPolicy<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> EvictionPolicy<K, V> for LifoPolicy<K>
where
    K: Hash + Eq + Clone + Send + Sync,
{
    fn record_access(&mut self, _key: &K) {}

    fn record_put(&mut self, key: &K, _entry: &CacheEntry<K, V>) {
        self.push(key);
    }

    fn record_removal(&mut self, key: &K) {
        self.remove(key);
    }

    fn evict(&mut self) -> Option<K> {
        self.pop_newest()
    }

    fn admit(&self, _key: &K) -> bool {
        false
    }

    fn contains(&self, key: &K) -> bool {
        self.stack.contains(key)
    }

    fn clear(&mut self) {
        self.stack.clear();
    }

    fn len(&self) -> usize {
        self.stack.len()
    }

    fn name(&self) -> &'static str {
        "lifo"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifo_pops_newest_first() {
        let mut lifo = LifoPolicy::new();
        lifo.push(&"a");
        lifo.push(&"b");
        lifo.push(&"c");

        assert_eq!(lifo.peek_newest(), Some(&"c"));
        assert_eq!(lifo.pop_newest(), Some("c"));
        assert_eq!(lifo.pop_newest(), Some("b"));
        assert_eq!(lifo.pop_newest(), Some("a"));
        assert!(lifo.is_empty());
    }

    #[test]
    fn test_lifo_remove_top_exposes_previous() {
        let mut lifo = LifoPolicy::new();
        lifo.push(&1);
        lifo.push(&2);
        lifo.push(&3);

        assert!(lifo.remove(&3));
        assert_eq!(lifo.peek_newest(), Some(&2));
        assert_eq!(lifo.len(), 2);
    }

    #[test]
    fn test_lifo_refuses_admission_when_full() {
        let lifo: LifoPolicy<&str> = LifoPolicy::new();
        assert!(!EvictionPolicy::<&str, ()>::admit(&lifo, &"incoming"));
    }

    #[test]
    fn test_lifo_ignores_access() {
        let mut lifo = LifoPolicy::new();
        lifo.push(&"a");
        lifo.push(&"b");

        EvictionPolicy::<&str, ()>::record_access(&mut lifo, &"a");

        assert_eq!(EvictionPolicy::<&str, ()>::evict(&mut lifo), Some("b"));
    }
}
