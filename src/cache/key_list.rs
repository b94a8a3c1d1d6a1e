//! Key List Module
//!
//! Ordered set of keys backed by a slab of doubly-linked nodes plus a
//! key -> slot index. Every operation is O(1): push/pop at either end,
//! move-to-back and removal of an arbitrary key.

use std::collections::HashMap;
use std::hash::Hash;

const NIL: usize = usize::MAX;

#[derive(Debug)]
struct Node<K> {
    /// None while the slot sits on the free list
    key: Option<K>,
    prev: usize,
    next: usize,
}

// == Key List ==
/// Ordered set of keys.
///
/// - Front = oldest
/// - Back = newest
#[derive(Debug)]
pub struct KeyList<K> {
    nodes: Vec<Node<K>>,
    free: Vec<usize>,
    index: HashMap<K, usize>,
    head: usize,
    tail: usize,
}

impl<K> Default for KeyList<K> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            index: HashMap::new(),
            head: NIL,
            tail: NIL,
        }
    }
}

impl<K: Hash + Eq + Clone> KeyList<K> {
    // == Constructor ==
    /// Creates a new empty list.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    // == Push Back ==
    /// Appends a key at the newest end.
    ///
    /// Returns false and leaves the order alone if the key is already present.
    pub fn push_back(&mut self, key: K) -> bool {
        if self.index.contains_key(&key) {
            return false;
        }
        let idx = self.alloc(key.clone());
        self.index.insert(key, idx);
        self.link_back(idx);
        true
    }

    // == Move To Back ==
    /// Moves an existing key to the newest end. Returns false if absent.
    pub fn move_to_back(&mut self, key: &K) -> bool {
        match self.index.get(key) {
            Some(&idx) => {
                if idx != self.tail {
                    self.unlink(idx);
                    self.link_back(idx);
                }
                true
            }
            None => false,
        }
    }

    // == Remove ==
    /// Removes a key wherever it sits. Returns false if absent.
    pub fn remove(&mut self, key: &K) -> bool {
        match self.index.remove(key) {
            Some(idx) => {
                self.release(idx);
                true
            }
            None => false,
        }
    }

    /// Removes and returns the oldest key.
    pub fn pop_front(&mut self) -> Option<K> {
        self.pop_at(self.head)
    }

    /// Removes and returns the newest key.
    pub fn pop_back(&mut self) -> Option<K> {
        self.pop_at(self.tail)
    }

    pub fn front(&self) -> Option<&K> {
        self.key_at(self.head)
    }

    pub fn back(&self) -> Option<&K> {
        self.key_at(self.tail)
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.index.clear();
        self.head = NIL;
        self.tail = NIL;
    }

    /// Iterates keys from oldest to newest.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    // == Slab Internals ==

    fn key_at(&self, idx: usize) -> Option<&K> {
        self.nodes.get(idx).and_then(|node| node.key.as_ref())
    }

    fn pop_at(&mut self, idx: usize) -> Option<K> {
        if idx == NIL {
            return None;
        }
        let key = self.release(idx)?;
        self.index.remove(&key);
        Some(key)
    }

    fn alloc(&mut self, key: K) -> usize {
        let node = Node {
            key: Some(key),
            prev: NIL,
            next: NIL,
        };
        match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = node;
                idx
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    /// Unlinks the slot, returns it to the free list and hands back its key.
    fn release(&mut self, idx: usize) -> Option<K> {
        self.unlink(idx);
        self.free.push(idx);
        self.nodes[idx].key.take()
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = (self.nodes[idx].prev, self.nodes[idx].next);
        if prev == NIL {
            self.head = next;
        } else {
            self.nodes[prev].next = next;
        }
        if next == NIL {
            self.tail = prev;
        } else {
            self.nodes[next].prev = prev;
        }
        self.nodes[idx].prev = NIL;
        self.nodes[idx].next = NIL;
    }

    fn link_back(&mut self, idx: usize) {
        self.nodes[idx].prev = self.tail;
        self.nodes[idx].next = NIL;
        if self.tail == NIL {
            self.head = idx;
        } else {
            self.nodes[self.tail].next = idx;
        }
        self.tail = idx;
    }
}

// == Iterator ==
/// Iterator over a [`KeyList`] from oldest to newest.
pub struct Iter<'a, K> {
    list: &'a KeyList<K>,
    cursor: usize,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor == NIL {
            return None;
        }
        let node = self.list.nodes.get(self.cursor)?;
        self.cursor = node.next;
        node.key.as_ref()
    }
}
