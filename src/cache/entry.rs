//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// Represents a single cache entry with value and bookkeeping metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<K, V> {
    /// The key this entry is stored under
    pub key: K,
    /// The stored value
    pub value: V,
    /// Creation time, reset when the value is replaced
    pub created_at: Instant,
    /// Time of the most recent read or update
    pub last_accessed_at: Instant,
    /// Number of reads and updates since creation
    pub access_count: u64,
    /// Time to live, None = no expiration
    pub ttl: Option<Duration>,
}

impl<K, V> CacheEntry<K, V> {
    // == Constructor ==
    /// Creates a new cache entry with optional TTL.
    ///
    /// # Arguments
    /// * `key` - The key the entry is stored under
    /// * `value` - The value to store
    /// * `ttl` - Optional time to live
    pub fn new(key: K, value: V, ttl: Option<Duration>) -> Self {
        let now = Instant::now();
        Self {
            key,
            value,
            created_at: now,
            last_accessed_at: now,
            access_count: 0,
            ttl,
        }
    }

    // == Expiry Deadline ==
    /// Returns the instant at which the entry expires.
    ///
    /// A TTL too large to be represented as an `Instant` never expires.
    pub fn expires_at(&self) -> Option<Instant> {
        self.ttl.and_then(|ttl| self.created_at.checked_add(ttl))
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is expired once the current time is greater
    /// than or equal to `created_at + ttl`. Never mutates the entry.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Same as [`is_expired`](Self::is_expired) against an explicit clock reading.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.expires_at() {
            Some(deadline) => now >= deadline,
            None => false,
        }
    }

    // == Time To Live ==
    /// Returns the remaining TTL, or None if no expiration is set.
    ///
    /// # Returns
    /// - `Some(Duration::ZERO)` if the entry has expired
    /// - `Some(remaining)` if the entry has TTL and hasn't expired
    /// - `None` if the entry never expires
    pub fn ttl_remaining(&self) -> Option<Duration> {
        self.expires_at()
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    /// Time elapsed since the entry was created or last replaced.
    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }

    // == Touch ==
    /// Records a read of this entry.
    pub fn touch(&mut self) {
        self.last_accessed_at = Instant::now();
        self.access_count = self.access_count.saturating_add(1);
    }

    // == Replace ==
    /// Updates the value in place and restarts the TTL clock.
    ///
    /// Counts as an access; the key is left untouched.
    pub fn replace(&mut self, value: V, ttl: Option<Duration>) {
        let now = Instant::now();
        self.value = value;
        self.ttl = ttl;
        self.created_at = now;
        self.last_accessed_at = now;
        self.access_count = self.access_count.saturating_add(1);
    }
}
