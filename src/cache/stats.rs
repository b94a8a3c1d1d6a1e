//! Cache Statistics Module
//!
//! Tracks cache performance metrics including hits, misses, evictions and expirations.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache performance metrics.
///
/// The counters only ever grow; `clear()` on the cache leaves them alone.
/// A copy returned by [`Cache::stats`](crate::cache::Cache::stats) is an
/// immutable snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Number of successful cache retrievals
    pub hits: u64,
    /// Number of failed cache retrievals (key not found or expired)
    pub misses: u64,
    /// Number of put calls, including in-place updates
    pub puts: u64,
    /// Number of explicit removals that removed an entry
    pub removals: u64,
    /// Number of entries evicted by the eviction policy
    pub evictions: u64,
    /// Number of entries dropped because their TTL elapsed
    pub expirations: u64,
    /// Current number of entries in the cache
    pub entries: usize,
    /// Maximum number of entries the cache can hold
    pub capacity: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Ratio ==
    /// Calculates the cache hit ratio.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_ratio(&self) -> f64 {
        let total = self.lookups();
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Total number of lookups (hits + misses).
    pub fn lookups(&self) -> u64 {
        self.hits + self.misses
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_put(&mut self) {
        self.puts += 1;
    }

    pub fn record_removal(&mut self) {
        self.removals += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_expiration(&mut self) {
        self.expirations += 1;
    }

    // == Snapshot ==
    /// Returns a copy of the counters annotated with the current size.
    pub fn snapshot(&self, entries: usize, capacity: usize) -> Self {
        Self {
            entries,
            capacity,
            ..self.clone()
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = CacheStats::new();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.puts, 0);
        assert_eq!(stats.removals, 0);
        assert_eq!(stats.evictions, 0);
        assert_eq!(stats.expirations, 0);
        assert_eq!(stats.entries, 0);
    }

    #[test]
    fn test_hit_ratio_no_requests() {
        let stats = CacheStats::new();
        assert_eq!(stats.hit_ratio(), 0.0);
    }

    #[test]
    fn test_hit_ratio_all_hits() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_hit();
        stats.record_hit();
        assert_eq!(stats.hit_ratio(), 1.0);
    }

    #[test]
    fn test_hit_ratio_all_misses() {
        let mut stats = CacheStats::new();
        stats.record_miss();
        stats.record_miss();
        assert_eq!(stats.hit_ratio(), 0.0);
    }

    #[test]
    fn test_hit_ratio_mixed() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_miss();
        stats.record_miss();
        stats.record_hit();
        assert_eq!(stats.hit_ratio(), 0.5);
        assert_eq!(stats.lookups(), 4);
    }

    #[test]
    fn test_counters_are_independent() {
        let mut stats = CacheStats::new();
        stats.record_put();
        stats.record_put();
        stats.record_removal();
        stats.record_eviction();
        stats.record_eviction();
        stats.record_eviction();
        stats.record_expiration();

        assert_eq!(stats.puts, 2);
        assert_eq!(stats.removals, 1);
        assert_eq!(stats.evictions, 3);
        assert_eq!(stats.expirations, 1);
        assert_eq!(stats.lookups(), 0);
    }

    #[test]
    fn test_snapshot_sets_sizes() {
        let mut stats = CacheStats::new();
        stats.record_hit();

        let snapshot = stats.snapshot(42, 100);
        assert_eq!(snapshot.entries, 42);
        assert_eq!(snapshot.capacity, 100);
        assert_eq!(snapshot.hits, 1);
        // The source is left untouched
        assert_eq!(stats.entries, 0);
    }

    #[test]
    fn test_stats_serialize() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        let json = serde_json::to_value(stats.snapshot(1, 2)).unwrap();

        assert_eq!(json["hits"], 1);
        assert_eq!(json["entries"], 1);
        assert_eq!(json["capacity"], 2);
        assert_eq!(json["expirations"], 0);
    }
}
