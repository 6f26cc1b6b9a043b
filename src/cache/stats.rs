//! Cache Statistics Module
//!
//! Tracks cache performance metrics including hits, misses, and evictions.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::cache::EvictionListener;

// == Cache Stats ==
/// Tracks cache performance metrics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Number of successful cache retrievals
    pub hits: u64,
    /// Number of failed cache retrievals (key not found or expired)
    pub misses: u64,
    /// Number of entries pushed out by the size or age sweep
    pub evictions: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
    /// Current sum of entry weights in bytes
    pub total_size: i64,
    /// Configured weight ceiling in bytes
    pub max_size: i64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no requests have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }
}

// == Eviction Log ==
/// Listener that counts and logs evicted entries.
///
/// Clones share the counter, so the owner of the cache can keep a handle
/// while the cache owns the listener.
#[derive(Debug, Clone, Default)]
pub struct EvictionLog {
    evictions: Arc<AtomicU64>,
}

impl EvictionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of evictions seen so far.
    pub fn count(&self) -> u64 {
        self.evictions.load(Ordering::Relaxed)
    }
}

impl EvictionListener<String, String> for EvictionLog {
    fn on_evict(&mut self, key: String, val: String) {
        self.evictions.fetch_add(1, Ordering::Relaxed);
        debug!(key = %key, bytes = val.len(), "evicted entry");
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
        assert_eq!(stats.evictions, 0);
        assert_eq!(stats.total_entries, 0);
        assert_eq!(stats.total_size, 0);
    }

    #[test]
    fn test_hit_rate_no_requests() {
        let stats = CacheStats::new();
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_all_hits() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_hit();
        stats.record_hit();
        assert_eq!(stats.hit_rate(), 1.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_miss();
        assert_eq!(stats.hit_rate(), 0.5);
    }

    #[test]
    fn test_eviction_log_counts() {
        let log = EvictionLog::new();
        let mut listener = log.clone();

        listener.on_evict("a".to_string(), "1".to_string());
        listener.on_evict("b".to_string(), "2".to_string());

        assert_eq!(log.count(), 2);
    }
}
