//! Cache Store Module
//!
//! String key-value store built on the byte-weighted `Lru`, with request
//! validation and hit/miss accounting.

use std::time::Duration;

use crate::cache::{CacheStats, EvictionLog, Lru, Value, MAX_KEY_LENGTH, MAX_VALUE_SIZE};
use crate::error::{CacheError, Result};

/// Stored entry as seen by the store's callers.
pub type StoredValue = Value<String, String>;

// == Cache Store ==
/// String cache bounded by total bytes and idle time.
///
/// Each entry weighs `key.len() + value.len()` bytes.
#[derive(Debug)]
pub struct CacheStore {
    /// Size- and age-bounded storage
    lru: Lru<String, String, EvictionLog>,
    /// Shared handle to the listener owned by `lru`
    evictions: EvictionLog,
    /// Performance statistics
    stats: CacheStats,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore.
    ///
    /// # Arguments
    /// * `max_size` - Maximum total weight in bytes
    /// * `max_age` - Maximum idle time per entry, `Duration::ZERO` disables it
    pub fn new(max_size: i64, max_age: Duration) -> Self {
        let evictions = EvictionLog::new();
        Self {
            lru: Lru::with_listener(max_size, max_age, evictions.clone()),
            evictions,
            stats: CacheStats::new(),
        }
    }

    // == Set ==
    /// Stores a key-value pair.
    ///
    /// Overwriting an existing key does not count as an eviction. Older
    /// entries are evicted until the new one fits.
    pub fn set(&mut self, key: String, value: String) -> Result<()> {
        // Validate key length
        if key.len() > MAX_KEY_LENGTH {
            return Err(CacheError::InvalidRequest(format!(
                "Key exceeds maximum length of {} bytes",
                MAX_KEY_LENGTH
            )));
        }

        // Validate value size
        if value.len() > MAX_VALUE_SIZE {
            return Err(CacheError::InvalidRequest(format!(
                "Value exceeds maximum size of {} bytes",
                MAX_VALUE_SIZE
            )));
        }

        self.lru.delete_no_callback(key.as_str());

        let weight = entry_weight(&key, &value);
        self.lru.put(key, value, weight);
        Ok(())
    }

    // == Get ==
    /// Retrieves an entry and marks it as most recently used.
    pub fn get(&mut self, key: &str) -> Result<&StoredValue> {
        match self.lru.get(key) {
            Some(entry) => {
                self.stats.record_hit();
                Ok(entry)
            }
            None => {
                self.stats.record_miss();
                Err(CacheError::NotFound(key.to_string()))
            }
        }
    }

    // == Peek ==
    /// Retrieves an entry without touching it. Not counted in hit/miss stats.
    pub fn peek(&mut self, key: &str) -> Result<&StoredValue> {
        self.lru
            .peek(key)
            .ok_or_else(|| CacheError::NotFound(key.to_string()))
    }

    // == Delete ==
    /// Removes an entry by key.
    pub fn delete(&mut self, key: &str) -> Result<()> {
        self.lru
            .delete_no_callback(key)
            .map(|_| ())
            .ok_or_else(|| CacheError::NotFound(key.to_string()))
    }

    // == Keys ==
    /// Returns up to `limit` keys, most recently used first. Expired
    /// entries are swept before listing.
    pub fn keys(&mut self, limit: usize) -> Vec<String> {
        self.lru.sweep_by_time();
        let mut keys = Vec::new();
        self.lru.iterate(|key, _| {
            if keys.len() >= limit {
                return false;
            }
            keys.push(key.clone());
            true
        });
        keys
    }

    // == Stats ==
    /// Returns current cache statistics, after sweeping expired entries.
    pub fn stats(&mut self) -> CacheStats {
        self.lru.sweep_by_time();
        CacheStats {
            evictions: self.evictions.count(),
            total_entries: self.lru.len(),
            total_size: self.lru.size(),
            max_size: self.lru.max_size(),
            ..self.stats.clone()
        }
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.lru.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.lru.is_empty()
    }

    /// Returns the current total weight in bytes.
    pub fn size(&self) -> i64 {
        self.lru.size()
    }
}

fn entry_weight(key: &str, value: &str) -> i64 {
    i64::try_from(key.len() + value.len()).unwrap_or(i64::MAX)
}
