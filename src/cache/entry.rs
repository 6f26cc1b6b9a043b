//! Cache Entry Module
//!
//! Defines the payload record held per key.

use std::time::Instant;

// == Value ==
/// A single cache entry: key, payload, weight and last touch time.
///
/// Callers only ever see `&Value` borrowed from the cache, so a view is
/// valid until the next mutating call.
#[derive(Debug, Clone)]
pub struct Value<K, V> {
    pub(crate) key: K,
    pub(crate) val: V,
    pub(crate) size: i64,
    pub(crate) touched_at: Instant,
}

impl<K, V> Value<K, V> {
    pub(crate) fn new(key: K, val: V, size: i64, touched_at: Instant) -> Self {
        Self {
            key,
            val,
            size,
            touched_at,
        }
    }

    /// The key the entry is indexed by.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// The stored payload.
    pub fn val(&self) -> &V {
        &self.val
    }

    /// Weight this entry contributes to the cache's total size.
    pub fn size(&self) -> i64 {
        self.size
    }

    /// When the entry was inserted or last returned by `get`.
    pub fn touched_at(&self) -> Instant {
        self.touched_at
    }

    pub(crate) fn into_pair(self) -> (K, V) {
        (self.key, self.val)
    }
}
