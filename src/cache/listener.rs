//! Eviction Listener Module
//!
//! Hook invoked whenever an entry leaves the cache.

// == Eviction Listener ==
/// Receives entries removed by a capacity sweep, an age sweep, an
/// explicit `delete`, or displacement by `put` of an existing key.
///
/// Runs synchronously inside the triggering call. The entry is already
/// detached when the listener runs, so a panic here leaves the cache
/// consistent.
pub trait EvictionListener<K, V> {
    fn on_evict(&mut self, key: K, val: V);
}

impl<K, V, F> EvictionListener<K, V> for F
where
    F: FnMut(K, V),
{
    fn on_evict(&mut self, key: K, val: V) {
        self(key, val)
    }
}

// == No Listener ==
/// Listener used when the caller does not want notifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoListener;

impl<K, V> EvictionListener<K, V> for NoListener {
    fn on_evict(&mut self, _key: K, _val: V) {}
}
