//! LRU Cache Module
//!
//! Size- and age-bounded least-recently-used container.
//!
//! A `HashMap` indexes keys to arena slots of a circular recency ring.
//! Every call sweeps stale entries off the tail before doing its own work,
//! and `put` additionally evicts from the tail until the new entry fits.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::cache::ring::{Iter, NodeId, Ring};
use crate::cache::{Clock, EvictionListener, NoListener, SystemClock, Value};

// == Lru ==
/// Least recently used container bounded by total size, time since last
/// touch, or both.
///
/// Not synchronized. Wrap it in a lock to share it between threads.
pub struct Lru<K, V, L = NoListener, C = SystemClock> {
    /// Key -> ring slot
    index: HashMap<K, NodeId>,
    /// Recency order, head is most recently used
    ring: Ring<K, V>,
    /// Sum of live entry sizes
    size: i64,
    max_size: i64,
    /// Zero disables the age sweep
    max_age: Duration,
    listener: L,
    clock: C,
}

impl<K, V> Lru<K, V>
where
    K: Hash + Eq + Clone,
{
    // == Constructor ==
    /// Creates an empty cache without an eviction listener.
    ///
    /// # Arguments
    /// * `max_size` - Ceiling for the sum of entry sizes
    /// * `max_age` - Longest an entry may go untouched; `Duration::ZERO`
    ///   turns the age sweep off
    pub fn new(max_size: i64, max_age: Duration) -> Self {
        Self::with_listener(max_size, max_age, NoListener)
    }
}

impl<K, V, L> Lru<K, V, L>
where
    K: Hash + Eq + Clone,
    L: EvictionListener<K, V>,
{
    /// Creates an empty cache that reports every removed entry to `listener`.
    pub fn with_listener(max_size: i64, max_age: Duration, listener: L) -> Self {
        Self {
            index: HashMap::new(),
            ring: Ring::new(),
            size: 0,
            max_size,
            max_age,
            listener,
            clock: SystemClock,
        }
    }
}

impl<K, V, L, C> Lru<K, V, L, C>
where
    K: Hash + Eq + Clone,
    L: EvictionListener<K, V>,
    C: Clock,
{
    /// Replaces the time source. Meant to be chained onto a constructor.
    pub fn with_clock<C2: Clock>(self, clock: C2) -> Lru<K, V, L, C2> {
        Lru {
            index: self.index,
            ring: self.ring,
            size: self.size,
            max_size: self.max_size,
            max_age: self.max_age,
            listener: self.listener,
            clock,
        }
    }

    // == Put ==
    /// Inserts `val` under `key` with weight `size`.
    ///
    /// An existing entry for `key` is evicted first (the listener sees it).
    /// Then stale entries are swept and least recently used entries are
    /// evicted until the new one fits. The insert itself is never refused:
    /// an entry heavier than `max_size` empties the cache and stays.
    pub fn put(&mut self, key: K, val: V, size: i64) {
        if let Some(&id) = self.index.get(&key) {
            self.evict(id);
        }

        let now = self.sweep_by_time();
        self.sweep_by_size(size);

        let id = self.ring.alloc(Value::new(key.clone(), val, size, now));
        self.ring.push_head(id);
        self.index.insert(key, id);
        self.size += size;
    }

    // == Get ==
    /// Returns the entry for `key`, making it the most recently used and
    /// stamping its touch time.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&Value<K, V>>
    where
        K: std::borrow::Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = self.sweep_by_time();
        let id = *self.index.get(key)?;
        self.ring.move_to_head(id);
        self.ring.touch(id, now);
        self.ring.entry(id)
    }

    // == Peek ==
    /// Returns the entry for `key` without changing its recency or touch
    /// time. Still sweeps stale entries.
    pub fn peek<Q>(&mut self, key: &Q) -> Option<&Value<K, V>>
    where
        K: std::borrow::Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.sweep_by_time();
        let id = *self.index.get(key)?;
        self.ring.entry(id)
    }

    // == Delete ==
    /// Removes `key` and notifies the listener. Returns whether it was
    /// present.
    pub fn delete<Q>(&mut self, key: &Q) -> bool
    where
        K: std::borrow::Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.sweep_by_time();
        let Some(&id) = self.index.get(key) else {
            return false;
        };
        self.evict(id);
        true
    }

    /// Removes `key` without notifying the listener and hands the pair back.
    pub fn delete_no_callback<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: std::borrow::Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.sweep_by_time();
        let id = *self.index.get(key)?;
        self.detach(id).map(Value::into_pair)
    }

    // == Iteration ==
    /// Calls `visitor` for each entry from most to least recently used,
    /// stopping early when it returns `false`.
    pub fn iterate<F>(&self, mut visitor: F)
    where
        F: FnMut(&K, &V) -> bool,
    {
        for entry in self.ring.iter() {
            if !visitor(entry.key(), entry.val()) {
                break;
            }
        }
    }

    /// Iterates entries from most to least recently used.
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.ring.iter()
    }

    // == Sweeps ==
    /// Evicts every entry untouched for longer than `max_age` and returns
    /// the "now" used for the comparison.
    ///
    /// With a zero `max_age` nothing is evicted, but the clock is still
    /// read so inserts get a real touch time.
    pub fn sweep_by_time(&mut self) -> Instant {
        let now = self.clock.now();
        if self.max_age.is_zero() {
            return now;
        }

        let mut expired = 0usize;
        while let Some(tail) = self.ring.tail() {
            let stale = self
                .ring
                .entry(tail)
                .is_some_and(|e| now.saturating_duration_since(e.touched_at) > self.max_age);
            if !stale {
                break;
            }
            self.evict(tail);
            expired += 1;
        }

        if expired > 0 {
            debug!(expired, remaining = self.index.len(), "age sweep evicted entries");
        }
        now
    }

    /// Evicts from the tail until `incoming` more weight fits.
    fn sweep_by_size(&mut self, incoming: i64) {
        let mut evicted = 0usize;
        while let Some(tail) = self.ring.tail() {
            // a sum past i64::MAX never fits
            if self
                .size
                .checked_add(incoming)
                .is_some_and(|total| total <= self.max_size)
            {
                break;
            }
            self.evict(tail);
            evicted += 1;
        }

        if evicted > 0 {
            debug!(evicted, incoming, size = self.size, "size sweep evicted entries");
        }
    }

    // == Removal ==
    /// Unlinks a node, drops it from the index and recycles its slot.
    fn detach(&mut self, id: NodeId) -> Option<Value<K, V>> {
        self.ring.unlink(id);
        let entry = self.ring.release(id)?;
        self.index.remove(&entry.key);
        self.size -= entry.size;
        Some(entry)
    }

    /// Detaches a node, then hands its pair to the listener.
    fn evict(&mut self, id: NodeId) {
        if let Some(entry) = self.detach(id) {
            trace!(size = entry.size, "evicting entry");
            let (key, val) = entry.into_pair();
            self.listener.on_evict(key, val);
        }
    }
}

impl<K, V, L, C> Lru<K, V, L, C> {
    // == Size ==
    /// Sum of the sizes of all live entries.
    pub fn size(&self) -> i64 {
        self.size
    }

    // == Length ==
    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn max_size(&self) -> i64 {
        self.max_size
    }

    pub fn max_age(&self) -> Duration {
        self.max_age
    }
}

impl<K, V, L, C> fmt::Debug for Lru<K, V, L, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lru")
            .field("len", &self.index.len())
            .field("size", &self.size)
            .field("max_size", &self.max_size)
            .field("max_age", &self.max_age)
            .finish()
    }
}

#[cfg(test)]
impl<K, V, L, C> Lru<K, V, L, C>
where
    K: Hash + Eq,
{
    /// Panics unless index, ring and running size agree.
    pub(crate) fn assert_consistent(&self) {
        use std::collections::HashSet;

        let mut visited = HashSet::new();
        let mut total = 0i64;
        if let Some(head) = self.ring.head() {
            let mut id = head;
            loop {
                assert!(visited.insert(id), "node {id} visited twice");
                assert!(visited.len() <= self.index.len(), "ring longer than index");
                let entry = self.ring.entry(id).expect("live node without entry");
                assert_eq!(self.index.get(&entry.key), Some(&id));
                assert_eq!(self.ring.prev(self.ring.next(id)), id);
                total += entry.size;
                id = self.ring.next(id);
                if id == head {
                    break;
                }
            }
        }
        assert_eq!(visited.len(), self.index.len(), "index and ring disagree");
        assert_eq!(total, self.size, "running size drifted");
    }

    pub(crate) fn free_slots(&self) -> usize {
        self.ring.free_slots()
    }
}
