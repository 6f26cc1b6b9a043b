//! Recency Ring Module
//!
//! Circular doubly-linked list of entries stored in an arena and linked
//! by slot index. The head is the most recently used entry; the tail is
//! always `head.prev`.

use std::time::Instant;

use crate::cache::Value;

/// Index of a node slot in the arena.
pub(crate) type NodeId = usize;

// == Node ==
#[derive(Debug)]
struct Node<K, V> {
    /// `None` while the slot sits on the free list
    entry: Option<Value<K, V>>,
    prev: NodeId,
    next: NodeId,
}

// == Ring ==
/// Arena-backed recency ring with a free-slot list.
#[derive(Debug)]
pub(crate) struct Ring<K, V> {
    nodes: Vec<Node<K, V>>,
    free: Vec<NodeId>,
    head: Option<NodeId>,
}

impl<K, V> Ring<K, V> {
    pub(crate) fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            head: None,
        }
    }

    // == Node Lifecycle ==
    /// Stores `entry` in a recycled slot if one is free, otherwise in a new
    /// one. The returned node is detached.
    pub(crate) fn alloc(&mut self, entry: Value<K, V>) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                let node = &mut self.nodes[id];
                node.entry = Some(entry);
                node.prev = id;
                node.next = id;
                id
            }
            None => {
                let id = self.nodes.len();
                self.nodes.push(Node {
                    entry: Some(entry),
                    prev: id,
                    next: id,
                });
                id
            }
        }
    }

    /// Clears a detached node and returns its slot to the free list.
    pub(crate) fn release(&mut self, id: NodeId) -> Option<Value<K, V>> {
        let entry = self.nodes[id].entry.take()?;
        self.free.push(id);
        Some(entry)
    }

    // == Accessors ==
    pub(crate) fn head(&self) -> Option<NodeId> {
        self.head
    }

    pub(crate) fn tail(&self) -> Option<NodeId> {
        self.head.map(|head| self.nodes[head].prev)
    }

    pub(crate) fn entry(&self, id: NodeId) -> Option<&Value<K, V>> {
        self.nodes[id].entry.as_ref()
    }

    pub(crate) fn touch(&mut self, id: NodeId, now: Instant) {
        if let Some(entry) = self.nodes[id].entry.as_mut() {
            entry.touched_at = now;
        }
    }

    pub(crate) fn next(&self, id: NodeId) -> NodeId {
        self.nodes[id].next
    }

    #[cfg(test)]
    pub(crate) fn prev(&self, id: NodeId) -> NodeId {
        self.nodes[id].prev
    }

    #[cfg(test)]
    pub(crate) fn free_slots(&self) -> usize {
        self.free.len()
    }

    // == Linking ==
    /// Makes a detached node the new head.
    pub(crate) fn push_head(&mut self, id: NodeId) {
        match self.head {
            None => {
                self.nodes[id].prev = id;
                self.nodes[id].next = id;
            }
            Some(head) => {
                let tail = self.nodes[head].prev;
                self.nodes[id].next = head;
                self.nodes[id].prev = tail;
                self.nodes[head].prev = id;
                self.nodes[tail].next = id;
            }
        }
        self.head = Some(id);
    }

    /// Detaches a linked node, advancing the head past it if needed.
    pub(crate) fn unlink(&mut self, id: NodeId) {
        let (prev, next) = (self.nodes[id].prev, self.nodes[id].next);
        if self.head == Some(id) {
            self.head = if next == id { None } else { Some(next) };
        }
        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;
        self.nodes[id].prev = id;
        self.nodes[id].next = id;
    }

    /// Moves a linked node to the head.
    pub(crate) fn move_to_head(&mut self, id: NodeId) {
        if self.head != Some(id) {
            self.unlink(id);
            self.push_head(id);
        }
    }

    // == Iteration ==
    /// Walks from head to tail, visiting each node once.
    pub(crate) fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            ring: self,
            cursor: self.head,
        }
    }
}

// == Iterator ==
/// Iterator over live entries from most to least recently used.
#[derive(Debug)]
pub struct Iter<'a, K, V> {
    ring: &'a Ring<K, V>,
    cursor: Option<NodeId>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = &'a Value<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let next = self.ring.next(id);
        self.cursor = if Some(next) == self.ring.head {
            None
        } else {
            Some(next)
        };
        self.ring.entry(id)
    }
}
