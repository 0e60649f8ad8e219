//! Insertion-ordered, id-keyed record storage.
//!
//! Records are kept behind `Arc` so callers can hold on to what they were handed:
//! overwriting an id swaps in a new `Arc` and never touches the old value.
//!
//! Enumeration order follows a sequence index, the same shape as a time index over
//! a hash map: a `BTreeMap<seq, id>` beside the primary `HashMap<id, slot>`. Inserting
//! an existing id drops its old sequence number and takes a fresh one, so a surviving
//! entry sits where it was last inserted.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use std::sync::Arc;

#[derive(Debug)]
struct Slot<V> {
    seq: u64,
    value: Arc<V>,
}

/// Map from id to shared record, enumerated in insertion order.
#[derive(Debug)]
pub struct IdMap<K, V> {
    // Primary storage: id -> slot
    entries: HashMap<K, Slot<V>>,
    // Order index: seq -> id
    order: BTreeMap<u64, K>,
    next_seq: u64,
}

impl<K, V> Default for IdMap<K, V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            order: BTreeMap::new(),
            next_seq: 0,
        }
    }
}

impl<K, V> IdMap<K, V>
where
    K: Copy + Eq + Hash,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite. Returns the replaced record, if any.
    pub fn insert(&mut self, id: K, value: Arc<V>) -> Option<Arc<V>> {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.order.insert(seq, id);

        let previous = self.entries.insert(id, Slot { seq, value })?;
        self.order.remove(&previous.seq);
        Some(previous.value)
    }

    /// Remove by id. Returns the removed record, if any.
    pub fn remove(&mut self, id: &K) -> Option<Arc<V>> {
        let slot = self.entries.remove(id)?;
        self.order.remove(&slot.seq);
        Some(slot.value)
    }

    pub fn get(&self, id: &K) -> Option<&Arc<V>> {
        self.entries.get(id).map(|slot| &slot.value)
    }

    pub fn contains(&self, id: &K) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = K> + '_ {
        self.order.values().copied()
    }

    /// Records in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &Arc<V>> + '_ {
        self.order
            .values()
            .filter_map(move |id| self.entries.get(id).map(|slot| &slot.value))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}
