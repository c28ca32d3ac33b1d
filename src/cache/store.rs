//! Cache Store Module
//!
//! Ordered key/value storage: a HashMap of slots, each holding a handle into
//! the LRU list, with capacity enforced on every insert.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;

use crate::cache::lru::NodeId;
use crate::cache::{CacheEntry, LruTracker};

#[derive(Debug)]
struct Slot<V> {
    entry: CacheEntry<V>,
    node: NodeId,
}

// == Insertion ==
/// Outcome of [`CacheStore::insert`].
#[derive(Debug)]
pub struct Insertion<K, V> {
    /// Generation assigned to the inserted entry
    pub generation: u64,
    /// Entry discarded to stay within capacity, if any
    pub evicted: Option<(K, CacheEntry<V>)>,
}

// == Cache Store ==
/// Fixed-capacity storage with LRU eviction.
///
/// Recency is refreshed by inserts only; lookups leave the order untouched.
#[derive(Debug)]
pub struct CacheStore<K, V> {
    /// Key to entry and list position
    entries: HashMap<K, Slot<V>>,
    /// LRU access tracker
    lru: LruTracker<K>,
    /// Maximum number of entries allowed
    capacity: usize,
    /// Last generation handed out
    generation: u64,
}

impl<K, V> CacheStore<K, V>
where
    K: Eq + Hash + Clone,
{
    // == Constructor ==
    /// Creates a new CacheStore holding at most `capacity` entries.
    ///
    /// A capacity of zero is valid: every insert is evicted immediately.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            capacity,
            generation: 0,
        }
    }

    // == Insert ==
    /// Stores a key-value pair with optional TTL.
    ///
    /// An existing key gets the new value, a fresh timestamp and generation,
    /// and moves to the most recently used position; occupancy is unchanged
    /// and nothing is evicted. A new key is placed at the most recently used
    /// position, after which at most one least recently used entry is evicted
    /// if the store went over capacity.
    pub fn insert(&mut self, key: K, value: V, ttl: Option<Duration>) -> Insertion<K, V> {
        self.generation += 1;
        let generation = self.generation;
        let entry = CacheEntry::new(value, ttl, generation);

        if let Some(slot) = self.entries.get_mut(&key) {
            slot.entry = entry;
            self.lru.touch(slot.node);
            return Insertion {
                generation,
                evicted: None,
            };
        }

        let node = self.lru.push_front(key.clone());
        self.entries.insert(key, Slot { entry, node });

        let evicted = if self.entries.len() > self.capacity {
            self.evict_oldest()
        } else {
            None
        };

        debug_assert_eq!(self.entries.len(), self.lru.len());
        debug_assert!(self.entries.len() <= self.capacity);

        Insertion {
            generation,
            evicted,
        }
    }

    // == Get ==
    /// Looks up an entry without touching recency.
    ///
    /// Expired entries are still returned; callers decide how to treat them.
    pub fn get<Q>(&self, key: &Q) -> Option<&CacheEntry<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key).map(|slot| &slot.entry)
    }

    // == Contains Key ==
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains_key(key)
    }

    // == Remove ==
    /// Removes an entry by key, returning it if it was present.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<CacheEntry<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = self.entries.remove(key)?;
        let removed = self.lru.remove(slot.node);
        debug_assert!(removed.is_some(), "mapped key without LRU node");
        Some(slot.entry)
    }

    // == Remove If Generation ==
    /// Removes the entry only if it still belongs to the given insertion.
    pub fn remove_if_generation<Q>(&mut self, key: &Q, generation: u64) -> Option<CacheEntry<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.entries.get(key) {
            Some(slot) if slot.entry.generation == generation => self.remove(key),
            _ => None,
        }
    }

    // == Clear ==
    /// Removes all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.lru.clear();
    }

    // == Iter ==
    /// Iterates entries from most to least recently used.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &CacheEntry<V>)> + '_ {
        self.lru
            .iter()
            .filter_map(move |key| self.entries.get(key).map(|slot| (key, &slot.entry)))
    }

    // == Peek Oldest ==
    /// Returns the key that the next eviction would discard.
    pub fn peek_oldest(&self) -> Option<&K> {
        self.lru.peek_oldest()
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Capacity ==
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn evict_oldest(&mut self) -> Option<(K, CacheEntry<V>)> {
        let key = self.lru.evict_oldest()?;
        match self.entries.remove(&key) {
            Some(slot) => Some((key, slot.entry)),
            None => unreachable!("LRU node without mapped key"),
        }
    }

    /// Panics unless map and list describe the same set of keys.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        assert_eq!(self.entries.len(), self.lru.len(), "map/list size mismatch");
        assert!(self.entries.len() <= self.capacity, "over capacity");

        let mut listed = 0;
        for key in self.lru.iter() {
            assert!(self.entries.contains_key(key), "list node without mapping");
            listed += 1;
        }
        assert_eq!(listed, self.entries.len(), "list length mismatch");
    }
}
