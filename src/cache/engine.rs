//! Cache Engine Module
//!
//! Thread-safe cache handle: the store and its expiration timers behind a
//! single read/write lock.
//!
//! Reads (`get`, `len`, `entries`) share the lock. Inserts, removals,
//! `clear` and firing expirations take it exclusively, so each insert and
//! its eviction happen as one transaction.

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::store::Insertion;
use crate::cache::{CacheStore, ExpirationManager};

// == Key / Value Bounds ==
/// Key type accepted by [`CacheEngine`]. Implemented for every type that
/// qualifies.
pub trait CacheKey: Eq + Hash + Clone + fmt::Debug + Send + Sync + 'static {}

impl<T> CacheKey for T where T: Eq + Hash + Clone + fmt::Debug + Send + Sync + 'static {}

/// Value type accepted by [`CacheEngine`]. Values are handed out by clone.
pub trait CacheValue: Clone + Send + Sync + 'static {}

impl<T> CacheValue for T where T: Clone + Send + Sync + 'static {}

// == Entry Snapshot ==
/// Copy of a live entry, as returned by [`CacheEngine::entries`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrySnapshot<K, V> {
    pub key: K,
    pub value: V,
    /// Time left before expiration, None if the entry has no TTL
    pub ttl_remaining: Option<Duration>,
}

// == Cache State ==
/// Everything guarded by the engine lock.
struct CacheState<K, V> {
    store: CacheStore<K, V>,
    expirations: ExpirationManager<K>,
}

impl<K: CacheKey, V> CacheState<K, V> {
    fn insert(&mut self, key: K, value: V, ttl: Option<Duration>) -> Insertion<K, V> {
        if self.expirations.cancel(&key) {
            debug!(?key, "Pending expiration superseded");
        }

        let insertion = self.store.insert(key, value, ttl);
        if let Some((evicted, _)) = &insertion.evicted {
            self.expirations.cancel(evicted);
            debug!(key = ?evicted, "Evicted least recently used entry");
        }
        insertion
    }

    fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.expirations.cancel(key);
        self.store.remove(key).is_some()
    }

    fn clear(&mut self) -> usize {
        let removed = self.store.len();
        self.expirations.cancel_all();
        self.store.clear();
        removed
    }

    /// Runs the expiration of one insertion. Superseded insertions are left alone.
    fn expire(&mut self, key: &K, generation: u64) -> bool {
        self.expirations.complete(key, generation);
        self.store.remove_if_generation(key, generation).is_some()
    }
}

struct Shared<K, V> {
    state: RwLock<CacheState<K, V>>,
    capacity: usize,
}

// == Cache Engine ==
/// Fixed-capacity LRU cache with optional per-entry TTL.
///
/// Cloning yields another handle to the same cache. Expiration tasks only
/// hold weak references; once the last handle is dropped every pending
/// expiration is aborted.
///
/// Recency is refreshed by inserts only, reads never reorder entries.
/// Every method except [`insert_with_ttl`](Self::insert_with_ttl) works
/// without a runtime context beyond awaiting; that one spawns a tokio task.
pub struct CacheEngine<K, V> {
    shared: Arc<Shared<K, V>>,
}

impl<K, V> Clone for CacheEngine<K, V> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<K, V> fmt::Debug for CacheEngine<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheEngine")
            .field("capacity", &self.shared.capacity)
            .finish_non_exhaustive()
    }
}

impl<K: CacheKey, V: CacheValue> CacheEngine<K, V> {
    // == Constructor ==
    /// Creates an empty cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: RwLock::new(CacheState {
                    store: CacheStore::new(capacity),
                    expirations: ExpirationManager::new(),
                }),
                capacity,
            }),
        }
    }

    // == Insert ==
    /// Stores a value without expiration.
    ///
    /// Replaces any previous entry for the key, cancelling its pending
    /// expiration. May evict the least recently used entry.
    pub async fn insert(&self, key: K, value: V) {
        let mut state = self.shared.state.write().await;
        state.insert(key, value, None);
    }

    // == Insert With TTL ==
    /// Stores a value that expires once `ttl` has elapsed.
    ///
    /// A zero TTL expires immediately: the key's previous entry is removed
    /// and nothing is stored.
    pub async fn insert_with_ttl(&self, key: K, value: V, ttl: Duration) {
        let mut state = self.shared.state.write().await;

        if ttl.is_zero() {
            state.remove(&key);
            debug!(?key, "Zero TTL, entry expired on insert");
            return;
        }

        let generation = state.insert(key.clone(), value, Some(ttl)).generation;
        if !state.store.contains_key(&key) {
            // Zero capacity, the entry was evicted on arrival
            return;
        }

        let weak: Weak<Shared<K, V>> = Arc::downgrade(&self.shared);
        let task_key = key.clone();
        state.expirations.schedule(key, generation, async move {
            tokio::time::sleep(ttl).await;

            let Some(shared) = weak.upgrade() else {
                return;
            };
            let expired = shared.state.write().await.expire(&task_key, generation);
            if expired {
                debug!(key = ?task_key, "Entry expired");
            }
        });
    }

    // == Get ==
    /// Returns a clone of the value, or None if absent or expired.
    ///
    /// Does not refresh recency.
    pub async fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let state = self.shared.state.read().await;
        state
            .store
            .get(key)
            .filter(|entry| !entry.is_expired())
            .map(|entry| entry.value.clone())
    }

    // == Remove ==
    /// Removes a key and cancels its pending expiration.
    ///
    /// Returns whether an entry was present; removing an absent key is a no-op.
    pub async fn remove<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut state = self.shared.state.write().await;
        state.remove(key)
    }

    // == Clear ==
    /// Removes every entry and cancels every pending expiration.
    pub async fn clear(&self) {
        let removed = self.shared.state.write().await.clear();
        debug!(removed, "Cache cleared");
    }

    // == Capacity ==
    /// Returns the fixed capacity.
    pub fn capacity(&self) -> usize {
        self.shared.capacity
    }

    // == Length ==
    /// Returns the number of stored entries.
    pub async fn len(&self) -> usize {
        self.shared.state.read().await.store.len()
    }

    // == Is Empty ==
    pub async fn is_empty(&self) -> bool {
        self.shared.state.read().await.store.is_empty()
    }

    // == Entries ==
    /// Snapshot of live entries, most recently used first.
    pub async fn entries(&self) -> Vec<EntrySnapshot<K, V>> {
        let state = self.shared.state.read().await;
        state
            .store
            .iter()
            .filter(|(_, entry)| !entry.is_expired())
            .map(|(key, entry)| EntrySnapshot {
                key: key.clone(),
                value: entry.value.clone(),
                ttl_remaining: entry.ttl_remaining_ms().map(Duration::from_millis),
            })
            .collect()
    }

    // == Pending Expirations ==
    /// Returns the number of scheduled, not yet fired expirations.
    pub async fn pending_expirations(&self) -> usize {
        self.shared.state.read().await.expirations.len()
    }
}
