//! Expiration Manager Module
//!
//! Tracks the one-shot TTL task scheduled for each key.
//!
//! Every TTL insertion owns exactly one task, tagged with the insertion's
//! generation. Superseding, removing, evicting or clearing a key aborts its
//! task; a task that fires deregisters itself and ends.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;

use tokio::task::JoinHandle;

#[derive(Debug)]
struct Scheduled {
    generation: u64,
    handle: JoinHandle<()>,
}

// == Expiration Manager ==
/// Registry of pending expiration tasks, at most one per key.
///
/// Dropping the manager aborts every task still pending.
#[derive(Debug)]
pub struct ExpirationManager<K> {
    scheduled: HashMap<K, Scheduled>,
}

impl<K> Default for ExpirationManager<K> {
    fn default() -> Self {
        Self {
            scheduled: HashMap::new(),
        }
    }
}

impl<K> ExpirationManager<K>
where
    K: Eq + Hash,
{
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Schedule ==
    /// Spawns `task` as the expiration of `generation` of `key`.
    ///
    /// Any task still pending for the key is aborted first. Must be called
    /// from within a tokio runtime.
    pub fn schedule<F>(&mut self, key: K, generation: u64, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(task);
        if let Some(previous) = self.scheduled.insert(key, Scheduled { generation, handle }) {
            previous.handle.abort();
        }
    }

    // == Cancel ==
    /// Aborts the pending task for a key. Returns false if none was pending.
    pub fn cancel<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.scheduled.remove(key) {
            Some(scheduled) => {
                scheduled.handle.abort();
                true
            }
            None => false,
        }
    }

    // == Complete ==
    /// Deregisters a task that has fired.
    ///
    /// Only the record for the same generation is dropped, so a stale task
    /// can never unregister the timer of a newer insertion.
    pub fn complete<Q>(&mut self, key: &Q, generation: u64) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.scheduled.get(key) {
            Some(scheduled) if scheduled.generation == generation => {
                self.scheduled.remove(key);
                true
            }
            _ => false,
        }
    }

    // == Cancel All ==
    /// Aborts every pending task and returns how many there were.
    pub fn cancel_all(&mut self) -> usize {
        let count = self.scheduled.len();
        for (_, scheduled) in self.scheduled.drain() {
            scheduled.handle.abort();
        }
        count
    }

    // == Is Scheduled ==
    pub fn is_scheduled<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.scheduled.contains_key(key)
    }

    // == Length ==
    /// Returns the number of pending tasks.
    pub fn len(&self) -> usize {
        self.scheduled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scheduled.is_empty()
    }
}

impl<K> Drop for ExpirationManager<K> {
    fn drop(&mut self) {
        for scheduled in self.scheduled.values() {
            scheduled.handle.abort();
        }
    }
}
