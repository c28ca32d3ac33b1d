//! Cache Module
//!
//! Provides in-memory caching with LRU eviction and per-entry TTL expiration.

mod engine;
mod entry;
mod expiry;
mod lru;
mod store;


// Re-export public types
pub use engine::{CacheEngine, CacheKey, CacheValue, EntrySnapshot};
pub use entry::CacheEntry;
pub use expiry::ExpirationManager;
pub use lru::{LruTracker, NodeId};
pub use store::{CacheStore, Insertion};
