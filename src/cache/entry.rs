//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Creation timestamp (Unix milliseconds), reset on every insert
    pub created_at: u64,
    /// Time to live, None = no expiration
    pub ttl: Option<Duration>,
    /// Identity of the insertion that produced this entry
    pub generation: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry with optional TTL.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `ttl` - Optional time to live
    /// * `generation` - Insertion identity assigned by the store
    pub fn new(value: V, ttl: Option<Duration>, generation: u64) -> Self {
        Self {
            value,
            created_at: current_timestamp_ms(),
            ttl,
            generation,
        }
    }

    // == Expires At ==
    /// Expiration timestamp (Unix milliseconds), or None if no TTL is set.
    pub fn expires_at(&self) -> Option<u64> {
        self.ttl.map(|ttl| {
            let ttl_ms = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX);
            self.created_at.saturating_add(ttl_ms)
        })
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: An entry is considered expired when the current time
    /// is greater than or equal to the expiration time.
    pub fn is_expired(&self) -> bool {
        match self.expires_at() {
            Some(expires) => current_timestamp_ms() >= expires,
            None => false,
        }
    }

    // == Time To Live ==
    /// Returns remaining TTL in milliseconds, or None if no expiration is set.
    ///
    /// # Returns
    /// - `Some(0)` if the entry has expired (TTL elapsed)
    /// - `Some(remaining_ms)` if the entry has TTL and hasn't expired
    /// - `None` if the entry has no TTL (never expires)
    pub fn ttl_remaining_ms(&self) -> Option<u64> {
        self.expires_at()
            .map(|expires| expires.saturating_sub(current_timestamp_ms()))
    }

    /// Returns remaining TTL in whole seconds, or None if no expiration is set.
    pub fn ttl_remaining(&self) -> Option<u64> {
        self.ttl_remaining_ms().map(|ms| ms / 1000)
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}
