//! Response DTOs for the cache server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

/// Response body for `/get`
///
/// A missing or expired key is a normal answer with `found: false`.
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The requested key
    pub key: String,
    /// The stored value, null when not found
    pub value: Option<String>,
    /// Whether the key was present
    pub found: bool,
}

impl GetResponse {
    /// Creates a new GetResponse from a lookup result
    pub fn new(key: impl Into<String>, value: Option<String>) -> Self {
        Self {
            key: key.into(),
            found: value.is_some(),
            value,
        }
    }
}

/// Response body for `/add` and `/add_with_ttl`
#[derive(Debug, Clone, Serialize)]
pub struct AddResponse {
    /// Success message
    pub message: String,
    /// The key that was stored
    pub key: String,
    /// TTL in seconds, omitted for entries without expiration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u64>,
}

impl AddResponse {
    /// Creates a new AddResponse
    pub fn new(key: impl Into<String>, ttl: Option<u64>) -> Self {
        let key = key.into();
        let message = match ttl {
            Some(ttl) => format!("Key '{}' added with a TTL of {}s", key, ttl),
            None => format!("Key '{}' added", key),
        };
        Self { message, key, ttl }
    }
}

/// Response body for `/remove`
#[derive(Debug, Clone, Serialize)]
pub struct RemoveResponse {
    /// Outcome message
    pub message: String,
    /// The key that was addressed
    pub key: String,
    /// Whether an entry was actually removed
    pub removed: bool,
}

impl RemoveResponse {
    /// Creates a new RemoveResponse
    pub fn new(key: impl Into<String>, removed: bool) -> Self {
        let key = key.into();
        let message = if removed {
            format!("Key '{}' removed", key)
        } else {
            format!("Key '{}' was not present", key)
        };
        Self {
            message,
            key,
            removed,
        }
    }
}

/// Response body for `/clear`
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub message: String,
}

impl ClearResponse {
    pub fn new() -> Self {
        Self {
            message: "Cache cleared".to_string(),
        }
    }
}

impl Default for ClearResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Response body for `/cap`
#[derive(Debug, Clone, Serialize)]
pub struct CapacityResponse {
    /// Fixed maximum number of entries
    pub capacity: usize,
}

/// One entry in the `/get_all` listing
#[derive(Debug, Clone, Serialize)]
pub struct EntryView {
    pub key: String,
    pub value: String,
    /// Seconds left before expiration, null for entries without TTL
    pub ttl_remaining: Option<u64>,
}

/// Response body for `/get_all`, most recently used first
#[derive(Debug, Clone, Serialize)]
pub struct EntriesResponse {
    pub count: usize,
    pub entries: Vec<EntryView>,
}

impl EntriesResponse {
    pub fn new(entries: Vec<EntryView>) -> Self {
        Self {
            count: entries.len(),
            entries,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
