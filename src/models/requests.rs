//! Request DTOs for the cache server API
//!
//! Query-string parameters of each endpoint. Every field is optional at the
//! decoding stage so that a missing parameter is reported with its name.

use std::time::Duration;

use serde::Deserialize;

use crate::error::{CacheError, Result};

// == Input Limits ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum allowed value size in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB

/// Query for endpoints addressing a single key (`/get`, `/remove`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KeyQuery {
    pub key: Option<String>,
}

impl KeyQuery {
    /// Returns the validated key.
    pub fn into_key(self) -> Result<String> {
        validate_key(self.key)
    }
}

/// Query for `/add`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddQuery {
    pub key: Option<String>,
    pub value: Option<String>,
}

impl AddQuery {
    /// Returns the validated key and value.
    pub fn into_parts(self) -> Result<(String, String)> {
        let key = validate_key(self.key)?;
        let value = validate_value(self.value)?;
        Ok((key, value))
    }
}

/// Query for `/add_with_ttl`
///
/// # Fields
/// - `key`: The cache key to store the value under
/// - `value`: The value to store
/// - `duration`: TTL in whole seconds; `0` expires the entry immediately
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddWithTtlQuery {
    pub key: Option<String>,
    pub value: Option<String>,
    pub duration: Option<String>,
}

impl AddWithTtlQuery {
    /// Returns the validated key, value and TTL.
    pub fn into_parts(self) -> Result<(String, String, Duration)> {
        let key = validate_key(self.key)?;
        let value = validate_value(self.value)?;
        let ttl = parse_duration(self.duration)?;
        Ok((key, value, ttl))
    }
}

fn validate_key(key: Option<String>) -> Result<String> {
    let key = key
        .filter(|k| !k.is_empty())
        .ok_or(CacheError::MissingParameter("key"))?;
    if key.len() > MAX_KEY_LENGTH {
        return Err(CacheError::InvalidRequest(format!(
            "Key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        )));
    }
    Ok(key)
}

fn validate_value(value: Option<String>) -> Result<String> {
    let value = value
        .filter(|v| !v.is_empty())
        .ok_or(CacheError::MissingParameter("value"))?;
    if value.len() > MAX_VALUE_SIZE {
        return Err(CacheError::InvalidRequest(format!(
            "Value exceeds maximum size of {} bytes",
            MAX_VALUE_SIZE
        )));
    }
    Ok(value)
}

fn parse_duration(duration: Option<String>) -> Result<Duration> {
    let raw = duration
        .filter(|d| !d.is_empty())
        .ok_or(CacheError::MissingParameter("duration"))?;
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| CacheError::InvalidDuration(raw))
}
