//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint. Inputs are
//! validated before the cache is touched.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};

use crate::cache::CacheEngine;
use crate::config::Config;
use crate::error::Result;
use crate::models::{
    AddQuery, AddResponse, AddWithTtlQuery, CapacityResponse, ClearResponse, EntriesResponse,
    EntryView, GetResponse, HealthResponse, KeyQuery, RemoveResponse,
};

/// Cache shared by all handlers: string keys, string values.
pub type SharedCache = CacheEngine<String, String>;

/// Application state shared across all handlers.
///
/// Holds a handle to the one cache engine built at startup.
#[derive(Clone, Debug)]
pub struct AppState {
    pub cache: SharedCache,
}

impl AppState {
    /// Creates a new AppState around an existing cache.
    pub fn new(cache: SharedCache) -> Self {
        Self { cache }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(CacheEngine::new(config.capacity))
    }
}

/// Handler for /add
///
/// Stores a key-value pair without expiration.
pub async fn add_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<AddQuery>, QueryRejection>,
) -> Result<Json<AddResponse>> {
    let Query(query) = query?;
    let (key, value) = query.into_parts()?;

    state.cache.insert(key.clone(), value).await;

    Ok(Json(AddResponse::new(key, None)))
}

/// Handler for /add_with_ttl
///
/// Stores a key-value pair that expires after `duration` seconds.
pub async fn add_with_ttl_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<AddWithTtlQuery>, QueryRejection>,
) -> Result<Json<AddResponse>> {
    let Query(query) = query?;
    let (key, value, ttl) = query.into_parts()?;

    state.cache.insert_with_ttl(key.clone(), value, ttl).await;

    Ok(Json(AddResponse::new(key, Some(ttl.as_secs()))))
}

/// Handler for /get
///
/// Looks a key up; absent or expired keys answer `found: false`.
pub async fn get_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<KeyQuery>, QueryRejection>,
) -> Result<Json<GetResponse>> {
    let Query(query) = query?;
    let key = query.into_key()?;

    let value = state.cache.get(key.as_str()).await;

    Ok(Json(GetResponse::new(key, value)))
}

/// Handler for /remove
///
/// Removing an absent key succeeds.
pub async fn remove_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<KeyQuery>, QueryRejection>,
) -> Result<Json<RemoveResponse>> {
    let Query(query) = query?;
    let key = query.into_key()?;

    let removed = state.cache.remove(key.as_str()).await;

    Ok(Json(RemoveResponse::new(key, removed)))
}

/// Handler for /clear
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    state.cache.clear().await;
    Json(ClearResponse::new())
}

/// Handler for /cap
pub async fn capacity_handler(State(state): State<AppState>) -> Json<CapacityResponse> {
    Json(CapacityResponse {
        capacity: state.cache.capacity(),
    })
}

/// Handler for /get_all
///
/// Diagnostic listing of live entries, most recently used first.
pub async fn get_all_handler(State(state): State<AppState>) -> Json<EntriesResponse> {
    let entries = state
        .cache
        .entries()
        .await
        .into_iter()
        .map(|entry| EntryView {
            key: entry.key,
            value: entry.value,
            ttl_remaining: entry.ttl_remaining.map(|ttl| ttl.as_secs()),
        })
        .collect();

    Json(EntriesResponse::new(entries))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
