//! LRU Cache Server - An in-memory cache server
//!
//! Fixed-capacity key/value cache with least-recently-used eviction and
//! per-entry TTL expiration, served over HTTP.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use api::{create_router, AppState};
pub use cache::CacheEngine;
pub use config::Config;
