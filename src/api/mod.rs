//! API Module
//!
//! HTTP handlers and routing for the cache server.
//!
//! # Endpoints
//! - `/add` - Store a key-value pair
//! - `/add_with_ttl` - Store a key-value pair with a TTL in seconds
//! - `/get` - Look a value up by key
//! - `/remove` - Remove a key
//! - `/clear` - Empty the cache
//! - `/cap` - Cache capacity
//! - `/get_all` - Diagnostic listing of live entries
//! - `/health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
