//! API Routes
//!
//! Configures the Axum router with all cache server endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    add_handler, add_with_ttl_handler, capacity_handler, clear_handler, get_all_handler,
    get_handler, health_handler, remove_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `/add?key=&value=` - Store a key-value pair
/// - `/add_with_ttl?key=&value=&duration=` - Store a pair expiring after `duration` seconds
/// - `/get?key=` - Look a key up
/// - `/remove?key=` - Remove a key
/// - `/clear` - Empty the cache
/// - `/cap` - Report the fixed capacity
/// - `/get_all` - List live entries (diagnostics)
/// - `/health` - Health check endpoint
///
/// Mutating endpoints answer both GET and POST; the others GET only.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs method and URI of every request
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/add", get(add_handler).post(add_handler))
        .route(
            "/add_with_ttl",
            get(add_with_ttl_handler).post(add_with_ttl_handler),
        )
        .route("/get", get(get_handler))
        .route("/remove", get(remove_handler).post(remove_handler))
        .route("/clear", get(clear_handler).post(clear_handler))
        .route("/cap", get(capacity_handler))
        .route("/get_all", get(get_all_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
