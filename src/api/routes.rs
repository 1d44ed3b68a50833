//! API Routes
//!
//! Configures the Axum router with all cache service endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    acquire_lock_handler, delete_handler, expire_handler, get_handler, health_handler,
    incr_handler, pattern_delete_handler, release_lock_handler, set_handler, stats_handler,
    ttl_handler, warmup_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `PUT /cache` - Store a key-value pair
/// - `GET /cache/:key` - Retrieve a cached value
/// - `DELETE /cache/:key` - Delete a key
/// - `DELETE /cache?pattern=` - Bulk invalidation by glob pattern
/// - `GET /cache/:key/ttl` - Remaining TTL probe
/// - `POST /cache/:key/expire` - Reset a key's TTL
/// - `POST /cache/:key/incr` - Atomic counter add
/// - `POST /warmup` - Pre-populate hot data
/// - `POST /locks/:name` - Acquire a distributed lock
/// - `DELETE /locks/:name` - Release a distributed lock
/// - `GET /stats?pattern=` - Key space snapshot
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router with all endpoints
    Router::new()
        .route("/cache", put(set_handler).delete(pattern_delete_handler))
        .route("/cache/:key", get(get_handler).delete(delete_handler))
        .route("/cache/:key/ttl", get(ttl_handler))
        .route("/cache/:key/expire", post(expire_handler))
        .route("/cache/:key/incr", post(incr_handler))
        .route("/warmup", post(warmup_handler))
        .route(
            "/locks/:name",
            post(acquire_lock_handler).delete(release_lock_handler),
        )
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
