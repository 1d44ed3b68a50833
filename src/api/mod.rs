//! API Module
//!
//! HTTP surface over the cache and lock managers.

mod handlers;
mod routes;

pub use handlers::AppState;
pub use routes::create_router;
