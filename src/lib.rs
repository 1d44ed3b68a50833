//! Cachelock - unified cache and distributed lock manager
//!
//! Fail-soft cache access over a shared key-value store, plus lease-based
//! distributed locks built on the same primitives. Cache unavailability never
//! breaks the caller: every degraded operation collapses to a neutral result.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod keys;
pub mod lock;
pub mod models;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use cache::{CacheManager, CacheStats};
pub use config::Config;
pub use keys::{build_key, Namespace};
pub use lock::LockManager;
pub use store::{KvStore, MemoryStore};
pub use tasks::spawn_reaper_task;
