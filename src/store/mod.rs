//! Key-Value Store Client Boundary
//!
//! Defines the primitive operations the cache layer requires from the shared
//! store: plain reads and writes with TTL, conditional create, atomic
//! increment, pattern scan, and the compare-and-delete used for lock release.
//! Production deployments plug in a networked client; [`MemoryStore`] is the
//! in-process engine used by the service binary and the test suite.

mod entry;
mod memory;
mod pattern;

pub use entry::StoredEntry;
pub use memory::MemoryStore;
pub use pattern::glob_match;

use async_trait::async_trait;
use thiserror::Error;

// == Store Error ==
/// Failures at the store boundary.
///
/// These never cross the cache access layer; every entry point there maps
/// them to a neutral result and a log record.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Store unreachable, timed out, or refused the request
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Stored value has the wrong shape for the operation (e.g. INCR on text)
    #[error("corrupt value at key '{key}': {reason}")]
    CorruptValue { key: String, reason: String },
}

/// Convenience Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

// == TTL Probe Convention ==
/// `ttl` result when the key does not exist.
pub const TTL_KEY_ABSENT: i64 = -2;
/// `ttl` result when the key exists but carries no expiration.
pub const TTL_NO_EXPIRY: i64 = -1;

// == Key-Value Store Trait ==
/// The primitive set the cache and lock layers are built on.
///
/// Single-key operations must be linearizable per key; `set_nx`, `incr_by`
/// and `compare_and_delete` must each execute as one indivisible operation
/// at the store. `scan` is expected to enumerate in bounded batches rather
/// than one unbounded call.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Writes a value, replacing any previous one. `ttl_seconds = None`
    /// stores without expiration.
    async fn set(&self, key: &str, value: &str, ttl_seconds: Option<u64>) -> StoreResult<()>;

    /// Conditional create: writes only if the key is currently absent,
    /// attaching the TTL in the same operation. Returns whether the write
    /// happened.
    async fn set_nx(&self, key: &str, value: &str, ttl_seconds: u64) -> StoreResult<bool>;

    /// Reads the raw stored text, or None when absent/expired.
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Removes a key. Returns whether it was present.
    async fn del(&self, key: &str) -> StoreResult<bool>;

    /// Removes a batch of keys in one call. Returns how many were present.
    async fn del_many(&self, keys: &[String]) -> StoreResult<u64>;

    /// Existence probe.
    async fn exists(&self, key: &str) -> StoreResult<bool>;

    /// Resets the TTL of an existing key. Returns false when the key is
    /// absent.
    async fn expire(&self, key: &str, ttl_seconds: u64) -> StoreResult<bool>;

    /// Remaining TTL in seconds: [`TTL_KEY_ABSENT`] when the key does not
    /// exist, [`TTL_NO_EXPIRY`] when it exists without expiration.
    async fn ttl(&self, key: &str) -> StoreResult<i64>;

    /// Atomic add against an integer-shaped value, creating the key at zero
    /// first when absent. Returns the post-increment value.
    async fn incr_by(&self, key: &str, delta: i64) -> StoreResult<i64>;

    /// Enumerates keys matching a glob pattern (`*` and `?`), walking the
    /// key space in batches of at most `batch_hint`.
    async fn scan(&self, pattern: &str, batch_hint: usize) -> StoreResult<Vec<String>>;

    /// Atomic compare-and-delete: removes the key only if its current value
    /// equals `expected`, reporting whether the delete happened. Backed by a
    /// server-side script on networked stores.
    async fn compare_and_delete(&self, key: &str, expected: &str) -> StoreResult<bool>;
}
