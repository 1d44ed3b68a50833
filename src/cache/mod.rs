//! Cache Access Layer
//!
//! Uniform, non-throwing access to the key-value store: typed get/set with
//! policy-driven TTLs, pattern-based invalidation, atomic counters, and
//! best-effort usage statistics. Store failures never reach the caller; the
//! cache degrades to transparently absent.

mod decode;
mod manager;
mod stats;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use manager::CacheManager;
pub use stats::CacheStats;

// == Public Constants ==
/// Default batch size for cursor-style key scans.
pub const DEFAULT_SCAN_BATCH: usize = 100;
