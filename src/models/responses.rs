//! Response DTOs for the cache service API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;

/// Response body for the GET operation (GET /cache/:key)
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The requested key
    pub key: String,
    /// The cached value
    pub value: serde_json::Value,
}

impl GetResponse {
    /// Creates a new GetResponse
    pub fn new(key: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Response body for the SET operation (PUT /cache)
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    /// Success message
    pub message: String,
    /// The key that was set
    pub key: String,
}

impl SetResponse {
    /// Creates a new SetResponse
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' set successfully", key),
            key,
        }
    }
}

/// Response body for the DELETE operation (DELETE /cache/:key)
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    /// The key that was deleted
    pub key: String,
}

impl DeleteResponse {
    /// Creates a new DeleteResponse
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' deleted", key),
            key,
        }
    }
}

/// Response body for bulk invalidation (DELETE /cache?pattern=)
#[derive(Debug, Clone, Serialize)]
pub struct PatternDeleteResponse {
    /// The glob pattern that was invalidated
    pub pattern: String,
    /// Keys removed at scan time; concurrent writes may survive
    pub removed: u64,
}

/// Response body for the TTL probe (GET /cache/:key/ttl)
#[derive(Debug, Clone, Serialize)]
pub struct TtlResponse {
    /// The probed key
    pub key: String,
    /// Remaining TTL in seconds; -1 no expiry or unknown, -2 absent
    pub ttl: i64,
}

/// Response body for the counter operation (POST /cache/:key/incr)
#[derive(Debug, Clone, Serialize)]
pub struct IncrResponse {
    /// The counter key
    pub key: String,
    /// Post-increment value as reported by the store
    pub value: i64,
}

/// Response body for a TTL reset (POST /cache/:key/expire)
#[derive(Debug, Clone, Serialize)]
pub struct ExpireResponse {
    /// The key whose TTL was reset
    pub key: String,
    /// False when the key was absent or the cache degraded
    pub applied: bool,
}

/// Response body for lock acquisition (POST /locks/:name)
#[derive(Debug, Clone, Serialize)]
pub struct LockResponse {
    /// Lock name
    pub name: String,
    /// Owner token to present at release time
    pub token: String,
    /// Lease TTL in seconds
    pub ttl: u64,
}

/// Response body for lock release (DELETE /locks/:name)
#[derive(Debug, Clone, Serialize)]
pub struct ReleaseResponse {
    /// Lock name
    pub name: String,
    /// Whether the compare-and-delete succeeded
    pub released: bool,
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// The snapshot over the requested pattern
    #[serde(flatten)]
    pub stats: CacheStats,
    /// Share of enumerated keys still live
    pub active_ratio: f64,
    /// Snapshot timestamp in ISO 8601 format
    pub generated_at: String,
}

impl StatsResponse {
    /// Creates a new StatsResponse from a snapshot
    pub fn new(stats: CacheStats) -> Self {
        let active_ratio = stats.active_ratio();
        Self {
            stats,
            active_ratio,
            generated_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
