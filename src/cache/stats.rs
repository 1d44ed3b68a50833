//! Cache Usage Statistics
//!
//! Point-in-time snapshot over the keys matching a pattern. Built from an
//! enumeration followed by per-key TTL probes, so it is not transactionally
//! consistent with concurrent writers. Diagnostic output only.

use serde::Serialize;

// == Cache Stats ==
/// Best-effort snapshot of key space usage for one pattern.
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    /// The glob pattern the snapshot covers
    pub pattern: String,
    /// Keys enumerated at scan time
    pub total_keys: u64,
    /// Keys still live when probed
    pub active_keys: u64,
    /// Keys expired but not yet reaped (or gone between scan and probe)
    pub expired_keys: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates an empty snapshot for a pattern.
    pub fn empty(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            total_keys: 0,
            active_keys: 0,
            expired_keys: 0,
        }
    }

    // == Record Probe ==
    /// Folds one per-key TTL probe into the snapshot. The store convention
    /// applies: `-2` means the key is gone or expired-unreaped, anything
    /// else (no TTL, unknown, or seconds remaining) counts as active.
    pub fn record_probe(&mut self, ttl: i64) {
        self.total_keys += 1;
        if ttl == crate::store::TTL_KEY_ABSENT {
            self.expired_keys += 1;
        } else {
            self.active_keys += 1;
        }
    }

    // == Active Ratio ==
    /// Share of enumerated keys that were still live, or 0.0 for an empty
    /// snapshot.
    pub fn active_ratio(&self) -> f64 {
        if self.total_keys == 0 {
            0.0
        } else {
            self.active_keys as f64 / self.total_keys as f64
        }
    }
}
