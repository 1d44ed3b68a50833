//! Stored Entry Module
//!
//! Defines the record the in-memory store keeps per key, with TTL support.

use std::time::{SystemTime, UNIX_EPOCH};

// == Stored Entry ==
/// A single stored value with its expiration metadata.
#[derive(Debug, Clone)]
pub struct StoredEntry {
    /// The stored value, always a textual encoding
    pub value: String,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Expiration timestamp (Unix milliseconds), None = no expiration
    pub expires_at: Option<u64>,
}

impl StoredEntry {
    // == Constructor ==
    /// Creates a new entry with an optional TTL in seconds.
    ///
    /// The deadline saturates instead of overflowing, so an absurdly large
    /// TTL behaves as "effectively never expires" rather than wrapping into
    /// a deadline in the past.
    pub fn new(value: String, ttl_seconds: Option<u64>) -> Self {
        let now = current_timestamp_ms();
        let expires_at = ttl_seconds.map(|ttl| deadline_ms(now, ttl));

        Self {
            value,
            created_at: now,
            expires_at,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired when the current time is greater than or equal to
    /// its expiration time. Entries without a TTL never expire.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires) => current_timestamp_ms() >= expires,
            None => false,
        }
    }

    // == Remaining TTL ==
    /// Returns the remaining TTL using the store's probe convention:
    /// `-1` when no expiration is set, otherwise whole seconds remaining
    /// (clamped at 0 once elapsed).
    pub fn ttl_remaining_secs(&self) -> i64 {
        match self.expires_at {
            None => -1,
            Some(expires) => {
                let now = current_timestamp_ms();
                if expires > now {
                    ((expires - now) / 1000) as i64
                } else {
                    0
                }
            }
        }
    }

    // == Reset TTL ==
    /// Replaces the expiration deadline, keeping the value and creation time.
    pub fn reset_ttl(&mut self, ttl_seconds: u64) {
        self.expires_at = Some(deadline_ms(current_timestamp_ms(), ttl_seconds));
    }
}

/// Expiration deadline in Unix milliseconds, saturating on overflow.
fn deadline_ms(now_ms: u64, ttl_seconds: u64) -> u64 {
    now_ms.saturating_add(ttl_seconds.saturating_mul(1000))
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}
