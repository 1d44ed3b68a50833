//! Cache Manager
//!
//! The terminal error boundary in front of the key-value store. Every
//! operation that touches the store runs through one internal guard that
//! catches the store error, logs it, and returns the operation's neutral
//! value. Callers cannot distinguish a miss from a degraded cache, by design:
//! in both cases the contract is "fall through to the source of truth".

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error};

use crate::cache::decode::decode;
use crate::cache::{CacheStats, DEFAULT_SCAN_BATCH};
use crate::keys::{Namespace, WARM_UP_TTL};
use crate::store::{KvStore, StoreResult};

// == Cache Manager ==
/// Stateless, thread-safe facade over the shared store. Holds no in-process
/// coordination state; cloning is cheap and clones share the same store.
#[derive(Clone)]
pub struct CacheManager {
    /// The injected store client
    store: Arc<dyn KvStore>,
    /// Batch size for pattern scans
    scan_batch: usize,
}

impl CacheManager {
    // == Constructor ==
    /// Creates a manager over an injected store client.
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self {
            store,
            scan_batch: DEFAULT_SCAN_BATCH,
        }
    }

    /// Overrides the scan batch size.
    pub fn with_scan_batch(mut self, scan_batch: usize) -> Self {
        self.scan_batch = scan_batch.max(1);
        self
    }

    // == Guard ==
    /// Runs one store call, degrading any failure to `fallback` plus an
    /// error-level log record. Single point enforcing the never-throw
    /// contract.
    async fn guarded<T>(
        &self,
        op: &'static str,
        key: &str,
        fallback: T,
        call: impl Future<Output = StoreResult<T>>,
    ) -> T {
        match call.await {
            Ok(value) => value,
            Err(err) => {
                error!(op, key, error = %err, "store call failed, degrading to neutral result");
                fallback
            }
        }
    }

    // == Set ==
    /// Writes a value with an explicit TTL. Best-effort: encoding or store
    /// failures are logged and swallowed.
    pub async fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T, ttl: Duration) {
        let payload = match serde_json::to_string(value) {
            Ok(payload) => payload,
            Err(err) => {
                error!(key, error = %err, "value not serializable, skipping cache write");
                return;
            }
        };
        let ttl_secs = ttl.as_secs();
        self.guarded("set", key, (), self.store.set(key, &payload, Some(ttl_secs)))
            .await;
    }

    // == Set In Namespace ==
    /// Builds the key from the namespace table, applies the category's
    /// policy TTL, and writes. Returns the fully-qualified key.
    pub async fn set_in<T: Serialize + ?Sized>(
        &self,
        ns: Namespace,
        parts: &[&str],
        value: &T,
    ) -> String {
        let key = ns.key(parts);
        self.set(&key, value, ns.ttl()).await;
        key
    }

    // == Get ==
    /// Reads and coerces a value. Returns None for a missing key, an
    /// expired key, a value that cannot be coerced to `T`, and a degraded
    /// store alike.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.get_raw(key).await?;
        let decoded = decode::<T>(&raw);
        if decoded.is_none() {
            debug!(key, "stored value not coercible to target type, treating as miss");
        }
        decoded
    }

    /// Reads the raw stored text without coercion.
    pub async fn get_raw(&self, key: &str) -> Option<String> {
        self.guarded("get", key, None, self.store.get(key)).await
    }

    // == Delete ==
    /// Removes a key. Idempotent; absent keys and store failures are both
    /// silent.
    pub async fn delete(&self, key: &str) {
        self.guarded("delete", key, false, self.store.del(key)).await;
    }

    // == Delete By Pattern ==
    /// Enumerates keys matching a glob pattern and removes them in one
    /// batch call. Not atomic with concurrent writers: a key created after
    /// the scan survives. Returns how many keys were removed.
    pub async fn delete_by_pattern(&self, pattern: &str) -> u64 {
        let keys = self
            .guarded(
                "scan",
                pattern,
                Vec::new(),
                self.store.scan(pattern, self.scan_batch),
            )
            .await;
        if keys.is_empty() {
            return 0;
        }
        let removed = self
            .guarded("delete_by_pattern", pattern, 0, self.store.del_many(&keys))
            .await;
        debug!(pattern, removed, "bulk invalidation");
        removed
    }

    // == Exists ==
    /// Existence probe; degraded store reads as false.
    pub async fn exists(&self, key: &str) -> bool {
        self.guarded("exists", key, false, self.store.exists(key)).await
    }

    // == Expire ==
    /// Resets the TTL of an existing key. Silently false when the key is
    /// absent or the store is degraded.
    pub async fn expire(&self, key: &str, ttl: Duration) -> bool {
        self.guarded("expire", key, false, self.store.expire(key, ttl.as_secs()))
            .await
    }

    // == Get Expire ==
    /// Remaining TTL in seconds. `-2` means the key does not exist, `-1`
    /// means no TTL attached or unknown (a degraded store maps here).
    pub async fn get_expire(&self, key: &str) -> i64 {
        self.guarded("ttl", key, crate::store::TTL_NO_EXPIRY, self.store.ttl(key))
            .await
    }

    // == Increment ==
    /// Atomic add against a counter key, returning the store's canonical
    /// post-increment value. Failure returns 0, deliberately ambiguous with
    /// a counter that just reached 0; callers must not distinguish.
    pub async fn increment(&self, key: &str, delta: i64) -> i64 {
        self.guarded("incr", key, 0, self.store.incr_by(key, delta)).await
    }

    // == Warm Up ==
    /// Pre-populates a key with the fixed hot-data TTL.
    pub async fn warm_up<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        self.set(key, value, WARM_UP_TTL).await;
    }

    // == Stats ==
    /// Scans the pattern, then probes each key's TTL to classify it. O(n)
    /// in matching keys and explicitly non-atomic: a diagnostic snapshot,
    /// never a basis for correctness decisions.
    pub async fn stats(&self, pattern: &str) -> CacheStats {
        let keys = self
            .guarded(
                "scan",
                pattern,
                Vec::new(),
                self.store.scan(pattern, self.scan_batch),
            )
            .await;

        let mut stats = CacheStats::empty(pattern);
        for key in &keys {
            let ttl = self.get_expire(key).await;
            stats.record_probe(ttl);
        }
        stats
    }
}
