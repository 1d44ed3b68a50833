//! In-Memory Store Engine
//!
//! HashMap-backed implementation of [`KvStore`] with TTL bookkeeping. Expired
//! entries are treated as absent on every read path and physically removed by
//! the background reaper task (or an explicit [`MemoryStore::purge_expired`]).
//!
//! Atomicity of `set_nx`, `incr_by` and `compare_and_delete` follows from
//! holding the write guard across the whole operation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};

use tokio::sync::RwLock;

use crate::store::pattern::glob_match;
use crate::store::{KvStore, StoreError, StoreResult, StoredEntry, TTL_KEY_ABSENT};

// == Memory Store ==
/// In-process key-value engine used by the service binary and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// Key-value storage
    entries: RwLock<HashMap<String, StoredEntry>>,
    /// Pending injected failures, for exercising the fail-soft path
    failures: AtomicU32,
}

impl MemoryStore {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next `n` store operations fail with
    /// [`StoreError::Unavailable`]. Test support for the degradation
    /// contract of the layers above.
    pub fn fail_next(&self, n: u32) {
        self.failures.store(n, Ordering::SeqCst);
    }

    fn check_failure(&self) -> StoreResult<()> {
        // Single atomic decrement-while-positive; a load-then-sub pair could
        // let two concurrent callers consume the same pending failure and
        // wrap the counter
        let claimed = self
            .failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if claimed {
            return Err(StoreError::Unavailable("injected failure".to_string()));
        }
        Ok(())
    }

    // == Purge Expired ==
    /// Removes all expired entries, returning how many were reaped.
    pub async fn purge_expired(&self) -> usize {
        let mut entries = self.entries.write().await;
        let expired_keys: Vec<String> = entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();
        for key in expired_keys {
            entries.remove(&key);
        }
        count
    }

    // == Length ==
    /// Current number of entries, including expired-but-unreaped ones.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Returns true when the store holds no entries at all.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl KvStore for MemoryStore {
    async fn set(&self, key: &str, value: &str, ttl_seconds: Option<u64>) -> StoreResult<()> {
        self.check_failure()?;
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), StoredEntry::new(value.to_string(), ttl_seconds));
        Ok(())
    }

    async fn set_nx(&self, key: &str, value: &str, ttl_seconds: u64) -> StoreResult<bool> {
        self.check_failure()?;
        let mut entries = self.entries.write().await;
        // An expired leftover counts as absent
        if let Some(entry) = entries.get(key) {
            if !entry.is_expired() {
                return Ok(false);
            }
        }
        entries.insert(
            key.to_string(),
            StoredEntry::new(value.to_string(), Some(ttl_seconds)),
        );
        Ok(true)
    }

    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.check_failure()?;
        let entries = self.entries.read().await;
        Ok(entries
            .get(key)
            .filter(|entry| !entry.is_expired())
            .map(|entry| entry.value.clone()))
    }

    async fn del(&self, key: &str) -> StoreResult<bool> {
        self.check_failure()?;
        let mut entries = self.entries.write().await;
        match entries.remove(key) {
            Some(entry) => Ok(!entry.is_expired()),
            None => Ok(false),
        }
    }

    async fn del_many(&self, keys: &[String]) -> StoreResult<u64> {
        self.check_failure()?;
        let mut entries = self.entries.write().await;
        let mut removed = 0;
        for key in keys {
            if entries.remove(key).is_some() {
                removed += 1;
            }
        }
        Ok(removed)
    }

    async fn exists(&self, key: &str) -> StoreResult<bool> {
        self.check_failure()?;
        let entries = self.entries.read().await;
        Ok(entries.get(key).map(|e| !e.is_expired()).unwrap_or(false))
    }

    async fn expire(&self, key: &str, ttl_seconds: u64) -> StoreResult<bool> {
        self.check_failure()?;
        let mut entries = self.entries.write().await;
        match entries.get_mut(key) {
            Some(entry) if !entry.is_expired() => {
                entry.reset_ttl(ttl_seconds);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn ttl(&self, key: &str) -> StoreResult<i64> {
        self.check_failure()?;
        let entries = self.entries.read().await;
        match entries.get(key) {
            Some(entry) if !entry.is_expired() => Ok(entry.ttl_remaining_secs()),
            _ => Ok(TTL_KEY_ABSENT),
        }
    }

    async fn incr_by(&self, key: &str, delta: i64) -> StoreResult<i64> {
        self.check_failure()?;
        let mut entries = self.entries.write().await;

        let current = match entries.get(key) {
            Some(entry) if !entry.is_expired() => {
                entry.value.parse::<i64>().map_err(|_| StoreError::CorruptValue {
                    key: key.to_string(),
                    reason: "not an integer".to_string(),
                })?
            }
            _ => 0,
        };

        let new_value = current + delta;
        match entries.get_mut(key) {
            Some(entry) if !entry.is_expired() => {
                // Keep the existing expiration metadata on an update
                entry.value = new_value.to_string();
            }
            _ => {
                entries.insert(key.to_string(), StoredEntry::new(new_value.to_string(), None));
            }
        }
        Ok(new_value)
    }

    async fn scan(&self, pattern: &str, batch_hint: usize) -> StoreResult<Vec<String>> {
        self.check_failure()?;
        // Walk the key space in bounded chunks; expired-but-unreaped keys
        // are enumerated too, matching how networked stores surface them.
        let entries = self.entries.read().await;
        let batch = batch_hint.max(1);
        let mut matched = Vec::new();
        let mut pending: Vec<&String> = Vec::with_capacity(batch);

        for key in entries.keys() {
            pending.push(key);
            if pending.len() == batch {
                matched.extend(pending.drain(..).filter(|k| glob_match(pattern, k)).cloned());
            }
        }
        matched.extend(pending.drain(..).filter(|k| glob_match(pattern, k)).cloned());
        Ok(matched)
    }

    async fn compare_and_delete(&self, key: &str, expected: &str) -> StoreResult<bool> {
        self.check_failure()?;
        let mut entries = self.entries.write().await;
        match entries.get(key) {
            Some(entry) if !entry.is_expired() && entry.value == expected => {
                entries.remove(key);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
