//! Expired-Entry Reaper
//!
//! Background task that periodically removes expired entries from the
//! in-memory store. Reads already treat expired entries as absent; the reaper
//! only reclaims the memory they occupy, and until it runs such keys still
//! show up in scans as expired-but-unreaped.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::store::MemoryStore;

/// Spawns a background task that periodically purges expired entries.
///
/// # Arguments
/// * `store` - Shared reference to the in-memory store
/// * `interval_secs` - Interval in seconds between purge runs
///
/// # Returns
/// A JoinHandle for the spawned task, used to abort it during graceful
/// shutdown.
pub fn spawn_reaper_task(store: Arc<MemoryStore>, interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting expired-entry reaper with interval of {} seconds",
            interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = store.purge_expired().await;

            if removed > 0 {
                info!("Reaper: removed {} expired entries", removed);
            } else {
                debug!("Reaper: no expired entries found");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::KvStore;
    use std::time::Duration;

    #[tokio::test]
    async fn test_reaper_removes_expired_entries() {
        let store = Arc::new(MemoryStore::new());

        store.set("expire_soon", "value", Some(1)).await.unwrap();

        let handle = spawn_reaper_task(store.clone(), 1);

        tokio::time::sleep(Duration::from_millis(2500)).await;

        assert_eq!(store.len().await, 0, "Expired entry should have been reaped");

        handle.abort();
    }

    #[tokio::test]
    async fn test_reaper_preserves_valid_entries() {
        let store = Arc::new(MemoryStore::new());

        store.set("long_lived", "value", Some(3600)).await.unwrap();

        let handle = spawn_reaper_task(store.clone(), 1);

        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert_eq!(
            store.get("long_lived").await.unwrap().as_deref(),
            Some("value"),
            "Valid entry should not be removed"
        );

        handle.abort();
    }

    #[tokio::test]
    async fn test_reaper_can_be_aborted() {
        let store = Arc::new(MemoryStore::new());

        let handle = spawn_reaper_task(store, 1);
        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
