//! Distributed Lock Protocol
//!
//! Lease-based mutual exclusion on top of the store's conditional-create and
//! compare-and-delete primitives. A lock is a single key in the `lock:`
//! namespace holding the owner's token; the TTL is the only recovery
//! mechanism for a crashed holder. The protocol is advisory: it coordinates
//! cooperating callers and nothing else.
//!
//! There is deliberately no renewal or heartbeat. A critical section that
//! outlives its TTL loses the lock while still running, and the next caller
//! can acquire it; pick the TTL accordingly.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error};

use crate::keys::Namespace;
use crate::store::KvStore;

// == Lock Manager ==
/// Stateless acquire/release front for named locks. All lock state lives in
/// the store; ownership is never cached in process memory.
#[derive(Clone)]
pub struct LockManager {
    store: Arc<dyn KvStore>,
}

impl LockManager {
    // == Constructor ==
    /// Creates a lock manager over an injected store client.
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// The fully-qualified store key for a lock name.
    pub fn lock_key(name: &str) -> String {
        Namespace::Lock.key([name])
    }

    // == Try Lock ==
    /// Attempts to acquire the named lock for `owner_token` with a lease of
    /// `ttl`.
    ///
    /// One atomic conditional create: the key is written with its TTL only
    /// if currently absent. A separate exists-then-set would be racy. Any
    /// store error reads as "did not acquire" — a failed probe is never a
    /// successful acquisition.
    ///
    /// Token uniqueness per acquisition attempt is the caller's
    /// responsibility; the protocol only ever compares tokens for equality.
    pub async fn try_lock(&self, name: &str, owner_token: &str, ttl: Duration) -> bool {
        let key = Self::lock_key(name);
        match self.store.set_nx(&key, owner_token, ttl.as_secs()).await {
            Ok(acquired) => {
                debug!(lock = name, acquired, "try_lock");
                acquired
            }
            Err(err) => {
                error!(lock = name, error = %err, "try_lock store call failed, treating as not acquired");
                false
            }
        }
    }

    /// Acquires with the lock category's policy TTL (5 minutes).
    pub async fn try_lock_default(&self, name: &str, owner_token: &str) -> bool {
        self.try_lock(name, owner_token, Namespace::Lock.ttl()).await
    }

    // == Release ==
    /// Releases the named lock if and only if it is still held by
    /// `owner_token`.
    ///
    /// One atomic compare-and-delete at the store; a client-side
    /// get-then-delete would let another owner slip in between the two
    /// calls. Returns false when the token does not match, the lease
    /// already expired, or the store is degraded — in every such case the
    /// caller no longer owns the lock and must not assume it does.
    pub async fn release(&self, name: &str, owner_token: &str) -> bool {
        let key = Self::lock_key(name);
        match self.store.compare_and_delete(&key, owner_token).await {
            Ok(released) => {
                debug!(lock = name, released, "release");
                released
            }
            Err(err) => {
                error!(lock = name, error = %err, "release store call failed");
                false
            }
        }
    }
}
