//! Property-Based Tests for the Cache Access Layer
//!
//! Uses proptest to verify the layer's behavioral contracts: key building,
//! round-trip storage, overwrite and delete semantics, pattern matching, and
//! the fail-soft degradation guarantee.

use std::sync::Arc;
use std::time::Duration;

use proptest::prelude::*;

use crate::cache::CacheManager;
use crate::keys::build_key;
use crate::store::{glob_match, MemoryStore};

// == Test Configuration ==
const TEST_TTL: Duration = Duration::from_secs(300);

// == Strategies ==
/// Generates valid key parts (non-empty, no separator)
fn key_part_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_-]{1,32}".prop_map(|s| s)
}

/// Generates valid cache values
fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{1,256}".prop_map(|s| s)
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Runtime::new().unwrap()
}

fn manager_with_store() -> (CacheManager, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    (CacheManager::new(store.clone()), store)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Key building is deterministic, keeps the prefix, and never ends in a
    // separator.
    #[test]
    fn prop_build_key_shape(
        prefix in "[a-z]{1,12}:",
        parts in prop::collection::vec(key_part_strategy(), 0..5)
    ) {
        let key = build_key(&prefix, &parts);
        let again = build_key(&prefix, &parts);

        prop_assert_eq!(&key, &again, "Key building must be deterministic");
        prop_assert!(!key.ends_with(':'), "Key must not end with a separator");
        if !parts.is_empty() {
            prop_assert!(key.starts_with(&prefix), "Key must keep its namespace prefix");
            prop_assert_eq!(&key, &format!("{}{}", prefix, parts.join(":")));
        }
    }

    // Round-trip: a set followed by a get returns the stored value until TTL
    // or delete.
    #[test]
    fn prop_roundtrip_storage(part in key_part_strategy(), value in value_strategy()) {
        let rt = runtime();
        rt.block_on(async {
            let (cache, _) = manager_with_store();
            let key = build_key("user:", [part.as_str()]);

            cache.set(&key, &value, TEST_TTL).await;
            let retrieved: Option<String> = cache.get(&key).await;

            prop_assert_eq!(retrieved, Some(value), "Round-trip value mismatch");
            Ok(())
        })?;
    }

    // Overwrite: the second write wins.
    #[test]
    fn prop_overwrite_semantics(
        part in key_part_strategy(),
        value1 in value_strategy(),
        value2 in value_strategy()
    ) {
        let rt = runtime();
        rt.block_on(async {
            let (cache, _) = manager_with_store();
            let key = build_key("product:", [part.as_str()]);

            cache.set(&key, &value1, TEST_TTL).await;
            cache.set(&key, &value2, TEST_TTL).await;

            let retrieved: Option<String> = cache.get(&key).await;
            prop_assert_eq!(retrieved, Some(value2), "Overwrite should return new value");
            Ok(())
        })?;
    }

    // Delete: get returns absent afterwards, and deleting twice is safe.
    #[test]
    fn prop_delete_removes_entry(part in key_part_strategy(), value in value_strategy()) {
        let rt = runtime();
        rt.block_on(async {
            let (cache, _) = manager_with_store();
            let key = build_key("cart:", [part.as_str()]);

            cache.set(&key, &value, TEST_TTL).await;
            prop_assert!(cache.exists(&key).await, "Key should exist before delete");

            cache.delete(&key).await;
            prop_assert!(cache.get::<String>(&key).await.is_none(), "Key should be gone");
            prop_assert!(!cache.exists(&key).await);

            // Idempotence
            cache.delete(&key).await;
            Ok(())
        })?;
    }

    // Prefix glob patterns match exactly the keys carrying that prefix.
    #[test]
    fn prop_prefix_glob_is_starts_with(
        prefix in "[a-z]{1,8}:",
        suffix in "[a-zA-Z0-9:_-]{0,24}"
    ) {
        let pattern = format!("{prefix}*");
        let matching = format!("{prefix}{suffix}");

        prop_assert!(glob_match(&pattern, &matching));
        prop_assert_eq!(glob_match(&pattern, &suffix), suffix.starts_with(&prefix));
    }

    // Pattern delete removes every key matching at scan time and nothing else.
    #[test]
    fn prop_pattern_delete_scope(
        parts in prop::collection::vec(key_part_strategy(), 1..10),
        other in key_part_strategy()
    ) {
        let rt = runtime();
        rt.block_on(async {
            let (cache, _) = manager_with_store();

            // Duplicate parts collapse onto the same key
            let unique_parts: std::collections::HashSet<&String> = parts.iter().collect();
            let mut product_keys = Vec::new();
            for part in unique_parts {
                let key = build_key("product:", [part.as_str()]);
                cache.set(&key, "v", TEST_TTL).await;
                product_keys.push(key);
            }
            let survivor = build_key("brand:", [other.as_str()]);
            cache.set(&survivor, "v", TEST_TTL).await;

            let removed = cache.delete_by_pattern("product:*").await;
            prop_assert_eq!(removed as usize, product_keys.len());

            for key in &product_keys {
                prop_assert!(!cache.exists(key).await, "matched key must be gone");
            }
            prop_assert!(cache.exists(&survivor).await, "non-matching key must survive");
            Ok(())
        })?;
    }
}

// Separate block with fewer cases for the degradation property, which
// exercises every entry point per case.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    // With a failing store, every operation degrades to its neutral value
    // and never panics or surfaces an error.
    #[test]
    fn prop_degraded_operations_are_neutral(part in key_part_strategy()) {
        let rt = runtime();
        rt.block_on(async {
            let (cache, store) = manager_with_store();
            let key = build_key("session:", [part.as_str()]);

            store.fail_next(u32::MAX);

            cache.set(&key, "v", TEST_TTL).await;
            prop_assert!(cache.get::<String>(&key).await.is_none());
            prop_assert!(!cache.exists(&key).await);
            prop_assert_eq!(cache.get_expire(&key).await, -1);
            prop_assert_eq!(cache.increment(&key, 1).await, 0);
            prop_assert!(!cache.expire(&key, TEST_TTL).await);
            prop_assert_eq!(cache.delete_by_pattern("session:*").await, 0);
            cache.delete(&key).await;

            let stats = cache.stats("session:*").await;
            prop_assert_eq!(stats.total_keys, 0);
            Ok(())
        })?;
    }
}
