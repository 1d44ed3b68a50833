//! API Handlers
//!
//! HTTP request handlers for each cache service endpoint. The cache layer
//! never fails, so handler errors come only from request validation and from
//! lock contention signaling.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::cache::CacheManager;
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::keys::Namespace;
use crate::lock::LockManager;
use crate::models::{
    AcquireLockRequest, DeleteResponse, ExpireRequest, ExpireResponse, GetResponse,
    HealthResponse, IncrRequest, IncrResponse, LockResponse, PatternDeleteResponse,
    ReleaseLockRequest, ReleaseResponse, SetRequest, SetResponse, StatsResponse, TtlResponse,
    WarmUpRequest,
};
use crate::store::KvStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Fail-soft cache access layer
    pub cache: CacheManager,
    /// Distributed lock protocol over the same store
    pub locks: LockManager,
    /// TTL in seconds for writes that specify none
    pub default_ttl: u64,
}

impl AppState {
    /// Creates a new AppState over an injected store client.
    pub fn new(store: Arc<dyn KvStore>, config: &Config) -> Self {
        Self {
            cache: CacheManager::new(store.clone()).with_scan_batch(config.scan_batch),
            locks: LockManager::new(store),
            default_ttl: config.default_ttl,
        }
    }
}

// == Query Parameters ==
#[derive(Debug, Deserialize)]
pub struct PatternQuery {
    pub pattern: Option<String>,
}

/// Handler for PUT /cache
///
/// Stores a key-value pair with an explicit or default TTL.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let ttl = Duration::from_secs(req.ttl.unwrap_or(state.default_ttl));
    state.cache.set(&req.key, &req.value, ttl).await;

    Ok(Json(SetResponse::new(req.key)))
}

/// Handler for GET /cache/:key
///
/// Retrieves a cached value. A degraded cache and a genuine miss both
/// surface as 404; the caller's contract is "fall through to the source of
/// truth" either way.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    match state.cache.get::<serde_json::Value>(&key).await {
        Some(value) => Ok(Json(GetResponse::new(key, value))),
        None => Err(ApiError::NotFound(key)),
    }
}

/// Handler for DELETE /cache/:key
///
/// Removes a key. Idempotent: deleting an absent key is still a success.
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<DeleteResponse> {
    state.cache.delete(&key).await;
    Json(DeleteResponse::new(key))
}

/// Handler for DELETE /cache?pattern=
///
/// Bulk invalidation of every key matching a glob pattern.
pub async fn pattern_delete_handler(
    State(state): State<AppState>,
    Query(query): Query<PatternQuery>,
) -> Result<Json<PatternDeleteResponse>> {
    let pattern = query
        .pattern
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::InvalidRequest("Query parameter 'pattern' is required".to_string()))?;

    let removed = state.cache.delete_by_pattern(&pattern).await;
    Ok(Json(PatternDeleteResponse { pattern, removed }))
}

/// Handler for GET /cache/:key/ttl
pub async fn ttl_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<TtlResponse> {
    let ttl = state.cache.get_expire(&key).await;
    Json(TtlResponse { key, ttl })
}

/// Handler for POST /cache/:key/expire
pub async fn expire_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(req): Json<ExpireRequest>,
) -> Json<ExpireResponse> {
    let applied = state.cache.expire(&key, Duration::from_secs(req.ttl)).await;
    Json(ExpireResponse { key, applied })
}

/// Handler for POST /cache/:key/incr
///
/// Atomic counter add. A value of 0 may mean either a fresh counter or a
/// degraded cache; clients must not distinguish.
pub async fn incr_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(req): Json<IncrRequest>,
) -> Json<IncrResponse> {
    let value = state.cache.increment(&key, req.delta.unwrap_or(1)).await;
    Json(IncrResponse { key, value })
}

/// Handler for POST /warmup
///
/// Pre-populates hot data with the fixed warm-up TTL.
pub async fn warmup_handler(
    State(state): State<AppState>,
    Json(req): Json<WarmUpRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    state.cache.warm_up(&req.key, &req.value).await;
    Ok(Json(SetResponse::new(req.key)))
}

/// Handler for POST /locks/:name
///
/// Attempts to acquire the named lock, minting a fresh owner token per
/// request. Contention answers 409.
pub async fn acquire_lock_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Option<Json<AcquireLockRequest>>,
) -> Result<Json<LockResponse>> {
    let req = body.map(|Json(req)| req).unwrap_or_default();
    let ttl_secs = req.ttl.unwrap_or_else(|| Namespace::Lock.ttl().as_secs());
    let token = Uuid::new_v4().to_string();

    if state
        .locks
        .try_lock(&name, &token, Duration::from_secs(ttl_secs))
        .await
    {
        Ok(Json(LockResponse {
            name,
            token,
            ttl: ttl_secs,
        }))
    } else {
        Err(ApiError::LockHeld(name))
    }
}

/// Handler for DELETE /locks/:name
///
/// Releases the lock if the presented token still owns it. A refused
/// release answers 409: the caller no longer holds the lock.
pub async fn release_lock_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(req): Json<ReleaseLockRequest>,
) -> Result<Json<ReleaseResponse>> {
    if state.locks.release(&name, &req.token).await {
        Ok(Json(ReleaseResponse {
            name,
            released: true,
        }))
    } else {
        Err(ApiError::LockNotOwned(name))
    }
}

/// Handler for GET /stats?pattern=
///
/// Best-effort key space snapshot; defaults to the whole key space.
pub async fn stats_handler(
    State(state): State<AppState>,
    Query(query): Query<PatternQuery>,
) -> Json<StatsResponse> {
    let pattern = query.pattern.unwrap_or_else(|| "*".to_string());
    let stats = state.cache.stats(&pattern).await;
    Json(StatsResponse::new(stats))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn test_state() -> AppState {
        AppState::new(Arc::new(MemoryStore::new()), &Config::default())
    }

    #[tokio::test]
    async fn test_set_and_get_handler() {
        let state = test_state();

        let req = SetRequest {
            key: "product:1".to_string(),
            value: serde_json::json!({"name": "widget"}),
            ttl: None,
        };
        let result = set_handler(State(state.clone()), Json(req)).await;
        assert!(result.is_ok());

        let result = get_handler(State(state), Path("product:1".to_string())).await;
        let response = result.unwrap();
        assert_eq!(response.value["name"], "widget");
    }

    #[tokio::test]
    async fn test_get_nonexistent_key() {
        let state = test_state();

        let result = get_handler(State(state), Path("nonexistent".to_string())).await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_handler_idempotent() {
        let state = test_state();

        let req = SetRequest {
            key: "to_delete".to_string(),
            value: serde_json::json!("value"),
            ttl: None,
        };
        set_handler(State(state.clone()), Json(req)).await.unwrap();

        delete_handler(State(state.clone()), Path("to_delete".to_string())).await;
        // Second delete of the same key is still a success
        delete_handler(State(state.clone()), Path("to_delete".to_string())).await;

        let result = get_handler(State(state), Path("to_delete".to_string())).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_pattern_delete_requires_pattern() {
        let state = test_state();

        let result =
            pattern_delete_handler(State(state), Query(PatternQuery { pattern: None })).await;
        assert!(matches!(result, Err(ApiError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_incr_handler_default_delta() {
        let state = test_state();

        let response = incr_handler(
            State(state),
            Path("counter:hits".to_string()),
            Json(IncrRequest::default()),
        )
        .await;
        assert_eq!(response.value, 1);
    }

    #[tokio::test]
    async fn test_lock_conflict() {
        let state = test_state();

        let first = acquire_lock_handler(
            State(state.clone()),
            Path("job".to_string()),
            Some(Json(AcquireLockRequest { ttl: Some(60) })),
        )
        .await;
        assert!(first.is_ok());

        let second = acquire_lock_handler(State(state), Path("job".to_string()), None).await;
        assert!(matches!(second, Err(ApiError::LockHeld(_))));
    }

    #[tokio::test]
    async fn test_lock_release_roundtrip() {
        let state = test_state();

        let token = acquire_lock_handler(State(state.clone()), Path("job".to_string()), None)
            .await
            .unwrap()
            .token
            .clone();

        let wrong = release_lock_handler(
            State(state.clone()),
            Path("job".to_string()),
            Json(ReleaseLockRequest {
                token: "someone-else".to_string(),
            }),
        )
        .await;
        assert!(matches!(wrong, Err(ApiError::LockNotOwned(_))));

        let right = release_lock_handler(
            State(state),
            Path("job".to_string()),
            Json(ReleaseLockRequest { token }),
        )
        .await;
        assert!(right.unwrap().released);
    }

    #[tokio::test]
    async fn test_stats_handler_defaults_to_full_keyspace() {
        let state = test_state();

        let response = stats_handler(State(state), Query(PatternQuery { pattern: None })).await;
        assert_eq!(response.stats.pattern, "*");
        assert_eq!(response.stats.total_keys, 0);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }

    #[tokio::test]
    async fn test_set_invalid_request() {
        let state = test_state();

        let req = SetRequest {
            key: "".to_string(),
            value: serde_json::json!("v"),
            ttl: None,
        };
        let result = set_handler(State(state), Json(req)).await;
        assert!(matches!(result, Err(ApiError::InvalidRequest(_))));
    }
}
