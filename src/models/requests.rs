//! Request DTOs for the cache service API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Request body for the SET operation (PUT /cache)
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    /// The cache key
    pub key: String,
    /// The value to store, any JSON payload
    pub value: serde_json::Value,
    /// Optional TTL in seconds (uses the service default if not specified)
    #[serde(default)]
    pub ttl: Option<u64>,
}

impl SetRequest {
    /// Validates the request data.
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        validate_key(&self.key)
    }
}

/// Request body for warm-up pre-population (POST /warmup)
#[derive(Debug, Clone, Deserialize)]
pub struct WarmUpRequest {
    /// The cache key
    pub key: String,
    /// The hot value to pre-populate
    pub value: serde_json::Value,
}

impl WarmUpRequest {
    /// Validates the request data.
    pub fn validate(&self) -> Option<String> {
        validate_key(&self.key)
    }
}

/// Request body for the counter operation (POST /cache/:key/incr)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct IncrRequest {
    /// Amount to add; defaults to 1
    #[serde(default)]
    pub delta: Option<i64>,
}

/// Request body for resetting a TTL (POST /cache/:key/expire)
#[derive(Debug, Clone, Deserialize)]
pub struct ExpireRequest {
    /// New TTL in seconds
    pub ttl: u64,
}

/// Request body for lock acquisition (POST /locks/:name)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AcquireLockRequest {
    /// Lease TTL in seconds; defaults to the lock category policy
    #[serde(default)]
    pub ttl: Option<u64>,
}

/// Request body for lock release (DELETE /locks/:name)
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseLockRequest {
    /// Owner token returned at acquisition time
    pub token: String,
}

fn validate_key(key: &str) -> Option<String> {
    if key.is_empty() {
        return Some("Key cannot be empty".to_string());
    }
    if key.len() > MAX_KEY_LENGTH {
        return Some(format!(
            "Key exceeds maximum length of {} characters",
            MAX_KEY_LENGTH
        ));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_request_deserialize() {
        let json = r#"{"key": "product:1", "value": {"name": "widget"}}"#;
        let req: SetRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.key, "product:1");
        assert!(req.value.is_object());
        assert!(req.ttl.is_none());
    }

    #[test]
    fn test_set_request_with_ttl() {
        let json = r#"{"key": "product:1", "value": "v", "ttl": 60}"#;
        let req: SetRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.ttl, Some(60));
    }

    #[test]
    fn test_validate_empty_key() {
        let req = SetRequest {
            key: "".to_string(),
            value: serde_json::json!("v"),
            ttl: None,
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_validate_long_key() {
        let req = SetRequest {
            key: "x".repeat(MAX_KEY_LENGTH + 1),
            value: serde_json::json!("v"),
            ttl: None,
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_validate_valid_request() {
        let req = SetRequest {
            key: "search:shoes:1".to_string(),
            value: serde_json::json!(["a", "b"]),
            ttl: Some(60),
        };
        assert!(req.validate().is_none());
    }

    #[test]
    fn test_incr_request_default_delta() {
        let req: IncrRequest = serde_json::from_str("{}").unwrap();
        assert!(req.delta.is_none());
    }

    #[test]
    fn test_release_request_deserialize() {
        let json = r#"{"token": "abc-123"}"#;
        let req: ReleaseLockRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.token, "abc-123");
    }
}
