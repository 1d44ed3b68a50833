//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// TTL in seconds applied to HTTP writes that specify none
    pub default_ttl: u64,
    /// Batch size for pattern scans
    pub scan_batch: usize,
    /// Background expired-entry reaper interval in seconds
    pub reaper_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `DEFAULT_TTL` - Fallback TTL in seconds (default: 300)
    /// - `SCAN_BATCH` - Keys per scan batch (default: 100)
    /// - `REAPER_INTERVAL` - Reaper frequency in seconds (default: 1)
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            default_ttl: env::var("DEFAULT_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            scan_batch: env::var("SCAN_BATCH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(100),
            reaper_interval: env::var("REAPER_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            default_ttl: 300,
            scan_batch: 100,
            reaper_interval: 1,
        }
    }
}
