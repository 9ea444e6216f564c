//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::guard::{GuardConfig, DEFAULT_STORAGE_KEY};

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Default TTL in seconds for items armed without explicit TTL
    pub default_ttl: u64,
    /// Interval between sweeps in seconds
    pub sweep_interval: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Storage key the item collection is kept under
    pub storage_key: String,
    /// Ignore per-request TTLs and always use `default_ttl`
    pub fixed_ttl: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `DEFAULT_TTL` - Default TTL in seconds (default: 300)
    /// - `SWEEP_INTERVAL` - Sweep frequency in seconds (default: 60)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `STORAGE_KEY` - Storage key (default: "deadline_guard_default_key")
    /// - `FIXED_TTL` - "true"/"1" to ignore per-request TTLs (default: false)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            default_ttl: env::var("DEFAULT_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.default_ttl),
            sweep_interval: env::var("SWEEP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.sweep_interval),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            storage_key: env::var("STORAGE_KEY")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.storage_key),
            fixed_ttl: env::var("FIXED_TTL")
                .ok()
                .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(defaults.fixed_ttl),
        }
    }

    /// Applies the non-callback settings to a guard configuration.
    pub fn apply<T>(&self, guard: GuardConfig<T>) -> GuardConfig<T> {
        guard
            .default_ttl(Duration::from_secs(self.default_ttl))
            .sweep_interval(Duration::from_secs(self.sweep_interval))
            .storage_key(self.storage_key.clone())
            .fixed_ttl(self.fixed_ttl)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_ttl: 300,
            sweep_interval: 60,
            server_port: 3000,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            fixed_ttl: false,
        }
    }
}
