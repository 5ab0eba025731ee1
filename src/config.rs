//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;

use crate::cache::{DEFAULT_CLEANUP_MAX_AGE_MINUTES, DEFAULT_MAX_SIZE};

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
/// They are read once at startup; there is no runtime reconfiguration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of distinct keys the cache may hold
    pub max_size: usize,
    /// HTTP server port
    pub server_port: u16,
    /// Snapshot file for durable storage, None = in-memory only
    pub data_path: Option<PathBuf>,
    /// Background cleanup interval in seconds, 0 = disabled
    pub cleanup_interval: u64,
    /// Age in minutes past which background cleanup removes items
    pub cleanup_max_age_minutes: f64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_SIZE` - Maximum cache items (default: 10)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CACHE_DATA_PATH` - Snapshot file path (default: unset, in-memory)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 0, disabled)
    /// - `CLEANUP_MAX_AGE_MINUTES` - Cleanup age threshold (default: 60)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_size: parse_var("MAX_SIZE").unwrap_or(defaults.max_size),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            data_path: env::var("CACHE_DATA_PATH")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            cleanup_interval: parse_var("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
            cleanup_max_age_minutes: parse_var("CLEANUP_MAX_AGE_MINUTES")
                .filter(|m: &f64| m.is_finite() && *m > 0.0)
                .unwrap_or(defaults.cleanup_max_age_minutes),
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_SIZE,
            server_port: 3000,
            data_path: None,
            cleanup_interval: 0,
            cleanup_max_age_minutes: DEFAULT_CLEANUP_MAX_AGE_MINUTES,
        }
    }
}
