//! Request DTOs for the cache server API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::cache::DEFAULT_CLEANUP_MAX_AGE_MINUTES;

/// Request body for the SET operation (POST /cache)
///
/// # Fields
/// - `key`: The cache key to store the value under
/// - `value`: Any JSON value. An explicit `null` is kept as a value; only an
///   omitted field counts as missing.
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    /// The cache key
    #[serde(default)]
    pub key: String,
    /// The value to store
    #[serde(default, deserialize_with = "present")]
    pub value: Option<Value>,
}

/// Wraps whatever was sent, `null` included, so that `None` means "omitted".
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Query parameters for the cleanup operation (POST /cleanup)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanupParams {
    /// Age threshold in minutes, defaults to 60
    pub max_age_minutes: Option<f64>,
}

impl CleanupParams {
    pub fn max_age_minutes(&self) -> f64 {
        self.max_age_minutes
            .unwrap_or(DEFAULT_CLEANUP_MAX_AGE_MINUTES)
    }
}
