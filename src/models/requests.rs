//! Request DTOs for the guard server API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

/// Maximum allowed id length in bytes
pub const MAX_ID_LENGTH: usize = 256;

/// Request body for the ARM operation (PUT /arm)
///
/// # Fields
/// - `id`: External id later used to disarm the item
/// - `data`: Optional caller data kept with the item
/// - `ttl`: Optional TTL in seconds (uses default if not specified)
#[derive(Debug, Clone, Deserialize)]
pub struct ArmRequest {
    /// External id of the item
    pub id: String,
    /// Caller data
    #[serde(default)]
    pub data: serde_json::Value,
    /// Optional TTL in seconds
    #[serde(default)]
    pub ttl: Option<u64>,
}

impl ArmRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.id.is_empty() {
            return Some("Id cannot be empty".to_string());
        }
        if self.id.len() > MAX_ID_LENGTH {
            return Some(format!(
                "Id exceeds maximum length of {} characters",
                MAX_ID_LENGTH
            ));
        }
        if self.ttl == Some(0) {
            return Some("TTL must be greater than zero".to_string());
        }
        None
    }
}
