//! Payload guarded by the HTTP service.

use serde::{Deserialize, Serialize};

/// An operation waiting for confirmation, identified by `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingItem {
    pub id: String,
    /// Free-form caller data carried to the expiry log
    #[serde(default)]
    pub data: serde_json::Value,
}

impl PendingItem {
    pub fn new(id: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }

    /// Identity check used by the server's guard.
    pub fn matches(id: &str, item: &PendingItem) -> bool {
        item.id == id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_matches_by_id() {
        let item = PendingItem::new("abc", json!({"amount": 5}));
        assert!(PendingItem::matches("abc", &item));
        assert!(!PendingItem::matches("abd", &item));
    }

    #[test]
    fn test_data_defaults_to_null() {
        let item: PendingItem = serde_json::from_str(r#"{"id": "x"}"#).unwrap();
        assert_eq!(item.data, serde_json::Value::Null);
    }
}
