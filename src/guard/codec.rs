//! Item Store Codec
//!
//! Converts the tracked item collection to and from the single blob kept in
//! the storage backend. The blob is a JSON array of
//! `{"payload": .., "expire_at": ..}` records.

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{GuardError, Result};
use crate::guard::TrackedItem;

/// Decodes a stored blob into the item collection.
///
/// An empty (or whitespace-only) blob is the collection nobody has written
/// yet and decodes to an empty vector.
pub fn decode<T: DeserializeOwned>(blob: &[u8]) -> Result<Vec<TrackedItem<T>>> {
    if blob.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    serde_json::from_slice(blob).map_err(|e| GuardError::Decode(e.to_string()))
}

/// Encodes the whole item collection into one blob.
pub fn encode<T: Serialize>(items: &[TrackedItem<T>]) -> Result<Vec<u8>> {
    serde_json::to_vec(items).map_err(|e| GuardError::Encode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Order {
        id: String,
        amount: u32,
    }

    fn order(id: &str, amount: u32, expire_at: u64) -> TrackedItem<Order> {
        TrackedItem {
            payload: Order {
                id: id.to_string(),
                amount,
            },
            expire_at,
        }
    }

    #[test]
    fn test_decode_empty_blob() {
        let items: Vec<TrackedItem<Order>> = decode(b"").unwrap();
        assert!(items.is_empty());

        let items: Vec<TrackedItem<Order>> = decode(b"  \n").unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_empty_collection_round_trip() {
        let blob = encode::<Order>(&[]).unwrap();
        assert_eq!(blob, b"[]");

        let items: Vec<TrackedItem<Order>> = decode(&blob).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_round_trip_preserves_order() {
        let items = vec![order("b", 2, 20), order("a", 1, 10), order("c", 3, 5)];

        let decoded: Vec<TrackedItem<Order>> = decode(&encode(&items).unwrap()).unwrap();
        assert_eq!(decoded, items);
    }

    #[test]
    fn test_record_layout() {
        let blob = encode(&[order("x", 7, 1234)]).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&blob).unwrap();

        assert_eq!(value[0]["expire_at"], 1234);
        assert_eq!(value[0]["payload"]["id"], "x");
    }

    #[test]
    fn test_decode_malformed_blob() {
        let result: Result<Vec<TrackedItem<Order>>> = decode(b"{not json");
        assert!(matches!(result, Err(GuardError::Decode(_))));
    }

    #[test]
    fn test_decode_wrong_shape() {
        let result: Result<Vec<TrackedItem<Order>>> = decode(br#"[{"payload": 1}]"#);
        assert!(matches!(result, Err(GuardError::Decode(_))));
    }
}
