//! Storage Port
//!
//! The narrow read/write/exists contract the engine needs from a backend,
//! plus the zero-configuration in-memory default.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::{GuardError, Result};

/// Blob store the guard engine persists its item collection into.
///
/// Implementations hold opaque bytes and know nothing about the items
/// inside. Errors are returned as `GuardError::Storage`; the engine does not
/// retry them. Calls may be abandoned midway when the caller's future is
/// dropped.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Returns true iff a value has previously been set for `key`.
    async fn exists(&self, key: &str) -> Result<bool>;

    /// Returns the blob stored under `key`, or an empty blob if none was set.
    async fn get(&self, key: &str) -> Result<Vec<u8>>;

    /// Overwrites the blob stored under `key`.
    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()>;
}

// == Memory Storage ==
/// In-process map from key to blob. No eviction, no persistence.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    data: RwLock<Option<HashMap<String, Vec<u8>>>>,
}

impl MemoryStorage {
    /// Creates an empty store; the backing map is allocated on first write.
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<E>(_: E) -> GuardError {
    GuardError::Storage("memory storage lock poisoned".to_string())
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn exists(&self, key: &str) -> Result<bool> {
        let data = self.data.read().map_err(poisoned)?;
        Ok(data.as_ref().is_some_and(|map| map.contains_key(key)))
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>> {
        let data = self.data.read().map_err(poisoned)?;
        Ok(data
            .as_ref()
            .and_then(|map| map.get(key))
            .cloned()
            .unwrap_or_default())
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        let mut data = self.data.write().map_err(poisoned)?;
        data.get_or_insert_with(HashMap::new)
            .insert(key.to_string(), value);
        Ok(())
    }
}
