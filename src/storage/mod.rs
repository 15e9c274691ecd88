//! Persistence seam for the album store.
//!
//! The store only ever needs a key-value byte store: read a record, write it
//! back whole, clear it. Durability beyond "written before the next read in
//! the same process" is not assumed.

mod sqlite;

pub use sqlite::SqliteStore;

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::errors::StoreError;

/// Key-value byte store the album record is persisted to.
#[async_trait]
pub trait PersistenceAdapter: Send + Sync {
    /// Read the record stored under `key`, if any.
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Write `value` under `key`, replacing any previous record.
    async fn write(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;

    /// Remove the record stored under `key`. Absent keys are not an error.
    async fn clear(&self, key: &str) -> Result<(), StoreError>;
}

/// In-memory adapter for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PersistenceAdapter for MemoryStore {
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let records = self
            .records
            .lock()
            .map_err(|_| StoreError::StorageRead("Memory store poisoned".to_string()))?;
        Ok(records.get(key).cloned())
    }

    async fn write(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| StoreError::StorageWrite("Memory store poisoned".to_string()))?;
        records.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    async fn clear(&self, key: &str) -> Result<(), StoreError> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| StoreError::StorageWrite("Memory store poisoned".to_string()))?;
        records.remove(key);
        Ok(())
    }
}
