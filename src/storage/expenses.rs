//! Expense repository
//!
//! Serializes the whole expense collection as one JSON array under a single
//! storage key. Every write replaces the full collection.

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::Expense;

use super::{KeyValueStorage, StorageEvent};

/// Repository for the persisted expense collection
pub struct ExpenseRepository<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStorage> ExpenseRepository<S> {
    /// Create a repository storing the collection under `key`
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// The storage key of the collection
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying storage medium
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Read the collection
    ///
    /// A missing key is an empty collection. Unreadable or malformed data is
    /// reported as `PersistenceRead`.
    pub fn read(&self) -> ExpenseResult<Vec<Expense>> {
        let raw = self
            .storage
            .get_item(&self.key)
            .map_err(|e| ExpenseError::PersistenceRead(e.to_string()))?;

        match raw {
            None => Ok(Vec::new()),
            Some(raw) => parse_collection(&raw),
        }
    }

    /// Replace the stored collection
    pub fn write(&self, expenses: &[Expense]) -> ExpenseResult<()> {
        let serialized = serde_json::to_string(expenses)
            .map_err(|e| ExpenseError::PersistenceWrite(format!("Failed to serialize: {}", e)))?;

        self.storage
            .set_item(&self.key, &serialized)
            .map_err(|e| ExpenseError::PersistenceWrite(e.to_string()))
    }

    /// Check whether a storage event concerns this collection
    pub fn is_own_key(&self, event: &StorageEvent) -> bool {
        event.key == self.key
    }
}

/// Parse a serialized collection
pub fn parse_collection(raw: &str) -> ExpenseResult<Vec<Expense>> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw).map_err(|e| ExpenseError::PersistenceRead(e.to_string()))
}
