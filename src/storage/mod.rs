//! Storage layer for the expense tracker
//!
//! The tracker persists through a small key-value interface: string keys,
//! string values, and change notifications delivered to every *other* handle
//! on the same medium. Two backends are provided:
//!
//! - `MemoryStorage`: in-process, handles share one origin (tests, embedding)
//! - `FileStorage`: one JSON file per key in the data directory, shared by
//!   every process pointed at that directory

pub mod expenses;
pub mod file;
pub mod file_io;
pub mod memory;

pub use expenses::ExpenseRepository;
pub use file::FileStorage;
pub use file_io::{read_json, read_text, write_json_atomic, write_text_atomic};
pub use memory::MemoryStorage;

use std::sync::mpsc::Receiver;

use crate::error::ExpenseResult;

/// Default key holding the serialized expense collection
pub const DEFAULT_EXPENSES_KEY: &str = "expenses";

/// A change made to the medium by another handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvent {
    /// The key that changed
    pub key: String,
    /// Value before the change, if any
    pub old_value: Option<String>,
    /// Value after the change, `None` when the key was removed
    pub new_value: Option<String>,
}

impl StorageEvent {
    pub fn new(key: impl Into<String>, old_value: Option<String>, new_value: Option<String>) -> Self {
        Self {
            key: key.into(),
            old_value,
            new_value,
        }
    }
}

/// Key-value persistence medium
///
/// Implementations are synchronous. Events from `subscribe` are only sent for
/// writes made through other handles, never for the subscriber's own writes.
pub trait KeyValueStorage {
    /// Read the value stored under `key`
    fn get_item(&self, key: &str) -> ExpenseResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set_item(&self, key: &str, value: &str) -> ExpenseResult<()>;

    /// Delete `key`; removing a missing key is not an error
    fn remove_item(&self, key: &str) -> ExpenseResult<()>;

    /// Receive change notifications for writes made by other handles
    fn subscribe(&self) -> ExpenseResult<Receiver<StorageEvent>>;
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for &T {
    fn get_item(&self, key: &str) -> ExpenseResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> ExpenseResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> ExpenseResult<()> {
        (**self).remove_item(key)
    }

    fn subscribe(&self) -> ExpenseResult<Receiver<StorageEvent>> {
        (**self).subscribe()
    }
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for Box<T> {
    fn get_item(&self, key: &str) -> ExpenseResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> ExpenseResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> ExpenseResult<()> {
        (**self).remove_item(key)
    }

    fn subscribe(&self) -> ExpenseResult<Receiver<StorageEvent>> {
        (**self).subscribe()
    }
}
