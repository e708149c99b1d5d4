//! In-memory key-value storage
//!
//! Every `MemoryStorage` created from another with `open_handle` shares the
//! same origin: the same items, quota and subscriber list. A write through one
//! handle notifies the subscribers of all other handles.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{ExpenseError, ExpenseResult};

use super::{KeyValueStorage, StorageEvent};

#[derive(Default)]
struct Origin {
    items: HashMap<String, String>,
    quota: Option<u64>,
    subscribers: Vec<(u64, Sender<StorageEvent>)>,
}

impl Origin {
    fn usage_with(&self, key: &str, value: &str) -> u64 {
        let others: usize = self
            .items
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum();
        (others + key.len() + value.len()) as u64
    }

    fn notify(&mut self, from_handle: u64, event: StorageEvent) {
        // Dropped receivers are pruned here
        self.subscribers.retain(|(handle, sender)| {
            *handle == from_handle || sender.send(event.clone()).is_ok()
        });
    }
}

/// Key-value storage held in memory
pub struct MemoryStorage {
    handle: u64,
    next_handle: Arc<AtomicU64>,
    origin: Arc<Mutex<Origin>>,
}

impl MemoryStorage {
    /// Create a new, empty origin and return its first handle
    pub fn new() -> Self {
        Self {
            handle: 0,
            next_handle: Arc::new(AtomicU64::new(1)),
            origin: Arc::new(Mutex::new(Origin::default())),
        }
    }

    /// Create a new origin limited to `bytes` of keys plus values
    pub fn with_quota(bytes: u64) -> Self {
        let storage = Self::new();
        if let Ok(mut origin) = storage.origin.lock() {
            origin.quota = Some(bytes);
        }
        storage
    }

    /// Open another handle onto the same origin
    pub fn open_handle(&self) -> Self {
        Self {
            handle: self.next_handle.fetch_add(1, Ordering::Relaxed),
            next_handle: Arc::clone(&self.next_handle),
            origin: Arc::clone(&self.origin),
        }
    }

    /// Change the quota of the origin; `None` removes the limit
    pub fn set_quota(&self, bytes: Option<u64>) -> ExpenseResult<()> {
        self.lock()?.quota = bytes;
        Ok(())
    }

    /// Bytes currently used by keys and values
    pub fn usage(&self) -> ExpenseResult<u64> {
        let origin = self.lock()?;
        Ok(origin.items.iter().map(|(k, v)| (k.len() + v.len()) as u64).sum())
    }

    fn lock(&self) -> ExpenseResult<MutexGuard<'_, Origin>> {
        self.origin
            .lock()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire storage lock: {}", e)))
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> ExpenseResult<Option<String>> {
        Ok(self.lock()?.items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> ExpenseResult<()> {
        let mut origin = self.lock()?;

        if let Some(limit) = origin.quota {
            let requested = origin.usage_with(key, value);
            if requested > limit {
                return Err(ExpenseError::QuotaExceeded { limit, requested });
            }
        }

        let old_value = origin.items.insert(key.to_string(), value.to_string());
        if old_value.as_deref() != Some(value) {
            let event = StorageEvent::new(key, old_value, Some(value.to_string()));
            origin.notify(self.handle, event);
        }
        Ok(())
    }

    fn remove_item(&self, key: &str) -> ExpenseResult<()> {
        let mut origin = self.lock()?;
        if let Some(old_value) = origin.items.remove(key) {
            origin.notify(self.handle, StorageEvent::new(key, Some(old_value), None));
        }
        Ok(())
    }

    fn subscribe(&self) -> ExpenseResult<Receiver<StorageEvent>> {
        let (sender, receiver) = mpsc::channel();
        self.lock()?.subscribers.push((self.handle, sender));
        Ok(receiver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_remove() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item("k").unwrap(), None);

        storage.set_item("k", "v1").unwrap();
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("v1"));

        storage.set_item("k", "v2").unwrap();
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("v2"));

        storage.remove_item("k").unwrap();
        assert_eq!(storage.get_item("k").unwrap(), None);

        // Removing again is fine
        storage.remove_item("k").unwrap();
    }

    #[test]
    fn test_handles_share_items() {
        let first = MemoryStorage::new();
        let second = first.open_handle();

        first.set_item("k", "shared").unwrap();
        assert_eq!(second.get_item("k").unwrap().as_deref(), Some("shared"));
    }

    #[test]
    fn test_events_skip_the_writer() {
        let first = MemoryStorage::new();
        let second = first.open_handle();

        let first_events = first.subscribe().unwrap();
        let second_events = second.subscribe().unwrap();

        first.set_item("k", "v").unwrap();

        assert!(first_events.try_recv().is_err());
        let event = second_events.try_recv().unwrap();
        assert_eq!(event, StorageEvent::new("k", None, Some("v".into())));
    }

    #[test]
    fn test_unchanged_value_does_not_notify() {
        let first = MemoryStorage::new();
        let second = first.open_handle();
        let events = second.subscribe().unwrap();

        first.set_item("k", "v").unwrap();
        first.set_item("k", "v").unwrap();

        assert!(events.try_recv().is_ok());
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn test_remove_notifies() {
        let first = MemoryStorage::new();
        let second = first.open_handle();
        first.set_item("k", "v").unwrap();

        let events = second.subscribe().unwrap();
        first.remove_item("k").unwrap();

        let event = events.try_recv().unwrap();
        assert_eq!(event.old_value.as_deref(), Some("v"));
        assert_eq!(event.new_value, None);
    }

    #[test]
    fn test_dropped_subscriber_is_pruned() {
        let first = MemoryStorage::new();
        let second = first.open_handle();
        drop(second.subscribe().unwrap());

        first.set_item("k", "v").unwrap();
        assert!(first.lock().unwrap().subscribers.is_empty());
    }

    #[test]
    fn test_quota() {
        let storage = MemoryStorage::with_quota(10);
        storage.set_item("k", "123456789").unwrap();

        let err = storage.set_item("k", "1234567890").unwrap_err();
        assert!(matches!(
            err,
            ExpenseError::QuotaExceeded {
                limit: 10,
                requested: 11
            }
        ));

        // Failed write leaves the old value in place
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("123456789"));
        assert_eq!(storage.usage().unwrap(), 10);

        storage.set_quota(None).unwrap();
        storage.set_item("k", "1234567890").unwrap();
    }
}
