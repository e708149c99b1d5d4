//! File-backed key-value storage
//!
//! Each key is stored as `<dir>/<key>.json`. Processes pointed at the same
//! directory see each other's writes; `subscribe` starts a polling thread that
//! reports changes made by anyone but this handle.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use crate::error::{ExpenseError, ExpenseResult};

use super::file_io::{read_text, write_text_atomic};
use super::{KeyValueStorage, StorageEvent};

/// Default interval between change checks
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

const EXTENSION: &str = "json";

/// Key-value storage backed by files in one directory
pub struct FileStorage {
    dir: PathBuf,
    quota: Option<u64>,
    poll_interval: Duration,
    /// Last value this handle wrote per key (`None` = removed)
    own_writes: Arc<Mutex<HashMap<String, Option<String>>>>,
}

impl FileStorage {
    /// Create a storage over `dir`; the directory is created on first write
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            quota: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
            own_writes: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Limit the total size of all stored values
    pub fn with_quota(mut self, bytes: Option<u64>) -> Self {
        self.quota = bytes;
        self
    }

    /// Set how often `subscribe` checks for changes
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// The directory holding the key files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`
    pub fn path_for(&self, key: &str) -> ExpenseResult<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.{}", key, EXTENSION)))
    }

    fn record_own_write(&self, key: &str, value: Option<String>) -> ExpenseResult<()> {
        let mut own = self
            .own_writes
            .lock()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        own.insert(key.to_string(), value);
        Ok(())
    }

    fn check_quota(&self, key: &str, value: &str) -> ExpenseResult<()> {
        let Some(limit) = self.quota else {
            return Ok(());
        };

        let others: u64 = snapshot(&self.dir)?
            .into_iter()
            .filter(|(k, _)| k != key)
            .map(|(_, v)| v.len() as u64)
            .sum();
        let requested = others + value.len() as u64;

        if requested > limit {
            return Err(ExpenseError::QuotaExceeded { limit, requested });
        }
        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> ExpenseResult<Option<String>> {
        read_text(self.path_for(key)?)
    }

    fn set_item(&self, key: &str, value: &str) -> ExpenseResult<()> {
        let path = self.path_for(key)?;
        self.check_quota(key, value)?;
        write_text_atomic(&path, value)?;
        self.record_own_write(key, Some(value.to_string()))
    }

    fn remove_item(&self, key: &str) -> ExpenseResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => {
                return Err(ExpenseError::Storage(format!(
                    "Failed to remove {}: {}",
                    path.display(),
                    e
                )))
            }
        }
        self.record_own_write(key, None)
    }

    fn subscribe(&self) -> ExpenseResult<Receiver<StorageEvent>> {
        let (sender, receiver) = mpsc::channel();
        let dir = self.dir.clone();
        let interval = self.poll_interval;
        let own_writes = Arc::clone(&self.own_writes);
        let mut known = snapshot(&dir)?;

        thread::Builder::new()
            .name("storage-watch".into())
            .spawn(move || loop {
                thread::sleep(interval);

                let current = match snapshot(&dir) {
                    Ok(current) => current,
                    Err(e) => {
                        tracing::debug!(error = %e, "storage poll failed");
                        continue;
                    }
                };

                let events = diff_snapshots(&known, &current);
                known = current;

                for event in events {
                    let is_own = own_writes
                        .lock()
                        .map(|own| own.get(&event.key) == Some(&event.new_value))
                        .unwrap_or(false);
                    if is_own {
                        continue;
                    }
                    if sender.send(event).is_err() {
                        // Receiver dropped: stop watching
                        return;
                    }
                }
            })
            .map_err(|e| ExpenseError::Storage(format!("Failed to start watcher: {}", e)))?;

        Ok(receiver)
    }
}

/// Keys are used as file names, so only a safe character set is allowed
fn validate_key(key: &str) -> ExpenseResult<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        && !key.starts_with('.');
    if valid {
        Ok(())
    } else {
        Err(ExpenseError::Storage(format!("Invalid storage key: '{}'", key)))
    }
}

/// Current contents of every key file in `dir`
fn snapshot(dir: &Path) -> ExpenseResult<HashMap<String, String>> {
    let mut items = HashMap::new();

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(items),
        Err(e) => {
            return Err(ExpenseError::Storage(format!(
                "Failed to list {}: {}",
                dir.display(),
                e
            )))
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
            continue;
        }
        let Some(key) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        if let Some(contents) = read_text(&path)? {
            items.insert(key.to_string(), contents);
        }
    }

    Ok(items)
}

fn diff_snapshots(
    before: &HashMap<String, String>,
    after: &HashMap<String, String>,
) -> Vec<StorageEvent> {
    let mut events = Vec::new();

    for (key, new_value) in after {
        let old_value = before.get(key);
        if old_value != Some(new_value) {
            events.push(StorageEvent::new(
                key.clone(),
                old_value.cloned(),
                Some(new_value.clone()),
            ));
        }
    }

    for (key, old_value) in before {
        if !after.contains_key(key) {
            events.push(StorageEvent::new(key.clone(), Some(old_value.clone()), None));
        }
    }

    events.sort_by(|a, b| a.key.cmp(&b.key));
    events
}
