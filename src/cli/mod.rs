//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the expense store.

pub mod audit;
pub mod expense;
pub mod export;
pub mod summary;
pub mod watch;

use std::fmt;

use chrono::{Datelike, Local, NaiveDate};

use crate::audit::AuditLogger;
use crate::config::{ExpensePaths, Settings};
use crate::display::Notification;
use crate::error::{ExpenseError, ExpenseResult};
use crate::services::ExpenseStore;
use crate::storage::FileStorage;

pub use audit::handle_audit;
pub use expense::{handle_add, handle_list, handle_remove, AddArgs, ListArgs};
pub use export::{handle_export, ExportArgs, ExportFormat};
pub use summary::{handle_categories, handle_summary};
pub use watch::handle_watch;

/// The store as used by the command line: one file per key in the data dir
pub type CliStore = ExpenseStore<FileStorage>;

/// Open the expense collection configured by `settings`
///
/// A collection that could not be read is reported as a warning; the store
/// starts empty in that case.
pub fn open_store(paths: &ExpensePaths, settings: &Settings) -> ExpenseResult<CliStore> {
    paths.ensure_directories()?;

    let storage = FileStorage::new(paths.data_dir())
        .with_quota(settings.storage_quota_bytes)
        .with_poll_interval(settings.sync_poll_interval());

    let mut store = ExpenseStore::open(storage, settings.storage_key.clone());
    if settings.audit_enabled {
        store = store.with_audit_log(AuditLogger::new(paths.audit_log()));
    }

    if let Some(err) = store.last_read_error() {
        eprintln!("{}", Notification::from_error(err));
    }

    Ok(store)
}

/// Show a warning for failed writes instead of failing the command
///
/// The change is still applied to the in-memory list, so the command
/// reports what it did and exits successfully.
pub(crate) fn warn_on_write_failure(result: ExpenseResult<()>) -> ExpenseResult<()> {
    match result {
        Err(e @ (ExpenseError::PersistenceWrite(_) | ExpenseError::QuotaExceeded { .. })) => {
            eprintln!("{}", Notification::from_error(&e));
            Ok(())
        }
        other => other,
    }
}

/// A calendar month given as `YYYY-MM`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    /// The month containing today's local date
    pub fn current() -> Self {
        Self::of(Local::now().date_naive())
    }

    /// The month containing `date`
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Parse a `--month` argument
pub fn parse_year_month(s: &str) -> Result<YearMonth, String> {
    NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .map(YearMonth::of)
        .map_err(|_| format!("Invalid month '{}'. Use YYYY-MM", s))
}
