//! User settings for the expense tracker
//!
//! Display preferences, the storage key of the collection, the optional
//! storage quota and the change-polling interval.

use std::time::Duration;

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use super::paths::ExpensePaths;
use crate::error::ExpenseError;
use crate::models::{Locale, Money};
use crate::storage::file::DEFAULT_POLL_INTERVAL;
use crate::storage::{read_json, write_json_atomic, DEFAULT_EXPENSES_KEY};

/// User settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Language for labels and amount formatting
    #[serde(default)]
    pub locale: Locale,

    /// Currency symbol shown before amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Storage key holding the expense collection
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Maximum bytes the data directory may hold, if limited
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_quota_bytes: Option<u64>,

    /// How often `watch` checks for changes, in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub sync_poll_interval_ms: u64,

    /// Whether additions and removals are written to the audit log
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "R$ ".to_string()
}

fn default_date_format() -> String {
    "%d/%m/%Y".to_string()
}

fn default_storage_key() -> String {
    DEFAULT_EXPENSES_KEY.to_string()
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL.as_millis() as u64
}

fn default_audit_enabled() -> bool {
    true
}

/// Whether chrono can render dates with `format`
pub fn is_valid_date_format(format: &str) -> bool {
    !format.is_empty() && !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            locale: Locale::default(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            storage_key: default_storage_key(),
            storage_quota_bytes: None,
            sync_poll_interval_ms: default_poll_interval_ms(),
            audit_enabled: default_audit_enabled(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults if the file doesn't exist
    ///
    /// An unusable `date_format` is replaced by the default.
    pub fn load_or_create(paths: &ExpensePaths) -> Result<Self, ExpenseError> {
        let mut settings: Settings = read_json(paths.settings_file())
            .map_err(|e| ExpenseError::Config(format!("Failed to load settings: {}", e)))?;

        if !is_valid_date_format(&settings.date_format) {
            tracing::warn!(
                date_format = %settings.date_format,
                "invalid date format in settings, using the default"
            );
            settings.date_format = default_date_format();
        }

        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ExpensePaths) -> Result<(), ExpenseError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }

    /// Polling interval for change notifications
    pub fn sync_poll_interval(&self) -> Duration {
        Duration::from_millis(self.sync_poll_interval_ms.max(1))
    }

    /// Format an amount with the configured symbol and locale
    pub fn format_money(&self, amount: Money) -> String {
        amount.format_with(&self.currency_symbol, self.locale.decimal_separator())
    }
}
