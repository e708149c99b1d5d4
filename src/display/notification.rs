//! User-visible notifications
//!
//! Short, non-blocking messages shown after a command, such as a failed save
//! whose changes are still held in memory.

use std::fmt;

use crate::error::ExpenseError;

/// Type of notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationType {
    /// Informational message
    Info,
    /// Success message
    Success,
    /// Warning message
    Warning,
    /// Error message
    Error,
}

impl NotificationType {
    /// Get the icon/prefix for this notification type
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Info => "i",
            Self::Success => "+",
            Self::Warning => "!",
            Self::Error => "x",
        }
    }

    /// Get the title for this notification type
    pub fn title(&self) -> &'static str {
        match self {
            Self::Info => "Info",
            Self::Success => "Success",
            Self::Warning => "Warning",
            Self::Error => "Error",
        }
    }
}

/// A one-line message printed after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub notification_type: NotificationType,
}

impl Notification {
    /// Create a new notification
    pub fn new(message: impl Into<String>, notification_type: NotificationType) -> Self {
        Self {
            message: message.into(),
            notification_type,
        }
    }

    /// Create an info notification
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, NotificationType::Info)
    }

    /// Create a success notification
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, NotificationType::Success)
    }

    /// Create a warning notification
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, NotificationType::Warning)
    }

    /// Create an error notification
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NotificationType::Error)
    }

    /// Notification for an error the application recovers from
    ///
    /// Write failures become warnings that mention the data is still held in
    /// memory; read failures say the saved data was discarded.
    pub fn from_error(error: &ExpenseError) -> Self {
        match error {
            ExpenseError::PersistenceWrite(_) | ExpenseError::QuotaExceeded { .. } => {
                Self::warning(format!(
                    "{}. Your changes are kept for this session but were not saved.",
                    error
                ))
            }
            ExpenseError::PersistenceRead(_) => Self::warning(format!(
                "{}. Starting with an empty list.",
                error
            )),
            e if e.is_recoverable() => Self::warning(e.to_string()),
            e => Self::error(e.to_string()),
        }
    }

}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.notification_type.icon(),
            self.notification_type.title(),
            self.message
        )
    }
}
