//! Custom error types for the expense tracker
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

use crate::validation::ValidationErrors;

/// The main error type for expense tracker operations
#[derive(Error, Debug)]
pub enum ExpenseError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// One or more form fields failed validation
    #[error("Validation error: {0}")]
    Validation(ValidationErrors),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// An id prefix matched more than one record
    #[error("Ambiguous id '{prefix}': matches {matches} expenses")]
    AmbiguousId { prefix: String, matches: usize },

    /// The persisted collection could not be read or parsed
    #[error("Could not read saved expenses: {0}")]
    PersistenceRead(String),

    /// The collection could not be written back to storage
    #[error("Could not save expenses: {0}")]
    PersistenceWrite(String),

    /// A storage backend refused a write because it would exceed its quota
    #[error("Storage quota exceeded: {requested} bytes requested, limit is {limit} bytes")]
    QuotaExceeded { limit: u64, requested: u64 },

    /// Storage backend errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl ExpenseError {
    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Whether the application keeps working normally after this error.
    ///
    /// Validation and persistence failures leave the store in a usable
    /// state; the caller only needs to tell the user.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::PersistenceRead(_)
                | Self::PersistenceWrite(_)
                | Self::QuotaExceeded { .. }
                | Self::NotFound { .. }
                | Self::AmbiguousId { .. }
        )
    }

    /// The field-level failures, if this is a validation error
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<ValidationErrors> for ExpenseError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for ExpenseError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ExpenseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for expense tracker operations
pub type ExpenseResult<T> = Result<T, ExpenseError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{Field, FieldError};

    #[test]
    fn test_error_display() {
        let err = ExpenseError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = ExpenseError::expense_not_found("3f2a9c1e");
        assert_eq!(err.to_string(), "Expense not found: 3f2a9c1e");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_quota_error_display() {
        let err = ExpenseError::QuotaExceeded {
            limit: 100,
            requested: 250,
        };
        assert_eq!(
            err.to_string(),
            "Storage quota exceeded: 250 bytes requested, limit is 100 bytes"
        );
    }

    #[test]
    fn test_validation_conversion() {
        let errors = ValidationErrors::from(vec![FieldError::new(
            Field::Description,
            "Description must be at least 3 characters",
        )]);
        let err: ExpenseError = errors.into();
        assert!(err.is_validation());
        assert!(err.is_recoverable());
        assert_eq!(err.validation_errors().unwrap().len(), 1);
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ExpenseError = io_err.into();
        assert!(matches!(err, ExpenseError::Io(_)));
        assert!(!err.is_recoverable());
    }
}
