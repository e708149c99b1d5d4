//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Expense, ExpenseId};

/// Types of operations that can be audited
///
/// Records are never edited, so there is no update operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Record was added to the collection
    Create,
    /// Record was removed from the collection
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// Type of operation performed
    pub operation: Operation,

    /// ID of the affected record
    pub expense_id: ExpenseId,

    /// Description of the record at the time of the operation
    pub description: String,

    /// JSON snapshot of the record
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<serde_json::Value>,
}

impl AuditEntry {
    fn new(operation: Operation, expense: &Expense) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            expense_id: expense.id.clone(),
            description: expense.description.clone(),
            snapshot: serde_json::to_value(expense).ok(),
        }
    }

    /// Entry for a record added to the collection
    pub fn create(expense: &Expense) -> Self {
        Self::new(Operation::Create, expense)
    }

    /// Entry for a record removed from the collection
    pub fn delete(expense: &Expense) -> Self {
        Self::new(Operation::Delete, expense)
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        format!(
            "[{}] {} {} ({})",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.expense_id,
            self.description
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Money};
    use chrono::NaiveDate;

    fn sample() -> Expense {
        Expense::new(
            "Coffee",
            Money::from_cents(450),
            Category::Alimentacao,
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
        )
    }

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Create.to_string(), "CREATE");
        assert_eq!(Operation::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_create_entry() {
        let expense = sample();
        let entry = AuditEntry::create(&expense);

        assert_eq!(entry.operation, Operation::Create);
        assert_eq!(entry.expense_id, expense.id);
        assert_eq!(entry.description, "Coffee");
        let snapshot = entry.snapshot.unwrap();
        assert_eq!(snapshot["amount"], serde_json::json!(4.5));
    }

    #[test]
    fn test_serialization() {
        let entry = AuditEntry::delete(&sample());

        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"operation\":\"delete\""));
        let deserialized: AuditEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.operation, Operation::Delete);
    }

    #[test]
    fn test_human_readable_format() {
        let expense = sample();
        let formatted = AuditEntry::create(&expense).format_human_readable();
        assert!(formatted.contains("CREATE"));
        assert!(formatted.contains(expense.id.as_str()));
        assert!(formatted.contains("Coffee"));
    }
}
