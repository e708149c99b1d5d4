//! Expense record model
//!
//! Field names on disk are camelCase (`createdAt`) to stay compatible with
//! collections written by earlier versions of the tracker.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::category::Category;
use super::ids::ExpenseId;
use super::money::Money;

/// A single expense entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,

    /// What the money was spent on (trimmed)
    pub description: String,

    /// Amount spent, always positive for records created through validation
    pub amount: Money,

    /// Category key
    pub category: Category,

    /// Calendar date of the expense
    pub date: NaiveDate,

    /// When the record was created. Audit only, never used for ordering.
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Create a new record with a fresh id and creation timestamp
    ///
    /// No validation happens here; use [`crate::validation::ExpenseInput`] for
    /// user-supplied data.
    pub fn new(
        description: impl Into<String>,
        amount: Money,
        category: Category,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: ExpenseId::new(),
            description: description.into(),
            amount,
            category,
            date,
            created_at: Utc::now(),
        }
    }

    /// Check if the expense date falls in the given calendar month
    pub fn is_in_month(&self, year: i32, month: u32) -> bool {
        self.date.year() == year && self.date.month() == month
    }

    /// Compare the user-visible fields, ignoring id and creation time
    pub fn same_details(&self, other: &Expense) -> bool {
        self.description == other.description
            && self.amount == other.amount
            && self.category == other.category
            && self.date == other.date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_new_expense() {
        let expense = Expense::new(
            "Coffee",
            Money::from_cents(450),
            Category::Alimentacao,
            date("2024-01-10"),
        );
        assert_eq!(expense.description, "Coffee");
        assert_eq!(expense.amount.cents(), 450);
        assert!(expense.created_at <= Utc::now());
    }

    #[test]
    fn test_is_in_month() {
        let expense = Expense::new(
            "Bus",
            Money::from_cents(200),
            Category::Transporte,
            date("2024-01-31"),
        );
        assert!(expense.is_in_month(2024, 1));
        assert!(!expense.is_in_month(2024, 2));
        assert!(!expense.is_in_month(2023, 1));
    }

    #[test]
    fn test_persisted_shape() {
        let mut expense = Expense::new(
            "Coffee",
            Money::from_cents(450),
            Category::Alimentacao,
            date("2024-01-10"),
        );
        expense.id = ExpenseId::from("abc123");
        expense.created_at = DateTime::parse_from_rfc3339("2024-01-10T12:30:00Z")
            .unwrap()
            .with_timezone(&Utc);

        let value = serde_json::to_value(&expense).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": "abc123",
                "description": "Coffee",
                "amount": 4.5,
                "category": "alimentacao",
                "date": "2024-01-10",
                "createdAt": "2024-01-10T12:30:00Z"
            })
        );
    }

    #[test]
    fn test_reads_browser_written_record() {
        let json = r#"{
            "id": "lrk2x0a1b4fzyo82mvyr",
            "description": "Cinema",
            "amount": 32,
            "category": "lazer",
            "date": "2024-02-03",
            "createdAt": "2024-02-03T21:04:11.512Z"
        }"#;
        let expense: Expense = serde_json::from_str(json).unwrap();
        assert_eq!(expense.amount.cents(), 3200);
        assert_eq!(expense.category, Category::Lazer);
        assert_eq!(expense.date, date("2024-02-03"));
    }

    #[test]
    fn test_same_details_ignores_identity() {
        let a = Expense::new("Bus", Money::from_cents(200), Category::Transporte, date("2024-01-10"));
        let b = Expense::new("Bus", Money::from_cents(200), Category::Transporte, date("2024-01-10"));
        assert_ne!(a.id, b.id);
        assert!(a.same_details(&b));
    }
}
