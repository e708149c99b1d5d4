//! Validation of raw expense input
//!
//! Form values arrive as strings. Every field is checked and all failures are
//! returned together so the caller can mark each field at once.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{Category, Expense, Money, MoneyParseError};

/// Minimum number of characters in a trimmed description
pub const MIN_DESCRIPTION_CHARS: usize = 3;

/// Date format accepted for the `date` field
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Form fields of an expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Description,
    Amount,
    Category,
    Date,
}

impl Field {
    /// The field name as used by forms
    pub fn name(&self) -> &'static str {
        match self {
            Self::Description => "description",
            Self::Amount => "amount",
            Self::Category => "category",
            Self::Date => "date",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single failed field with a human-readable message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// All field failures of one submission, in form order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: Field, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Message for a given field, if it failed
    pub fn message_for(&self, field: Field) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn has_field(&self, field: Field) -> bool {
        self.message_for(field).is_some()
    }
}

impl From<Vec<FieldError>> for ValidationErrors {
    fn from(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Raw values of the expense form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseInput {
    pub description: String,
    pub amount: String,
    pub category: Option<String>,
    pub date: Option<String>,
}

impl ExpenseInput {
    pub fn new(
        description: impl Into<String>,
        amount: impl Into<String>,
        category: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            amount: amount.into(),
            category: Some(category.into()),
            date: Some(date.into()),
        }
    }

    /// Validate against the local calendar date
    pub fn validate(&self) -> Result<ValidExpense, ValidationErrors> {
        self.validate_on(Local::now().date_naive())
    }

    /// Validate against an explicit "today"
    ///
    /// Only the calendar date matters: an expense dated `today` is accepted
    /// whatever the time of day.
    pub fn validate_on(&self, today: NaiveDate) -> Result<ValidExpense, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let description = self.description.trim();
        if description.chars().count() < MIN_DESCRIPTION_CHARS {
            errors.push(
                Field::Description,
                format!(
                    "Description must be at least {} characters",
                    MIN_DESCRIPTION_CHARS
                ),
            );
        }

        let amount = match Money::parse(&self.amount) {
            Ok(amount) if amount > Money::MAX_EXPENSE => {
                errors.push(
                    Field::Amount,
                    format!("Amount must not exceed {}", Money::MAX_EXPENSE),
                );
                None
            }
            Ok(amount) if amount.is_positive() => Some(amount),
            Ok(_) => {
                errors.push(Field::Amount, "Amount must be greater than zero");
                None
            }
            Err(MoneyParseError::Empty) => {
                errors.push(Field::Amount, "Amount is required");
                None
            }
            Err(_) => {
                errors.push(Field::Amount, "Amount must be a valid number");
                None
            }
        };

        let category = match self.category.as_deref().map(str::trim) {
            None | Some("") => {
                errors.push(Field::Category, "Category is required");
                None
            }
            Some(key) => match Category::from_key(key) {
                Some(category) => Some(category),
                None => {
                    errors.push(Field::Category, format!("Unknown category '{}'", key));
                    None
                }
            },
        };

        let date = match self.date.as_deref().map(str::trim) {
            None | Some("") => {
                errors.push(Field::Date, "Date is required");
                None
            }
            Some(raw) => match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
                Ok(date) if date > today => {
                    errors.push(Field::Date, "Date cannot be in the future");
                    None
                }
                Ok(date) => Some(date),
                Err(_) => {
                    errors.push(Field::Date, "Date must use the YYYY-MM-DD format");
                    None
                }
            },
        };

        match (amount, category, date) {
            (Some(amount), Some(category), Some(date)) if errors.is_empty() => Ok(ValidExpense {
                description: description.to_string(),
                amount,
                category,
                date,
            }),
            _ => Err(errors),
        }
    }
}

/// Input that passed validation, ready to become a record
#[derive(Debug, Clone, PartialEq)]
pub struct ValidExpense {
    pub description: String,
    pub amount: Money,
    pub category: Category,
    pub date: NaiveDate,
}

impl ValidExpense {
    /// Assign a fresh id and creation timestamp
    pub fn into_expense(self) -> Expense {
        Expense::new(self.description, self.amount, self.category, self.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    fn valid_input() -> ExpenseInput {
        ExpenseInput::new("Coffee", "4.5", "alimentacao", "2024-01-10")
    }

    #[test]
    fn test_valid_input() {
        let valid = valid_input().validate_on(today()).unwrap();
        assert_eq!(valid.description, "Coffee");
        assert_eq!(valid.amount.cents(), 450);
        assert_eq!(valid.category, Category::Alimentacao);
        assert_eq!(valid.date, NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
    }

    #[test]
    fn test_description_is_trimmed() {
        let mut input = valid_input();
        input.description = "   Bus ticket  ".into();
        let valid = input.validate_on(today()).unwrap();
        assert_eq!(valid.description, "Bus ticket");
    }

    #[test]
    fn test_short_description() {
        let mut input = valid_input();
        input.description = "ab".into();
        let errors = input.validate_on(today()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.has_field(Field::Description));

        input.description = "  ab  ".into();
        assert!(input.validate_on(today()).is_err());

        input.description = "abc".into();
        assert!(input.validate_on(today()).is_ok());
    }

    #[test]
    fn test_description_counts_characters_not_bytes() {
        let mut input = valid_input();
        input.description = "pão".into();
        assert!(input.validate_on(today()).is_ok());
    }

    #[test]
    fn test_amount_rules() {
        let cases = [
            ("0", false),
            ("-5", false),
            ("abc", false),
            ("", false),
            ("NaN", false),
            ("inf", false),
            ("0.001", false),
            ("0.01", true),
            ("12,90", true),
        ];
        for (amount, ok) in cases {
            let mut input = valid_input();
            input.amount = amount.into();
            let result = input.validate_on(today());
            assert_eq!(result.is_ok(), ok, "amount {:?}", amount);
            if let Err(errors) = result {
                assert!(errors.has_field(Field::Amount));
            }
        }
    }

    #[test]
    fn test_amount_upper_bound() {
        let mut input = valid_input();
        input.amount = "999999999.99".into();
        assert!(input.validate_on(today()).is_ok());

        input.amount = "1000000000".into();
        let errors = input.validate_on(today()).unwrap_err();
        assert_eq!(
            errors.message_for(Field::Amount),
            Some("Amount must not exceed 999999999.99")
        );

        input.amount = "90000000000000000".into();
        assert!(input.validate_on(today()).unwrap_err().has_field(Field::Amount));
    }

    #[test]
    fn test_category_rules() {
        let mut input = valid_input();
        input.category = None;
        let errors = input.validate_on(today()).unwrap_err();
        assert_eq!(errors.message_for(Field::Category), Some("Category is required"));

        input.category = Some("groceries".into());
        let errors = input.validate_on(today()).unwrap_err();
        assert!(errors.has_field(Field::Category));

        input.category = Some(" Transporte ".into());
        assert!(input.validate_on(today()).is_ok());
    }

    #[test]
    fn test_future_date_rejected() {
        let mut input = valid_input();
        input.date = Some("2024-01-16".into());
        let errors = input.validate_on(today()).unwrap_err();
        assert_eq!(
            errors.message_for(Field::Date),
            Some("Date cannot be in the future")
        );
    }

    #[test]
    fn test_today_accepted() {
        let mut input = valid_input();
        input.date = Some("2024-01-15".into());
        assert!(input.validate_on(today()).is_ok());
    }

    #[test]
    fn test_missing_and_malformed_date() {
        let mut input = valid_input();
        input.date = None;
        assert!(input.validate_on(today()).unwrap_err().has_field(Field::Date));

        input.date = Some("10/01/2024".into());
        let errors = input.validate_on(today()).unwrap_err();
        assert_eq!(
            errors.message_for(Field::Date),
            Some("Date must use the YYYY-MM-DD format")
        );
    }

    #[test]
    fn test_all_failures_reported_together() {
        let input = ExpenseInput {
            description: "x".into(),
            amount: "-1".into(),
            category: Some("nope".into()),
            date: Some("2099-01-01".into()),
        };
        let errors = input.validate_on(today()).unwrap_err();
        let fields: Vec<Field> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![Field::Description, Field::Amount, Field::Category, Field::Date]
        );
    }

    #[test]
    fn test_errors_display() {
        let input = ExpenseInput {
            description: "ab".into(),
            amount: "0".into(),
            category: Some("alimentacao".into()),
            date: Some("2024-01-10".into()),
        };
        let errors = input.validate_on(today()).unwrap_err();
        assert_eq!(
            errors.to_string(),
            "description: Description must be at least 3 characters; amount: Amount must be greater than zero"
        );
    }

    #[test]
    fn test_into_expense_assigns_identity() {
        let first = valid_input().validate_on(today()).unwrap().into_expense();
        let second = valid_input().validate_on(today()).unwrap().into_expense();
        assert_ne!(first.id, second.id);
        assert!(first.same_details(&second));
    }
}
