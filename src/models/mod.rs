//! Core data models for the expense tracker
//!
//! This module contains the data structures of the expense domain: the
//! expense record, its identifier, amounts and categories.

pub mod category;
pub mod expense;
pub mod ids;
pub mod money;

pub use category::{Category, Locale, UnknownCategory};
pub use expense::Expense;
pub use ids::ExpenseId;
pub use money::{Money, MoneyParseError};
