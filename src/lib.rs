//! Expense Tracker - single-user expense tracking with local persistence
//!
//! Expenses are validated on entry, kept in an ordered list (newest first)
//! and persisted as one JSON collection in a key-value storage medium.
//! Running totals are computed for all time, the current month and each
//! category. Several handles may share one storage medium; each is told
//! about changes made by the others.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (expenses, money, categories, ids)
//! - `validation`: Form input validation
//! - `storage`: Key-value storage backends and the expense repository
//! - `services`: The expense store and aggregation
//! - `audit`: Audit logging of additions and removals
//! - `display`: Text formatting for the command line
//! - `export`: JSON, CSV and YAML export
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```
//! use expense_tracker::services::ExpenseStore;
//! use expense_tracker::storage::MemoryStorage;
//! use expense_tracker::validation::ExpenseInput;
//!
//! # fn main() -> Result<(), expense_tracker::ExpenseError> {
//! let mut store = ExpenseStore::open(MemoryStorage::new(), "expenses");
//! let expense = store.create(&ExpenseInput::new("Coffee", "4.50", "alimentacao", "2024-01-10"))?;
//! store.add(expense)?;
//! assert_eq!(store.total_all().to_string(), "4.50");
//! # Ok(())
//! # }
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;
pub mod validation;

pub use error::{ExpenseError, ExpenseResult};
