//! Service layer for the expense tracker
//!
//! The service layer provides the expense store on top of the storage layer,
//! handling validation, persistence policy and derived totals.

pub mod expense;
pub mod summary;

pub use expense::ExpenseStore;
pub use summary::{CategoryTotal, Summary};
