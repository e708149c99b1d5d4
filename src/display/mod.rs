//! Display formatting for terminal output
//!
//! Formats expense lists, summaries and notifications for the CLI.

pub mod expense;
pub mod notification;
pub mod summary;

pub use expense::{format_category_list, format_expense_details, format_expense_table};
pub use notification::{Notification, NotificationType};
pub use summary::format_summary;
