//! Audit trail for expense records
//!
//! Every record added to or removed from the collection can be appended to a
//! line-delimited JSON log, with a snapshot of the record. The record's
//! `createdAt` timestamp exists for this trail and plays no part in ordering.
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_tracker::audit::{AuditEntry, AuditLogger};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log(&AuditEntry::create(&expense))?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
