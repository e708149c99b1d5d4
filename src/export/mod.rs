//! Export module for the expense tracker
//!
//! Writes the expense collection in several formats:
//! - CSV: one row per expense (spreadsheet-compatible)
//! - JSON: versioned export with summary metadata
//! - YAML: the same export, human-readable

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_expenses_csv;
pub use self::json::{export_json, ExpenseExport, EXPORT_SCHEMA_VERSION};
pub use self::yaml::export_yaml;
