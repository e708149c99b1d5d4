//! JSON Export functionality
//!
//! Exports the expense collection to JSON with schema versioning.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Category, Expense, Money};
use crate::services::summary;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full collection export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// All expenses, in list order
    pub expenses: Vec<Expense>,

    /// Export metadata
    pub metadata: ExportMetadata,
}

/// Totals and ranges for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    /// Number of expenses
    pub expense_count: usize,

    /// Sum of all amounts
    pub total: Money,

    /// Per-category totals, largest first
    pub totals_by_category: Vec<CategoryExportTotal>,

    /// Earliest expense date
    pub earliest_expense: Option<String>,

    /// Latest expense date
    pub latest_expense: Option<String>,
}

/// One category line of the metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryExportTotal {
    pub category: Category,
    pub total: Money,
    pub count: usize,
}

impl ExpenseExport {
    /// Build an export of `expenses`
    pub fn from_expenses(expenses: &[Expense]) -> Self {
        let metadata = ExportMetadata {
            expense_count: expenses.len(),
            total: summary::total_all(expenses),
            totals_by_category: summary::totals_by_category(expenses)
                .into_iter()
                .map(|t| CategoryExportTotal {
                    category: t.category,
                    total: t.total,
                    count: t.count,
                })
                .collect(),
            earliest_expense: expenses.iter().map(|e| e.date).min().map(|d| d.to_string()),
            latest_expense: expenses.iter().map(|e| e.date).max().map(|d| d.to_string()),
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            expenses: expenses.to_vec(),
            metadata,
        }
    }
}

/// Export the collection to JSON
pub fn export_json<W: Write>(expenses: &[Expense], writer: &mut W, pretty: bool) -> ExpenseResult<()> {
    let export = ExpenseExport::from_expenses(expenses);

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| ExpenseError::Export(e.to_string()))?;

    Ok(())
}
