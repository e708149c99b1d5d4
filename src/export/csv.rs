//! CSV Export functionality
//!
//! Exports expenses to CSV, one row per record in list order.

use std::io::Write;

use serde::Serialize;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, Locale};

#[derive(Serialize)]
struct CsvRow<'a> {
    #[serde(rename = "ID")]
    id: &'a str,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Description")]
    description: &'a str,
    #[serde(rename = "Category")]
    category: &'static str,
    #[serde(rename = "Category Label")]
    category_label: &'static str,
    #[serde(rename = "Amount")]
    amount: String,
    #[serde(rename = "Created At")]
    created_at: String,
}

/// Export expenses to CSV
pub fn export_expenses_csv<W: Write>(
    expenses: &[Expense],
    locale: Locale,
    writer: W,
) -> ExpenseResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for expense in expenses {
        csv_writer
            .serialize(CsvRow {
                id: expense.id.as_str(),
                date: expense.date.to_string(),
                description: &expense.description,
                category: expense.category.key(),
                category_label: expense.category.label(locale),
                amount: expense.amount.to_string(),
                created_at: expense.created_at.to_rfc3339(),
            })
            .map_err(|e| ExpenseError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| ExpenseError::Export(e.to_string()))?;

    Ok(())
}
