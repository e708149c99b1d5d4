//! Summary and category CLI commands

use super::{CliStore, YearMonth};
use crate::config::Settings;
use crate::display::{format_category_list, format_summary};
use crate::error::ExpenseResult;
use crate::services::Summary;

/// Print the running totals, for `month` or the current month
pub fn handle_summary(
    store: &CliStore,
    settings: &Settings,
    month: Option<YearMonth>,
) -> ExpenseResult<()> {
    let month = month.unwrap_or_else(YearMonth::current);
    let summary = Summary::for_month(store.expenses(), month.year, month.month);
    print!("{}", format_summary(&summary, settings));
    Ok(())
}

/// Print the category keys and their labels
pub fn handle_categories(settings: &Settings) -> ExpenseResult<()> {
    print!("{}", format_category_list(settings));
    Ok(())
}
