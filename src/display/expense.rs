//! Expense display formatting
//!
//! Formats expenses as tables and detail blocks using the configured locale
//! and currency symbol.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::config::Settings;
use crate::models::{Category, Expense};

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format expenses as a table, in list order
pub fn format_expense_table(expenses: &[Expense], settings: &Settings) -> String {
    if expenses.is_empty() {
        return "No expenses found.".to_string();
    }

    let rows = expenses.iter().map(|e| ExpenseRow {
        id: e.id.short().to_string(),
        date: e.date.format(&settings.date_format).to_string(),
        description: truncate(&e.description, 40),
        category: e.category.label(settings.locale).to_string(),
        amount: settings.format_money(e.amount),
    });

    Table::new(rows).with(Style::sharp()).to_string()
}

/// Format a single expense for display
pub fn format_expense_details(expense: &Expense, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense:     {}\n", expense.id));
    output.push_str(&format!("Description: {}\n", expense.description));
    output.push_str(&format!("Amount:      {}\n", settings.format_money(expense.amount)));
    output.push_str(&format!(
        "Category:    {} ({})\n",
        expense.category.label(settings.locale),
        expense.category.key()
    ));
    output.push_str(&format!(
        "Date:        {}\n",
        expense.date.format(&settings.date_format)
    ));
    output.push_str(&format!(
        "Created:     {}\n",
        expense.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}

/// Format the fixed category set with keys and labels
pub fn format_category_list(settings: &Settings) -> String {
    let mut output = String::new();
    output.push_str(&format!("{:14} {}\n", "Key", "Label"));
    output.push_str(&"-".repeat(34));
    output.push('\n');

    for category in Category::ALL {
        output.push_str(&format!(
            "{:14} {}\n",
            category.key(),
            category.label(settings.locale)
        ));
    }

    output
}

/// Truncate a string to a maximum number of characters
fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Locale, Money};
    use chrono::NaiveDate;

    fn coffee() -> Expense {
        Expense::new(
            "Coffee",
            Money::from_cents(450),
            Category::Alimentacao,
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
        )
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(format_expense_table(&[], &Settings::default()), "No expenses found.");
    }

    #[test]
    fn test_table_uses_locale() {
        let expense = coffee();
        let table = format_expense_table(std::slice::from_ref(&expense), &Settings::default());
        assert!(table.contains("Coffee"));
        assert!(table.contains("Alimentação"));
        assert!(table.contains("R$ 4,50"));
        assert!(table.contains("10/01/2024"));
        assert!(table.contains(expense.id.short()));

        let english = Settings {
            locale: Locale::En,
            currency_symbol: "$".into(),
            date_format: "%Y-%m-%d".into(),
            ..Settings::default()
        };
        let table = format_expense_table(&[expense], &english);
        assert!(table.contains("Food"));
        assert!(table.contains("$4.50"));
        assert!(table.contains("2024-01-10"));
    }

    #[test]
    fn test_details() {
        let expense = coffee();
        let details = format_expense_details(&expense, &Settings::default());
        assert!(details.contains(expense.id.as_str()));
        assert!(details.contains("Alimentação (alimentacao)"));
    }

    #[test]
    fn test_category_list() {
        let list = format_category_list(&Settings::default());
        assert!(list.contains("educacao"));
        assert!(list.contains("Educação"));
        assert_eq!(list.lines().count(), 2 + Category::ALL.len());
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long description", 10), "a very ...");
        assert_eq!(truncate("açaí açaí açaí", 8), "açaí ...");
    }
}
