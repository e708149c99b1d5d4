//! Expense CLI commands
//!
//! Implements adding, listing and removing expenses.

use chrono::Local;
use clap::Args;

use super::{parse_year_month, warn_on_write_failure, CliStore, YearMonth};
use crate::config::Settings;
use crate::display::{format_expense_details, format_expense_table, Notification};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Category, Expense, Money};
use crate::validation::ExpenseInput;

/// Arguments of `add`
#[derive(Args, Debug)]
pub struct AddArgs {
    /// What the money was spent on
    pub description: String,
    /// Amount (e.g., "4.50" or "4,50")
    #[arg(allow_hyphen_values = true)]
    pub amount: String,
    /// Category key (see `categories`)
    #[arg(short, long)]
    pub category: Option<String>,
    /// Expense date (YYYY-MM-DD), defaults to today
    #[arg(short, long)]
    pub date: Option<String>,
}

/// Arguments of `list`
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only show this category
    #[arg(short, long)]
    pub category: Option<Category>,
    /// Only show this month (YYYY-MM)
    #[arg(short, long, value_parser = parse_year_month)]
    pub month: Option<YearMonth>,
    /// Number of expenses to show
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Validate and add an expense
///
/// Field errors are printed one per line before the validation error is
/// returned.
pub fn handle_add(store: &mut CliStore, settings: &Settings, args: AddArgs) -> ExpenseResult<()> {
    let today = Local::now().date_naive();
    let input = ExpenseInput {
        description: args.description,
        amount: args.amount,
        category: args.category,
        date: Some(args.date.unwrap_or_else(|| today.to_string())),
    };

    let expense = match store.create_on(&input, today) {
        Ok(expense) => expense,
        Err(e) => {
            if let Some(errors) = e.validation_errors() {
                for error in errors.iter() {
                    eprintln!("  {}", error);
                }
            }
            return Err(e);
        }
    };

    let details = format_expense_details(&expense, settings);
    warn_on_write_failure(store.add(expense))?;

    println!("{}", Notification::success("Expense added"));
    print!("{}", details);
    Ok(())
}

/// List expenses, newest first
pub fn handle_list(store: &CliStore, settings: &Settings, args: ListArgs) -> ExpenseResult<()> {
    let selected: Vec<Expense> = store
        .expenses()
        .iter()
        .filter(|e| args.category.map_or(true, |c| e.category == c))
        .filter(|e| args.month.map_or(true, |m| e.is_in_month(m.year, m.month)))
        .take(args.limit.unwrap_or(usize::MAX))
        .cloned()
        .collect();

    println!("{}", format_expense_table(&selected, settings));

    if !selected.is_empty() {
        let total: Money = selected.iter().map(|e| e.amount).sum();
        println!(
            "{} expense(s), {}",
            selected.len(),
            settings.format_money(total)
        );
    }
    Ok(())
}

/// Remove an expense by id or unique id prefix
pub fn handle_remove(store: &mut CliStore, settings: &Settings, id: &str) -> ExpenseResult<()> {
    let id = store.resolve_id(id)?;

    let removed = match store.remove(&id) {
        Ok(removed) => removed,
        Err(e @ (ExpenseError::PersistenceWrite(_) | ExpenseError::QuotaExceeded { .. })) => {
            eprintln!("{}", Notification::from_error(&e));
            None
        }
        Err(e) => return Err(e),
    };

    match removed {
        Some(expense) => println!(
            "{}",
            Notification::success(format!(
                "Removed '{}' ({})",
                expense.description,
                settings.format_money(expense.amount)
            ))
        ),
        None => println!("{}", Notification::info(format!("Expense {} removed", id.short()))),
    }
    Ok(())
}
