//! Expense aggregates
//!
//! Running totals derived from the expense list: all-time, per calendar
//! month, and per category.

use chrono::{Datelike, Local, NaiveDate};

use crate::models::{Category, Expense, Money};

/// Total spent in one category
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    /// The category
    pub category: Category,
    /// Sum of amounts in this category
    pub total: Money,
    /// Number of records in this category
    pub count: usize,
}

impl CategoryTotal {
    /// Share of `overall` spent in this category, as a percentage
    pub fn percentage_of(&self, overall: Money) -> f64 {
        self.total.percentage_of(overall)
    }
}

/// Sum of all amounts; zero for an empty list
pub fn total_all(expenses: &[Expense]) -> Money {
    expenses.iter().map(|e| e.amount).sum()
}

/// Sum of amounts dated in the given calendar month
pub fn total_for_month(expenses: &[Expense], year: i32, month: u32) -> Money {
    expenses
        .iter()
        .filter(|e| e.is_in_month(year, month))
        .map(|e| e.amount)
        .sum()
}

/// Sum of amounts dated in the current local calendar month
pub fn total_current_month(expenses: &[Expense]) -> Money {
    let today = Local::now().date_naive();
    total_for_month(expenses, today.year(), today.month())
}

/// Totals grouped by category, largest first
///
/// Categories with equal totals keep the order in which they first appear
/// in the list.
pub fn totals_by_category(expenses: &[Expense]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();

    for expense in expenses {
        match totals.iter_mut().find(|t| t.category == expense.category) {
            Some(entry) => {
                entry.total += expense.amount;
                entry.count += 1;
            }
            None => totals.push(CategoryTotal {
                category: expense.category,
                total: expense.amount,
                count: 1,
            }),
        }
    }

    // sort_by is stable, so ties stay in first-appearance order
    totals.sort_by(|a, b| b.total.cmp(&a.total));
    totals
}

/// All aggregates of a list, computed together for display
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// Number of records
    pub count: usize,
    /// All-time total
    pub total_all: Money,
    /// Year of the month total
    pub year: i32,
    /// Month (1-12) of the month total
    pub month: u32,
    /// Total of records dated in `year`/`month`
    pub total_month: Money,
    /// Per-category totals, largest first
    pub by_category: Vec<CategoryTotal>,
}

impl Summary {
    /// Summarize with the month taken from `reference`
    pub fn for_date(expenses: &[Expense], reference: NaiveDate) -> Self {
        Self::for_month(expenses, reference.year(), reference.month())
    }

    /// Summarize with an explicit month
    pub fn for_month(expenses: &[Expense], year: i32, month: u32) -> Self {
        Self {
            count: expenses.len(),
            total_all: total_all(expenses),
            year,
            month,
            total_month: total_for_month(expenses, year, month),
            by_category: totals_by_category(expenses),
        }
    }

    /// Summarize with the current local month
    pub fn current(expenses: &[Expense]) -> Self {
        Self::for_date(expenses, Local::now().date_naive())
    }
}
