//! Summary display formatting

use crate::config::Settings;
use crate::services::Summary;

/// Format running totals and the category breakdown
pub fn format_summary(summary: &Summary, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Expenses:      {}\n",
        summary.count
    ));
    output.push_str(&format!(
        "Total:         {}\n",
        settings.format_money(summary.total_all)
    ));
    output.push_str(&format!(
        "{:04}-{:02}:       {}\n",
        summary.year,
        summary.month,
        settings.format_money(summary.total_month)
    ));

    if summary.by_category.is_empty() {
        return output;
    }

    output.push_str("\nBy category:\n");
    let label_width = summary
        .by_category
        .iter()
        .map(|t| t.category.label(settings.locale).chars().count())
        .max()
        .unwrap_or(8);

    for entry in &summary.by_category {
        let label = entry.category.label(settings.locale);
        let padding = label_width - label.chars().count();
        output.push_str(&format!(
            "  {}{} {:>14} {:>6.1}%  ({})\n",
            label,
            " ".repeat(padding),
            settings.format_money(entry.total),
            entry.percentage_of(summary.total_all),
            entry.count
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Expense, Money};
    use chrono::NaiveDate;

    fn expense(cents: i64, category: Category) -> Expense {
        Expense::new(
            "Something",
            Money::from_cents(cents),
            category,
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
        )
    }

    #[test]
    fn test_empty_summary() {
        let summary = Summary::for_month(&[], 2024, 1);
        let output = format_summary(&summary, &Settings::default());
        assert!(output.contains("Expenses:      0"));
        assert!(output.contains("R$ 0,00"));
        assert!(!output.contains("By category"));
    }

    #[test]
    fn test_breakdown() {
        let expenses = vec![expense(200, Category::Transporte), expense(450, Category::Alimentacao)];
        let summary = Summary::for_month(&expenses, 2024, 1);
        let output = format_summary(&summary, &Settings::default());

        assert!(output.contains("Total:         R$ 6,50"));
        assert!(output.contains("2024-01:       R$ 6,50"));

        let food = output.find("Alimentação").unwrap();
        let transport = output.find("Transporte").unwrap();
        assert!(food < transport);
        assert!(output.contains("69.2%"));
    }
}
