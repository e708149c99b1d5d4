//! `audit` command
//!
//! Shows the most recent additions and removals from the audit log.

use crate::audit::AuditLogger;
use crate::config::ExpensePaths;
use crate::error::ExpenseResult;

/// Print the last `limit` audit entries, oldest first
pub fn handle_audit(paths: &ExpensePaths, limit: usize) -> ExpenseResult<()> {
    let logger = AuditLogger::new(paths.audit_log());
    print!("{}", format_audit_log(&logger, limit)?);
    Ok(())
}

fn format_audit_log(logger: &AuditLogger, limit: usize) -> ExpenseResult<String> {
    if !logger.exists() {
        return Ok(format!("No audit log at {}\n", logger.path().display()));
    }

    let total = logger.entry_count()?;
    let entries = logger.read_recent(limit)?;

    let mut output = String::new();
    for entry in &entries {
        output.push_str(&entry.format_human_readable());
        output.push('\n');
    }
    output.push_str(&format!("Showing {} of {} entries\n", entries.len(), total));
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::AuditEntry;
    use crate::models::{Category, Expense, Money};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn expense(description: &str) -> Expense {
        Expense::new(
            description,
            Money::from_cents(450),
            Category::Alimentacao,
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
        )
    }

    #[test]
    fn test_missing_log() {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("audit.log"));
        let output = format_audit_log(&logger, 10).unwrap();
        assert!(output.starts_with("No audit log at"));
    }

    #[test]
    fn test_recent_entries() {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("audit.log"));
        let coffee = expense("Coffee");
        logger.log(&AuditEntry::create(&coffee)).unwrap();
        logger.log(&AuditEntry::create(&expense("Lunch"))).unwrap();
        logger.log(&AuditEntry::delete(&coffee)).unwrap();

        let output = format_audit_log(&logger, 2).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("CREATE") && lines[0].ends_with("(Lunch)"));
        assert!(lines[1].contains("DELETE") && lines[1].ends_with("(Coffee)"));
        assert_eq!(lines[2], "Showing 2 of 3 entries");
    }
}
