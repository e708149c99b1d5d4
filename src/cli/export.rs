//! CLI command for data export
//!
//! Writes the expense collection to a file in the chosen format.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::{Args, ValueEnum};

use super::CliStore;
use crate::config::Settings;
use crate::display::Notification;
use crate::error::{ExpenseError, ExpenseResult};
use crate::export::{export_expenses_csv, export_json, export_yaml};

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// JSON with schema version and totals
    Json,
    /// CSV, one row per expense
    Csv,
    /// YAML, human-readable
    Yaml,
}

/// Arguments of `export`
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output file path
    pub output: PathBuf,

    /// Export format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: ExportFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Handle the export command
pub fn handle_export(store: &CliStore, settings: &Settings, args: ExportArgs) -> ExpenseResult<()> {
    if let Some(parent) = args.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| ExpenseError::Export(format!("Failed to create {}: {}", parent.display(), e)))?;
    }

    let file = File::create(&args.output).map_err(|e| {
        ExpenseError::Export(format!("Failed to create {}: {}", args.output.display(), e))
    })?;
    let mut writer = BufWriter::new(file);

    let expenses = store.expenses();
    match args.format {
        ExportFormat::Json => export_json(expenses, &mut writer, args.pretty)?,
        ExportFormat::Csv => export_expenses_csv(expenses, settings.locale, &mut writer)?,
        ExportFormat::Yaml => export_yaml(expenses, &mut writer)?,
    }
    writer
        .flush()
        .map_err(|e| ExpenseError::Export(e.to_string()))?;

    println!(
        "{}",
        Notification::success(format!(
            "Exported {} expense(s) to {}",
            expenses.len(),
            args.output.display()
        ))
    );
    Ok(())
}
