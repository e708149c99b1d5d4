use anyhow::Result;
use clap::{Parser, Subcommand};

use expense_tracker::cli::{
    handle_add, handle_audit, handle_categories, handle_export, handle_list, handle_remove,
    handle_summary, handle_watch, open_store, parse_year_month, AddArgs, ExportArgs, ListArgs,
    YearMonth,
};
use expense_tracker::config::{ExpensePaths, Settings};

#[derive(Parser)]
#[command(
    name = "expenses",
    version,
    about = "Track personal expenses from the command line",
    long_about = "Records expenses with a description, amount, category and date, \
                  keeps them in a local data directory and shows running totals \
                  for all time, the current month and each category."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new expense
    Add(AddArgs),

    /// List expenses, newest first
    #[command(alias = "ls")]
    List(ListArgs),

    /// Remove an expense by id or id prefix
    #[command(alias = "rm")]
    Remove {
        /// Expense ID (or a unique prefix of it)
        id: String,
    },

    /// Show totals for all time, a month and each category
    Summary {
        /// Month to total (YYYY-MM), defaults to the current month
        #[arg(short, long, value_parser = parse_year_month)]
        month: Option<YearMonth>,
    },

    /// List the available categories
    Categories,

    /// Export all expenses to a file
    Export(ExportArgs),

    /// Reprint the summary whenever another process changes the expenses
    Watch {
        /// Stop after this many updates
        #[arg(long)]
        max_updates: Option<usize>,
    },

    /// Show recent additions and removals from the audit log
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = ExpensePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Add(args)) => {
            let mut store = open_store(&paths, &settings)?;
            handle_add(&mut store, &settings, args)?;
        }
        Some(Commands::List(args)) => {
            let store = open_store(&paths, &settings)?;
            handle_list(&store, &settings, args)?;
        }
        Some(Commands::Remove { id }) => {
            let mut store = open_store(&paths, &settings)?;
            handle_remove(&mut store, &settings, &id)?;
        }
        Some(Commands::Summary { month }) => {
            let store = open_store(&paths, &settings)?;
            handle_summary(&store, &settings, month)?;
        }
        Some(Commands::Categories) => {
            handle_categories(&settings)?;
        }
        Some(Commands::Export(args)) => {
            let store = open_store(&paths, &settings)?;
            handle_export(&store, &settings, args)?;
        }
        Some(Commands::Watch { max_updates }) => {
            let mut store = open_store(&paths, &settings)?;
            handle_watch(&mut store, &settings, max_updates)?;
        }
        Some(Commands::Audit { limit }) => {
            handle_audit(&paths, limit)?;
        }
        Some(Commands::Config) => {
            println!("Expense Tracker Configuration");
            println!("=============================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Locale:          {}", settings.locale);
            println!("  Currency symbol: {:?}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!("  Storage key:     {}", settings.storage_key);
            match settings.storage_quota_bytes {
                Some(bytes) => println!("  Storage quota:   {} bytes", bytes),
                None => println!("  Storage quota:   unlimited"),
            }
            println!("  Sync interval:   {} ms", settings.sync_poll_interval_ms);
            println!("  Audit enabled:   {}", settings.audit_enabled);
        }
        None => {
            println!("Expense Tracker - personal expenses from the terminal");
            println!();
            println!("Run 'expenses --help' for usage information.");
            println!("Run 'expenses add \"Coffee\" 4.50 --category alimentacao' to record one.");
        }
    }

    Ok(())
}
