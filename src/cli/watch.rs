//! `watch` command
//!
//! Follows changes other processes make to the collection and reprints the
//! summary after each one.

use std::sync::mpsc::Receiver;

use super::{CliStore, YearMonth};
use crate::config::Settings;
use crate::display::{format_summary, Notification};
use crate::error::ExpenseResult;
use crate::services::Summary;
use crate::storage::{KeyValueStorage, StorageEvent};

/// Watch for changes until `max_updates` reloads happened, or forever
pub fn handle_watch(
    store: &mut CliStore,
    settings: &Settings,
    max_updates: Option<usize>,
) -> ExpenseResult<()> {
    let events = start_watching(store)?;

    print_summary(store, settings);
    println!(
        "{}",
        Notification::info(format!(
            "Watching '{}' for changes (Ctrl+C to stop)",
            store.key()
        ))
    );

    let mut updates = 0;
    for event in events {
        if !store.apply_storage_event(&event) {
            continue;
        }

        if let Some(err) = store.last_read_error() {
            eprintln!("{}", Notification::from_error(err));
        }
        println!();
        print_summary(store, settings);

        updates += 1;
        if max_updates.is_some_and(|max| updates >= max) {
            break;
        }
    }

    Ok(())
}

/// Subscribe to changes, then reload
///
/// Writes landing before the watcher's first snapshot are picked up by the
/// reload; later ones arrive as events.
fn start_watching(store: &mut CliStore) -> ExpenseResult<Receiver<StorageEvent>> {
    let events = store.storage().subscribe()?;
    store.load();
    Ok(events)
}

fn print_summary(store: &CliStore, settings: &Settings) {
    let month = YearMonth::current();
    let summary = Summary::for_month(store.expenses(), month.year, month.month);
    print!("{}", format_summary(&summary, settings));
}
