//! Expense store
//!
//! Owns the in-memory expense list and keeps it in sync with the storage
//! medium. The in-memory list is authoritative for this handle until the next
//! `load`; writes from other handles only show up after a reload, usually
//! triggered through [`ExpenseStore::apply_storage_event`].

use chrono::{Datelike, Local, NaiveDate};

use crate::audit::{AuditEntry, AuditLogger};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, ExpenseId, Money};
use crate::storage::{ExpenseRepository, KeyValueStorage, StorageEvent};
use crate::validation::ExpenseInput;

use super::summary::{self, CategoryTotal, Summary};

/// The expense list and its persistence
pub struct ExpenseStore<S> {
    repository: ExpenseRepository<S>,
    expenses: Vec<Expense>,
    audit: Option<AuditLogger>,
    last_read_error: Option<ExpenseError>,
}

impl<S: KeyValueStorage> ExpenseStore<S> {
    /// Open the collection stored under `key` and load it
    pub fn open(storage: S, key: impl Into<String>) -> Self {
        let mut store = Self {
            repository: ExpenseRepository::new(storage, key),
            expenses: Vec::new(),
            audit: None,
            last_read_error: None,
        };
        store.load();
        store
    }

    /// Record additions and removals in an audit log
    pub fn with_audit_log(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    /// Validate form input and build a new record
    ///
    /// The record is not added to the list; pass it to [`ExpenseStore::add`].
    pub fn create(&self, input: &ExpenseInput) -> ExpenseResult<Expense> {
        self.create_on(input, Local::now().date_naive())
    }

    /// Like [`ExpenseStore::create`] with an explicit "today"
    pub fn create_on(&self, input: &ExpenseInput, today: NaiveDate) -> ExpenseResult<Expense> {
        let valid = input.validate_on(today)?;
        Ok(valid.into_expense())
    }

    /// Prepend a record and persist the list
    ///
    /// On a write failure the record stays in memory and
    /// `ExpenseError::PersistenceWrite` is returned. Only saved records are
    /// written to the audit log.
    pub fn add(&mut self, expense: Expense) -> ExpenseResult<()> {
        let entry = AuditEntry::create(&expense);
        self.expenses.insert(0, expense);
        self.save()?;
        self.audit(entry);
        Ok(())
    }

    /// Remove the first record with `id` and persist the list
    ///
    /// Returns `Ok(None)` without writing when no record has that id.
    pub fn remove(&mut self, id: &ExpenseId) -> ExpenseResult<Option<Expense>> {
        let Some(index) = self.expenses.iter().position(|e| &e.id == id) else {
            return Ok(None);
        };

        let removed = self.expenses.remove(index);
        self.save()?;
        self.audit(AuditEntry::delete(&removed));
        Ok(Some(removed))
    }

    /// Reload the list from storage
    ///
    /// Never fails: missing data gives an empty list, and unreadable or
    /// corrupt data is dropped in favour of an empty list. The failure is kept
    /// in [`ExpenseStore::last_read_error`]. The next write replaces whatever
    /// was stored.
    pub fn load(&mut self) -> &[Expense] {
        match self.repository.read() {
            Ok(expenses) => {
                tracing::debug!(key = self.repository.key(), count = expenses.len(), "expenses loaded");
                self.expenses = expenses;
                self.last_read_error = None;
            }
            Err(e) => {
                tracing::warn!(
                    key = self.repository.key(),
                    error = %e,
                    "discarding unreadable expense data"
                );
                self.expenses = Vec::new();
                self.last_read_error = Some(e);
            }
        }
        &self.expenses
    }

    /// Write the full list to storage
    ///
    /// The in-memory list is kept whether or not the write succeeds. Failed
    /// writes are not retried.
    pub fn save(&self) -> ExpenseResult<()> {
        match self.repository.write(&self.expenses) {
            Ok(()) => {
                tracing::debug!(key = self.repository.key(), count = self.expenses.len(), "expenses saved");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(key = self.repository.key(), error = %e, "failed to save expenses");
                Err(e)
            }
        }
    }

    /// React to a change made by another handle
    ///
    /// Reloads when the event concerns this store's key. Returns whether a
    /// reload happened.
    pub fn apply_storage_event(&mut self, event: &StorageEvent) -> bool {
        if !self.repository.is_own_key(event) {
            return false;
        }
        tracing::debug!(key = %event.key, "collection changed elsewhere, reloading");
        self.load();
        true
    }

    /// The failure of the most recent `load`, if it had to discard data
    pub fn last_read_error(&self) -> Option<&ExpenseError> {
        self.last_read_error.as_ref()
    }

    /// All records, newest insertion first
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    /// Look up a record by id
    pub fn get(&self, id: &ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|e| &e.id == id)
    }

    /// Find the single record whose id is or starts with `prefix`
    pub fn resolve_id(&self, prefix: &str) -> ExpenseResult<ExpenseId> {
        let prefix = prefix.trim();

        if let Some(exact) = self.expenses.iter().find(|e| e.id.as_str() == prefix) {
            return Ok(exact.id.clone());
        }

        let matches: Vec<&Expense> = self
            .expenses
            .iter()
            .filter(|e| e.id.matches_prefix(prefix))
            .collect();

        match matches.as_slice() {
            [] => Err(ExpenseError::expense_not_found(prefix)),
            [only] => Ok(only.id.clone()),
            many => Err(ExpenseError::AmbiguousId {
                prefix: prefix.to_string(),
                matches: many.len(),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// The storage key of the collection
    pub fn key(&self) -> &str {
        self.repository.key()
    }

    /// The underlying storage medium
    pub fn storage(&self) -> &S {
        self.repository.storage()
    }

    /// Sum of all amounts
    pub fn total_all(&self) -> Money {
        summary::total_all(&self.expenses)
    }

    /// Sum of amounts dated in the current calendar month
    pub fn total_current_month(&self) -> Money {
        summary::total_current_month(&self.expenses)
    }

    /// Sum of amounts dated in the given calendar month
    pub fn total_for_month(&self, year: i32, month: u32) -> Money {
        summary::total_for_month(&self.expenses, year, month)
    }

    /// Totals per category, largest first
    pub fn totals_by_category(&self) -> Vec<CategoryTotal> {
        summary::totals_by_category(&self.expenses)
    }

    /// All aggregates for the month containing `reference`
    pub fn summary_for(&self, reference: NaiveDate) -> Summary {
        Summary::for_month(&self.expenses, reference.year(), reference.month())
    }

    /// All aggregates for the current month
    pub fn summary(&self) -> Summary {
        Summary::current(&self.expenses)
    }

    fn audit(&self, entry: AuditEntry) {
        if let Some(logger) = &self.audit {
            if let Err(e) = logger.log(&entry) {
                tracing::warn!(error = %e, "failed to write audit entry");
            }
        }
    }
}
