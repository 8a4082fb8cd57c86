//! Ledger Use Case
//!
//! Orchestrates the history ledger: recording calibrations and usage,
//! reading back, filtering, summarizing, exporting and authorized deletion.

use std::sync::Arc;

use crate::domain::entities::{now_timestamp, LedgerEntry};
use crate::domain::policies::DeleteAuthorization;
use crate::domain::ports::LedgerStore;
use crate::domain::services::{self, CalibrationInput, CalibrationResult, Summary};
use crate::domain::value_objects::Category;
use crate::error::HerbicalibResult;
use crate::infrastructure::export::{export_entries, export_summary, Delimiter};

/// What an export should contain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportView {
    /// One row per entry
    #[default]
    Entries,
    /// One row per (date, category) group
    Summary,
}

pub struct LedgerUseCase {
    store: Arc<dyn LedgerStore>,
    auth: DeleteAuthorization,
}

impl LedgerUseCase {
    pub fn new(store: Arc<dyn LedgerStore>, auth: DeleteAuthorization) -> Self {
        Self { store, auth }
    }

    /// Where entries are stored, for display
    pub fn location(&self) -> String {
        self.store.location()
    }

    pub fn delete_enabled(&self) -> bool {
        self.auth.is_enabled()
    }

    pub fn append(&self, entry: &LedgerEntry) -> HerbicalibResult<()> {
        self.store.append(entry)
    }

    /// Compute a calibration, append it, and return the stored entry
    pub fn record_calibration(
        &self,
        input: &CalibrationInput,
    ) -> HerbicalibResult<(CalibrationResult, LedgerEntry)> {
        let result = services::calibrate(input)?;
        let entry = LedgerEntry::calibration(now_timestamp(), input, &result);
        self.store.append(&entry)?;
        Ok((result, entry))
    }

    /// Append a usage quantity for a non-calibration category
    pub fn record_usage(&self, category: Category, quantity: f64) -> HerbicalibResult<LedgerEntry> {
        let entry = LedgerEntry::usage(now_timestamp(), category, quantity)?;
        self.store.append(&entry)?;
        Ok(entry)
    }

    pub fn load_all(&self) -> HerbicalibResult<Vec<LedgerEntry>> {
        let entries = self.store.load_all()?;
        tracing::debug!(count = entries.len(), "loaded ledger");
        Ok(entries)
    }

    /// Entries of `category` in ledger order, paired with their ledger index
    pub fn filter_by_category(
        &self,
        category: Category,
    ) -> HerbicalibResult<Vec<(usize, LedgerEntry)>> {
        Ok(self
            .load_all()?
            .into_iter()
            .enumerate()
            .filter(|(_, entry)| entry.category() == category)
            .collect())
    }

    /// Entries with their ledger index, optionally restricted to one category
    pub fn list(&self, category: Option<Category>) -> HerbicalibResult<Vec<(usize, LedgerEntry)>> {
        match category {
            Some(category) => self.filter_by_category(category),
            None => Ok(self.load_all()?.into_iter().enumerate().collect()),
        }
    }

    pub fn summarize(&self, category: Option<Category>) -> HerbicalibResult<Summary> {
        let entries = self.list(category)?;
        Ok(services::summarize(entries.iter().map(|(_, entry)| entry)))
    }

    /// Remove the entry at `index` once `credential` is authorized
    pub fn delete_at(&self, index: usize, credential: Option<&str>) -> HerbicalibResult<LedgerEntry> {
        if let Err(e) = self.auth.authorize(credential) {
            tracing::warn!(index, error = %e, "delete rejected");
            return Err(e);
        }
        self.store.delete_at(index)
    }

    /// Serialize entries or their summary as delimited text
    pub fn export(
        &self,
        view: ExportView,
        category: Option<Category>,
        delimiter: Delimiter,
    ) -> HerbicalibResult<String> {
        match view {
            ExportView::Entries => {
                let entries: Vec<LedgerEntry> =
                    self.list(category)?.into_iter().map(|(_, e)| e).collect();
                Ok(export_entries(&entries, delimiter))
            }
            ExportView::Summary => Ok(export_summary(&self.summarize(category)?, delimiter)),
        }
    }
}
