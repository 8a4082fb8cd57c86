//! In-memory ledger store
//!
//! Nothing is persisted; used by `--dry-run` and by tests.

use std::sync::Mutex;

use crate::domain::entities::LedgerEntry;
use crate::domain::ports::LedgerStore;
use crate::error::{HerbicalibError, HerbicalibResult};

#[derive(Default)]
pub struct MemoryLedgerStore {
    entries: Mutex<Vec<LedgerEntry>>,
}

impl MemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing entries, e.g. a snapshot of a durable store
    pub fn with_entries(entries: Vec<LedgerEntry>) -> Self {
        Self {
            entries: Mutex::new(entries),
        }
    }

    fn entries(&self) -> HerbicalibResult<std::sync::MutexGuard<'_, Vec<LedgerEntry>>> {
        self.entries
            .lock()
            .map_err(|_| HerbicalibError::storage("in-memory ledger lock poisoned"))
    }
}

impl LedgerStore for MemoryLedgerStore {
    fn append(&self, entry: &LedgerEntry) -> HerbicalibResult<()> {
        self.entries()?.push(entry.clone());
        Ok(())
    }

    fn load_all(&self) -> HerbicalibResult<Vec<LedgerEntry>> {
        Ok(self.entries()?.clone())
    }

    fn len(&self) -> HerbicalibResult<usize> {
        Ok(self.entries()?.len())
    }

    fn delete_at(&self, index: usize) -> HerbicalibResult<LedgerEntry> {
        let mut entries = self.entries()?;
        if index >= entries.len() {
            return Err(HerbicalibError::IndexOutOfRange {
                index,
                len: entries.len(),
            });
        }
        Ok(entries.remove(index))
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
