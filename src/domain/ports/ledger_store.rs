//! LedgerStore port - abstraction for ledger persistence
//!
//! Backends (local file, SQLite, in-memory) implement this trait so the
//! ledger use case never depends on a storage format.

use crate::domain::entities::LedgerEntry;
use crate::error::HerbicalibResult;

/// Durable, insertion-ordered storage for ledger entries
///
/// Implementations must leave previously committed entries intact when a
/// write fails, and must serialize concurrent writers.
pub trait LedgerStore: Send + Sync {
    /// Durably add `entry` after every committed entry
    fn append(&self, entry: &LedgerEntry) -> HerbicalibResult<()>;

    /// All entries in insertion order; empty when the store does not exist
    fn load_all(&self) -> HerbicalibResult<Vec<LedgerEntry>>;

    /// Number of committed entries
    fn len(&self) -> HerbicalibResult<usize> {
        Ok(self.load_all()?.len())
    }

    /// Remove and return the entry at `index`
    ///
    /// Fails with `IndexOutOfRange` without touching the store when
    /// `index >= len`.
    fn delete_at(&self, index: usize) -> HerbicalibResult<LedgerEntry>;

    /// Where the entries live, for display
    fn location(&self) -> String;
}
