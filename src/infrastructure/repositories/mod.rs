//! Ledger store implementations
//!
//! - `JsonlLedgerStore` - local JSON Lines file
//! - `SqliteLedgerStore` - local SQLite table
//! - `MemoryLedgerStore` - in-process, not persisted

mod jsonl;
mod memory;
mod sqlite;

pub use jsonl::JsonlLedgerStore;
pub use memory::MemoryLedgerStore;
pub use sqlite::SqliteLedgerStore;
