//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `repositories/` - Ledger stores (JSON Lines file, SQLite, memory)
//! - `export/` - Delimited-text serialization of ledger views

pub mod export;
pub mod repositories;

// Re-export for convenience
pub use export::{export_entries, export_summary, Delimiter};
pub use repositories::{JsonlLedgerStore, MemoryLedgerStore, SqliteLedgerStore};
