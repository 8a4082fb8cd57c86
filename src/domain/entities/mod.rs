//! Domain Entities
//!
//! - `LedgerEntry` - One immutable record in the history ledger

mod ledger_entry;

pub use ledger_entry::{now_timestamp, LedgerEntry};
