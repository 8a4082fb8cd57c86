//! Ledger export formats

mod delimited;

pub use delimited::{export_entries, export_summary, format_number, Delimiter, TIMESTAMP_FORMAT};
