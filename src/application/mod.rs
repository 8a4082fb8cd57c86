//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `LedgerUseCase` - Record, list, summarize, export and delete ledger entries

pub mod ledger;

pub use ledger::{ExportView, LedgerUseCase};
