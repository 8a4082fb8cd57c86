//! Presentation Layer
//!
//! This layer handles:
//! - Creating use cases with infrastructure dependencies
//!
//! ## Usage
//!
//! ```ignore
//! use herbicalib::presentation::factory;
//!
//! let ledger = factory::create_ledger_use_case(&config)?;
//! let entries = ledger.load_all()?;
//! ```

pub mod factory;

pub use factory::{create_dry_run_ledger_use_case, create_ledger_use_case};
