//! Herbicalib - jerrycan herbicide calibration and field usage ledger
//!
//! Computes how much concentrate and water to add to a fixed-capacity
//! jerrycan under one of four calibration modes, and keeps a durable,
//! append-ordered ledger of calibrations and field usage (pesticide,
//! fertilizer, containers) that can be listed, summarized, exported and,
//! with the configured secret, pruned.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;
pub mod presentation;

// Re-exports for convenience
pub use application::{ExportView, LedgerUseCase};
pub use config::Config;
pub use domain::entities::LedgerEntry;
pub use domain::services::{calibrate, summarize, CalibrationInput, CalibrationResult, FillState};
pub use domain::value_objects::{CalibrationMode, Category};
pub use error::{HerbicalibError, HerbicalibResult};
