//! Domain Services
//!
//! Stateless domain logic.
//!
//! - `calibrator` - Concentrate/diluent volumes per calibration mode
//! - `summarizer` - (date, category) group-and-sum over ledger entries

mod calibrator;
mod summarizer;

pub use calibrator::{calibrate, CalibrationInput, CalibrationResult, FillState};
pub use summarizer::{summarize, Summary, SummaryKey, SummaryTotals};
