//! Domain Layer
//!
//! The calibration arithmetic and the ledger data model, free of I/O.
//!
//! ## Structure
//!
//! - `value_objects/` - Immutable value types (CalibrationMode, Category)
//! - `entities/` - Ledger entries
//! - `services/` - Calibrator and ledger summarizer
//! - `policies/` - Delete authorization
//! - `ports/` - The `LedgerStore` interface implemented by infrastructure

pub mod entities;
pub mod policies;
pub mod ports;
pub mod services;
pub mod value_objects;
