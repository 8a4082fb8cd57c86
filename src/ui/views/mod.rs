pub mod calibration;
pub mod config;
pub mod ledger;
