//! Terminal presentation for the CLI
//!
//! Views render to strings; commands decide where they go.

pub mod context;
pub mod error;
pub mod json;
pub mod output;
pub mod primitives;
pub mod terminal;
pub mod theme;
pub mod views;
pub mod widgets;
