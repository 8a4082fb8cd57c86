//! Subcommand handlers
//!
//! Each handler renders human output or NDJSON depending on `--json`.

pub mod calibrate;
pub mod config;
pub mod delete;
pub mod export;
pub mod history;
pub mod log;

use herbicalib::application::LedgerUseCase;
use herbicalib::config::{Config, LoadedConfig};
use herbicalib::presentation::factory;
use herbicalib::HerbicalibResult;

use crate::ui::context::UiContext;

/// Everything a handler needs from the global flags
pub struct Session {
    pub loaded: LoadedConfig,
    pub ui: UiContext,
    pub dry_run: bool,
}

impl Session {
    pub fn new(loaded: LoadedConfig, ui: UiContext, dry_run: bool) -> Self {
        Self {
            loaded,
            ui,
            dry_run,
        }
    }

    pub fn config(&self) -> &Config {
        &self.loaded.config
    }

    pub fn ledger(&self) -> HerbicalibResult<LedgerUseCase> {
        if self.dry_run {
            factory::create_dry_run_ledger_use_case(self.config())
        } else {
            factory::create_ledger_use_case(self.config())
        }
    }

    /// Suffix for messages about writes that did not persist
    pub fn dry_run_note(&self) -> &'static str {
        if self.dry_run {
            " (dry run, not saved)"
        } else {
            ""
        }
    }
}
