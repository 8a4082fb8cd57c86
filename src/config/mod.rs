//! Configuration module for herbicalib
//!
//! Precedence, highest first:
//! 1. CLI flags
//! 2. Environment variables (HERBICALIB_*)
//! 3. Project config (./herbicalib.toml)
//! 4. User config (~/.config/herbicalib/config.toml)
//! 5. Built-in defaults

mod loader;
mod types;

pub use loader::{data_dir, expand_home, ConfigWarning, LoadedConfig, PROJECT_CONFIG_FILE};
pub use types::{
    AuthConfig, CalibrationConfig, ColorMode, Config, ExportConfig, LedgerBackend, LedgerConfig,
    OutputConfig, Verbosity,
};
