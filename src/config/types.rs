//! Configuration type definitions

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::policies::DeleteAuthorization;
use crate::domain::value_objects::CalibrationMode;
use crate::error::HerbicalibResult;
use crate::infrastructure::export::Delimiter;

use super::loader::{self, ConfigWarning, LoadedConfig};

/// Defaults offered by `calibrate` when a flag is omitted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalibrationConfig {
    #[serde(default = "default_capacity")]
    pub capacity_l: f64,

    #[serde(default = "default_dose_ratio")]
    pub dose_ratio: f64,

    #[serde(default)]
    pub mode: CalibrationMode,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            capacity_l: default_capacity(),
            dose_ratio: default_dose_ratio(),
            mode: CalibrationMode::default(),
        }
    }
}

fn default_capacity() -> f64 {
    20.0
}

fn default_dose_ratio() -> f64 {
    0.24
}

/// Storage backend for the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LedgerBackend {
    /// JSON Lines file
    #[default]
    #[serde(alias = "jsonl")]
    File,
    /// SQLite database
    Sqlite,
}

impl LedgerBackend {
    pub fn default_file_name(&self) -> &'static str {
        match self {
            LedgerBackend::File => "ledger.jsonl",
            LedgerBackend::Sqlite => "ledger.sqlite",
        }
    }
}

impl fmt::Display for LedgerBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LedgerBackend::File => "file",
            LedgerBackend::Sqlite => "sqlite",
        })
    }
}

/// Ledger storage configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LedgerConfig {
    #[serde(default)]
    pub backend: LedgerBackend,

    /// Store location; defaults to the user data directory
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Delete authorization configuration
#[derive(Clone, Serialize, Deserialize, Default)]
pub struct AuthConfig {
    /// Secret required to delete ledger entries; unset disables deletion
    #[serde(default)]
    pub delete_secret: Option<String>,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field(
                "delete_secret",
                &self.delete_secret.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ExportConfig {
    #[serde(default)]
    pub delimiter: Delimiter,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub verbosity: Verbosity,

    #[serde(default)]
    pub color: ColorMode,

    #[serde(default = "default_true")]
    pub unicode: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            verbosity: Verbosity::default(),
            color: ColorMode::default(),
            unicode: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Color output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
    Debug,
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub calibration: CalibrationConfig,

    #[serde(default)]
    pub ledger: LedgerConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> HerbicalibResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> HerbicalibResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Resolve from an explicit file, the working directory, the user
    /// config directory, or defaults; then apply `HERBICALIB_*` overrides.
    pub fn resolve(explicit: Option<&Path>) -> HerbicalibResult<LoadedConfig> {
        loader::resolve(explicit)
    }

    /// Apply environment variable overrides (HERBICALIB_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    /// Ledger store location, with `~` expanded
    pub fn ledger_path(&self) -> PathBuf {
        match &self.ledger.path {
            Some(path) => loader::expand_home(path),
            None => loader::data_dir().join(self.ledger.backend.default_file_name()),
        }
    }

    /// Delete authorization built from the configured secret
    pub fn delete_authorization(&self) -> DeleteAuthorization {
        DeleteAuthorization::from_secret(self.auth.delete_secret.as_deref())
    }
}
