//! Error types for herbicalib
//!
//! Library code returns `HerbicalibError`; the binary wraps it in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for herbicalib operations
pub type HerbicalibResult<T> = Result<T, HerbicalibError>;

/// Main error type for herbicalib operations
#[derive(Error, Debug)]
pub enum HerbicalibError {
    /// Numeric input outside its valid range
    #[error("invalid {field} {value}: {reason}")]
    Domain {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// Backing store could not be read or written
    #[error("ledger storage error: {message}")]
    Storage { message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A line of the ledger file could not be decoded
    #[error("corrupt ledger {path} at line {line}: {message}")]
    CorruptStore {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// Delete target is not a valid position
    #[error("entry index {index} out of range (ledger has {len} entries)")]
    IndexOutOfRange { index: usize, len: usize },

    /// Credential did not match the configured delete secret
    #[error("authorization denied")]
    AuthorizationDenied,

    /// No delete secret is configured, so deletion is refused outright
    #[error("deletion is disabled: no delete secret configured")]
    DeleteDisabled,

    /// Configuration file could not be parsed
    #[error("invalid configuration in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// Unrecognized ledger category name
    #[error("unknown category '{0}' (expected calibration, pesticide, fertilizer or containers)")]
    UnknownCategory(String),

    /// Unrecognized calibration mode name
    #[error("unknown calibration mode '{0}' (expected fill-to-capacity, refill-remaining, prepare-full-batch or target-total-mix)")]
    UnknownMode(String),
}

impl HerbicalibError {
    pub(crate) fn domain(field: &'static str, value: f64, reason: &'static str) -> Self {
        Self::Domain {
            field,
            value,
            reason,
        }
    }

    pub(crate) fn storage(err: impl std::fmt::Display) -> Self {
        Self::Storage {
            message: err.to_string(),
        }
    }

    /// Stable machine-readable code for JSON output
    pub fn code(&self) -> &'static str {
        match self {
            Self::Domain { .. } => "domain_error",
            Self::Storage { .. } | Self::Io(_) | Self::CorruptStore { .. } => "storage_error",
            Self::IndexOutOfRange { .. } => "index_out_of_range",
            Self::AuthorizationDenied => "authorization_denied",
            Self::DeleteDisabled => "delete_disabled",
            Self::InvalidConfig { .. } => "invalid_config",
            Self::UnknownCategory(_) | Self::UnknownMode(_) => "invalid_argument",
        }
    }
}

impl From<rusqlite::Error> for HerbicalibError {
    fn from(err: rusqlite::Error) -> Self {
        Self::storage(err)
    }
}
