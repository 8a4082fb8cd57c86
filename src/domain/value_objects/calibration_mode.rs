//! Calibration Mode Value Object
//!
//! Selects which physical intent the known volume encodes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HerbicalibError;

/// How the known volume of a calibration is interpreted
///
/// - `FillToCapacity`: known volume is the current fill; top up to capacity
/// - `RefillRemaining`: known volume was just consumed and must be replaced
/// - `PrepareFullBatch`: mix a full container; known volume is ignored
/// - `TargetTotalMix`: known volume is the desired total mix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CalibrationMode {
    #[default]
    FillToCapacity,
    RefillRemaining,
    PrepareFullBatch,
    TargetTotalMix,
}

impl CalibrationMode {
    pub const ALL: [CalibrationMode; 4] = [
        CalibrationMode::FillToCapacity,
        CalibrationMode::RefillRemaining,
        CalibrationMode::PrepareFullBatch,
        CalibrationMode::TargetTotalMix,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CalibrationMode::FillToCapacity => "fill-to-capacity",
            CalibrationMode::RefillRemaining => "refill-remaining",
            CalibrationMode::PrepareFullBatch => "prepare-full-batch",
            CalibrationMode::TargetTotalMix => "target-total-mix",
        }
    }

    /// Human label for what the known volume means in this mode
    pub fn known_volume_label(&self) -> &'static str {
        match self {
            CalibrationMode::FillToCapacity => "Current fill",
            CalibrationMode::RefillRemaining => "Volume used",
            CalibrationMode::PrepareFullBatch => "Ignored",
            CalibrationMode::TargetTotalMix => "Target mix",
        }
    }
}

impl fmt::Display for CalibrationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CalibrationMode {
    type Err = HerbicalibError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        match normalized.as_str() {
            "fill-to-capacity" | "fill" => Ok(CalibrationMode::FillToCapacity),
            "refill-remaining" | "refill" => Ok(CalibrationMode::RefillRemaining),
            "prepare-full-batch" | "full" | "batch" => Ok(CalibrationMode::PrepareFullBatch),
            "target-total-mix" | "target" => Ok(CalibrationMode::TargetTotalMix),
            _ => Err(HerbicalibError::UnknownMode(s.to_string())),
        }
    }
}
