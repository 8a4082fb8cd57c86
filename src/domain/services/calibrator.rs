//! Calibrator
//!
//! Maps capacity, dose ratio and a mode-dependent known volume to the
//! concentrate and diluent volumes to add. Pure: no state, no I/O.

use serde::Serialize;

use crate::domain::value_objects::CalibrationMode;
use crate::error::{HerbicalibError, HerbicalibResult};

/// One calibration request, built fresh per submission
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalibrationInput {
    /// Jerrycan capacity in liters
    pub capacity: f64,
    /// Concentrate liters per liter of mix
    pub dose_ratio: f64,
    /// Liters; meaning depends on `mode`
    pub known_volume: f64,
    pub mode: CalibrationMode,
}

impl CalibrationInput {
    pub fn new(capacity: f64, dose_ratio: f64, known_volume: f64, mode: CalibrationMode) -> Self {
        Self {
            capacity,
            dose_ratio,
            known_volume,
            mode,
        }
    }

    /// Reject values outside the physical domain
    pub fn validate(&self) -> HerbicalibResult<()> {
        if !self.capacity.is_finite() || self.capacity <= 0.0 {
            return Err(HerbicalibError::domain(
                "capacity",
                self.capacity,
                "must be a positive number of liters",
            ));
        }
        if !self.dose_ratio.is_finite() || self.dose_ratio < 0.0 {
            return Err(HerbicalibError::domain(
                "dose ratio",
                self.dose_ratio,
                "must not be negative",
            ));
        }
        if self.dose_ratio > 1.0 {
            return Err(HerbicalibError::domain(
                "dose ratio",
                self.dose_ratio,
                "cannot exceed 1 liter of concentrate per liter of mix",
            ));
        }
        if !self.known_volume.is_finite()
            || self.known_volume < 0.0
            || self.known_volume > self.capacity
        {
            return Err(HerbicalibError::domain(
                "known volume",
                self.known_volume,
                "must lie between 0 and the capacity",
            ));
        }
        Ok(())
    }

    /// Total mix volume the mode asks for (may be zero)
    pub fn total_mix(&self) -> f64 {
        match self.mode {
            CalibrationMode::FillToCapacity => self.capacity - self.known_volume,
            CalibrationMode::RefillRemaining => self.known_volume,
            CalibrationMode::PrepareFullBatch => self.capacity,
            CalibrationMode::TargetTotalMix => self.known_volume,
        }
    }
}

/// Volumes to add for one calibration
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalibrationResult {
    pub mode: CalibrationMode,
    pub total_mix: f64,
    pub concentrate_volume: f64,
    pub diluent_volume: f64,
}

impl CalibrationResult {
    /// Nothing to add: the container is already full or the target is zero
    pub fn is_no_work(&self) -> bool {
        self.total_mix <= 0.0
    }
}

/// Compute concentrate and diluent volumes for `input`.
///
/// `concentrate_volume + diluent_volume == total_mix` for every mode.
pub fn calibrate(input: &CalibrationInput) -> HerbicalibResult<CalibrationResult> {
    input.validate()?;

    let total_mix = input.total_mix();
    if total_mix <= 0.0 {
        return Ok(CalibrationResult {
            mode: input.mode,
            total_mix: 0.0,
            concentrate_volume: 0.0,
            diluent_volume: 0.0,
        });
    }

    let concentrate_volume = input.dose_ratio * total_mix;
    let diluent_volume = total_mix - concentrate_volume;

    Ok(CalibrationResult {
        mode: input.mode,
        total_mix,
        concentrate_volume,
        diluent_volume,
    })
}

/// Filled and empty liters of the jerrycan before mixing, for charting
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FillState {
    pub capacity: f64,
    pub filled: f64,
    pub empty: f64,
}

impl FillState {
    /// Clamp `filled` into `[0, capacity]`; `filled + empty == capacity`
    pub fn new(capacity: f64, filled: f64) -> Self {
        let capacity = capacity.max(0.0);
        let filled = filled.clamp(0.0, capacity);
        Self {
            capacity,
            filled,
            empty: capacity - filled,
        }
    }

    /// Fill level implied by a calibration input
    pub fn before(input: &CalibrationInput) -> Self {
        let filled = match input.mode {
            CalibrationMode::FillToCapacity => input.known_volume,
            CalibrationMode::RefillRemaining => input.capacity - input.known_volume,
            CalibrationMode::PrepareFullBatch | CalibrationMode::TargetTotalMix => 0.0,
        };
        Self::new(input.capacity, filled)
    }

    pub fn fraction_filled(&self) -> f64 {
        if self.capacity <= 0.0 {
            return 0.0;
        }
        self.filled / self.capacity
    }
}
