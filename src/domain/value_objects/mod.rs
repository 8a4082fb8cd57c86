//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod calibration_mode;
mod category;

pub use calibration_mode::CalibrationMode;
pub use category::{
    Category, FieldSpec, CAPACITY_L, CONCENTRATE_ADDED_L, DOSE_RATIO, KNOWN_VOLUME_L,
    WATER_ADDED_L,
};
