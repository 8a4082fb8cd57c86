//! Ledger Category Value Object
//!
//! Each category registers the numeric fields its entries carry.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HerbicalibError;

/// A numeric field registered for a category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub unit: &'static str,
    /// Whether summaries add this field up. Declared values such as the
    /// jerrycan capacity or the dose ratio are descriptive, not quantities.
    pub summable: bool,
}

const fn field(name: &'static str, unit: &'static str, summable: bool) -> FieldSpec {
    FieldSpec {
        name,
        unit,
        summable,
    }
}

pub const CAPACITY_L: &str = "capacity_l";
pub const KNOWN_VOLUME_L: &str = "known_volume_l";
pub const DOSE_RATIO: &str = "dose_ratio";
pub const WATER_ADDED_L: &str = "water_added_l";
pub const CONCENTRATE_ADDED_L: &str = "concentrate_added_l";

const CALIBRATION_FIELDS: &[FieldSpec] = &[
    field(CAPACITY_L, "L", false),
    field(KNOWN_VOLUME_L, "L", false),
    field(DOSE_RATIO, "L/L", false),
    field(WATER_ADDED_L, "L", true),
    field(CONCENTRATE_ADDED_L, "L", true),
];
const PESTICIDE_FIELDS: &[FieldSpec] = &[field("volume_l", "L", true)];
const FERTILIZER_FIELDS: &[FieldSpec] = &[field("mass_kg", "kg", true)];
const CONTAINER_FIELDS: &[FieldSpec] = &[field("count", "units", true)];

/// Kind of ledger record
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// A saved calibration computation
    Calibration,
    /// Raw pesticide volume used
    Pesticide,
    /// Raw fertilizer mass used
    Fertilizer,
    /// Number of containers used
    Containers,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Calibration,
        Category::Pesticide,
        Category::Fertilizer,
        Category::Containers,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Calibration => "calibration",
            Category::Pesticide => "pesticide",
            Category::Fertilizer => "fertilizer",
            Category::Containers => "containers",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Calibration => "Calibration record",
            Category::Pesticide => "Pesticide usage",
            Category::Fertilizer => "Fertilizer usage",
            Category::Containers => "Container count",
        }
    }

    /// Fields registered for this category, in display order
    pub fn schema(&self) -> &'static [FieldSpec] {
        match self {
            Category::Calibration => CALIBRATION_FIELDS,
            Category::Pesticide => PESTICIDE_FIELDS,
            Category::Fertilizer => FERTILIZER_FIELDS,
            Category::Containers => CONTAINER_FIELDS,
        }
    }

    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.schema().iter().find(|f| f.name == name)
    }

    /// Whether a summary should add up `name`.
    ///
    /// Fields no longer in the schema (older store versions) are summed.
    pub fn is_summable(&self, name: &str) -> bool {
        self.field(name).map_or(true, |f| f.summable)
    }

    /// The single quantity field of a raw usage category
    pub fn quantity_field(&self) -> Option<&'static FieldSpec> {
        match self {
            Category::Calibration => None,
            _ => self.schema().first(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = HerbicalibError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "calibration" | "calib" => Ok(Category::Calibration),
            "pesticide" => Ok(Category::Pesticide),
            "fertilizer" | "fertiliser" => Ok(Category::Fertilizer),
            "containers" | "container" => Ok(Category::Containers),
            _ => Err(HerbicalibError::UnknownCategory(s.to_string())),
        }
    }
}
