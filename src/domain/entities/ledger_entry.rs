//! Ledger entry entity
//!
//! An immutable record: a creation timestamp, a category, and the numeric
//! fields registered for that category. Field sets differ between
//! categories on purpose.

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate, NaiveDateTime, SubsecRound};
use serde::{Deserialize, Serialize};

use crate::domain::services::{CalibrationInput, CalibrationResult};
use crate::domain::value_objects::{
    CalibrationMode, Category, CAPACITY_L, CONCENTRATE_ADDED_L, DOSE_RATIO, KNOWN_VOLUME_L,
    WATER_ADDED_L,
};
use crate::error::{HerbicalibError, HerbicalibResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    timestamp: NaiveDateTime,
    category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mode: Option<CalibrationMode>,
    #[serde(default)]
    fields: BTreeMap<String, f64>,
}

/// Local wall-clock time truncated to whole seconds
pub fn now_timestamp() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(0)
}

impl LedgerEntry {
    /// Record a calibration computation
    pub fn calibration(
        timestamp: NaiveDateTime,
        input: &CalibrationInput,
        result: &CalibrationResult,
    ) -> Self {
        let fields = BTreeMap::from([
            (CAPACITY_L.to_string(), input.capacity),
            (KNOWN_VOLUME_L.to_string(), input.known_volume),
            (DOSE_RATIO.to_string(), input.dose_ratio),
            (WATER_ADDED_L.to_string(), result.diluent_volume),
            (CONCENTRATE_ADDED_L.to_string(), result.concentrate_volume),
        ]);
        Self {
            timestamp,
            category: Category::Calibration,
            mode: Some(input.mode),
            fields,
        }
    }

    /// Record a raw usage quantity for a pesticide, fertilizer or container log
    pub fn usage(
        timestamp: NaiveDateTime,
        category: Category,
        quantity: f64,
    ) -> HerbicalibResult<Self> {
        let Some(spec) = category.quantity_field() else {
            return Err(HerbicalibError::UnknownCategory(format!(
                "{} (calibration records come from `calibrate --save`)",
                category
            )));
        };
        if !quantity.is_finite() || quantity < 0.0 {
            return Err(HerbicalibError::domain(
                "quantity",
                quantity,
                "must be a non-negative number",
            ));
        }
        if category == Category::Containers && quantity.fract() != 0.0 {
            return Err(HerbicalibError::domain(
                "container count",
                quantity,
                "must be a whole number",
            ));
        }
        Ok(Self {
            timestamp,
            category,
            mode: None,
            fields: BTreeMap::from([(spec.name.to_string(), quantity)]),
        })
    }

    /// Rebuild an entry read back from a store
    pub fn from_parts(
        timestamp: NaiveDateTime,
        category: Category,
        mode: Option<CalibrationMode>,
        fields: BTreeMap<String, f64>,
    ) -> Self {
        Self {
            timestamp,
            category,
            mode,
            fields,
        }
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn mode(&self) -> Option<CalibrationMode> {
        self.mode
    }

    pub fn fields(&self) -> &BTreeMap<String, f64> {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<f64> {
        self.fields.get(name).copied()
    }

    /// Field names in schema order, then any unregistered names
    pub fn field_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .category
            .schema()
            .iter()
            .map(|f| f.name)
            .filter(|name| self.fields.contains_key(*name))
            .collect();
        names.extend(
            self.fields
                .keys()
                .map(String::as_str)
                .filter(|name| self.category.field(name).is_none()),
        );
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::calibrate;

    fn ts() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 14)
            .unwrap()
            .and_hms_opt(7, 30, 0)
            .unwrap()
    }

    #[test]
    fn calibration_entry_carries_schema_fields() {
        let input = CalibrationInput::new(20.0, 0.25, 4.0, CalibrationMode::FillToCapacity);
        let result = calibrate(&input).unwrap();
        let entry = LedgerEntry::calibration(ts(), &input, &result);

        assert_eq!(entry.category(), Category::Calibration);
        assert_eq!(entry.mode(), Some(CalibrationMode::FillToCapacity));
        assert_eq!(entry.field(CAPACITY_L), Some(20.0));
        assert_eq!(entry.field(CONCENTRATE_ADDED_L), Some(4.0));
        assert_eq!(entry.field(WATER_ADDED_L), Some(12.0));
        assert_eq!(
            entry.field_names(),
            vec![
                CAPACITY_L,
                KNOWN_VOLUME_L,
                DOSE_RATIO,
                WATER_ADDED_L,
                CONCENTRATE_ADDED_L
            ]
        );
    }

    #[test]
    fn usage_entry_uses_quantity_field() {
        let entry = LedgerEntry::usage(ts(), Category::Fertilizer, 12.5).unwrap();
        assert_eq!(entry.field("mass_kg"), Some(12.5));
        assert_eq!(entry.mode(), None);
        assert_eq!(entry.date(), NaiveDate::from_ymd_opt(2026, 3, 14).unwrap());
    }

    #[test]
    fn usage_entry_rejects_calibration_category() {
        assert!(matches!(
            LedgerEntry::usage(ts(), Category::Calibration, 1.0),
            Err(HerbicalibError::UnknownCategory(_))
        ));
    }

    #[test]
    fn usage_entry_validates_quantity() {
        assert!(LedgerEntry::usage(ts(), Category::Pesticide, -1.0).is_err());
        assert!(LedgerEntry::usage(ts(), Category::Containers, 2.5).is_err());
        assert!(LedgerEntry::usage(ts(), Category::Containers, 3.0).is_ok());
    }

    #[test]
    fn json_shape_is_stable() {
        let entry = LedgerEntry::usage(ts(), Category::Containers, 3.0).unwrap();
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(
            json,
            r#"{"timestamp":"2026-03-14T07:30:00","category":"containers","fields":{"count":3.0}}"#
        );
    }

    #[test]
    fn unknown_fields_survive_decoding() {
        let json = r#"{"timestamp":"2026-03-14T07:30:00","category":"pesticide","fields":{"volume_l":2.0,"area_ha":1.5}}"#;
        let entry: LedgerEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.field_names(), vec!["volume_l", "area_ha"]);
    }

    #[test]
    fn now_timestamp_has_whole_seconds() {
        use chrono::Timelike;
        assert_eq!(now_timestamp().nanosecond(), 0);
    }
}
