//! Ledger summarizer
//!
//! Groups entries by (date, category) and sums their summable fields.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::entities::LedgerEntry;
use crate::domain::value_objects::Category;

/// Grouping key of a summary row
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SummaryKey {
    pub date: NaiveDate,
    pub category: Category,
}

/// Sums for one (date, category) group
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SummaryTotals {
    pub entries: usize,
    pub totals: BTreeMap<String, f64>,
}

/// Ordered mapping from (date, category) to summed fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    groups: BTreeMap<SummaryKey, SummaryTotals>,
}

impl Summary {
    pub fn get(&self, date: NaiveDate, category: Category) -> Option<&SummaryTotals> {
        self.groups.get(&SummaryKey { date, category })
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Groups sorted by date, then category
    pub fn iter(&self) -> impl Iterator<Item = (&SummaryKey, &SummaryTotals)> {
        self.groups.iter()
    }

    /// Summed field names across all groups, schema order first
    pub fn field_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for category in Category::ALL {
            for spec in category.schema() {
                let present = self
                    .groups
                    .iter()
                    .any(|(k, v)| k.category == category && v.totals.contains_key(spec.name));
                if present && !names.iter().any(|n| n == spec.name) {
                    names.push(spec.name.to_string());
                }
            }
        }
        for totals in self.groups.values() {
            for name in totals.totals.keys() {
                if !names.contains(name) {
                    names.push(name.clone());
                }
            }
        }
        names
    }
}

/// Sum every summable field per (date, category).
///
/// A field missing from an entry contributes 0 to its group. Fields the
/// category schema marks as non-summable are left out.
pub fn summarize<'a, I>(entries: I) -> Summary
where
    I: IntoIterator<Item = &'a LedgerEntry>,
{
    let mut groups: BTreeMap<SummaryKey, SummaryTotals> = BTreeMap::new();

    for entry in entries {
        let category = entry.category();
        let group = groups
            .entry(SummaryKey {
                date: entry.date(),
                category,
            })
            .or_default();
        group.entries += 1;

        for (name, value) in entry.fields() {
            if !category.is_summable(name) {
                continue;
            }
            *group.totals.entry(name.clone()).or_insert(0.0) += value;
        }
    }

    Summary { groups }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::{calibrate, CalibrationInput};
    use crate::domain::value_objects::{CalibrationMode, CAPACITY_L, WATER_ADDED_L};
    use chrono::{Datelike, NaiveDateTime};

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 5, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn entry(day: u32, hour: u32, category: Category, fields: &[(&str, f64)]) -> LedgerEntry {
        LedgerEntry::from_parts(
            at(day, hour),
            category,
            None,
            fields.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        )
    }

    #[test]
    fn sums_shared_fields_and_keeps_unique_ones() {
        let entries = vec![
            entry(1, 8, Category::Pesticide, &[("volume_l", 2.0), ("area_ha", 1.0)]),
            entry(1, 15, Category::Pesticide, &[("volume_l", 3.5)]),
        ];

        let summary = summarize(&entries);
        let date = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();
        let group = summary.get(date, Category::Pesticide).unwrap();

        assert_eq!(summary.len(), 1);
        assert_eq!(group.entries, 2);
        assert_eq!(group.totals["volume_l"], 5.5);
        assert_eq!(group.totals["area_ha"], 1.0);
    }

    #[test]
    fn groups_by_date_and_category() {
        let entries = vec![
            entry(2, 9, Category::Fertilizer, &[("mass_kg", 10.0)]),
            entry(1, 9, Category::Fertilizer, &[("mass_kg", 4.0)]),
            entry(1, 10, Category::Containers, &[("count", 2.0)]),
        ];

        let summary = summarize(&entries);
        let keys: Vec<_> = summary.iter().map(|(k, _)| (k.date.day0(), k.category)).collect();

        assert_eq!(
            keys,
            vec![
                (0, Category::Fertilizer),
                (0, Category::Containers),
                (1, Category::Fertilizer),
            ]
        );
    }

    #[test]
    fn excludes_declared_values() {
        let input = CalibrationInput::new(20.0, 0.25, 0.0, CalibrationMode::FillToCapacity);
        let result = calibrate(&input).unwrap();
        let entries = vec![
            LedgerEntry::calibration(at(3, 8), &input, &result),
            LedgerEntry::calibration(at(3, 12), &input, &result),
        ];

        let summary = summarize(&entries);
        let date = NaiveDate::from_ymd_opt(2026, 5, 3).unwrap();
        let group = summary.get(date, Category::Calibration).unwrap();

        assert!(!group.totals.contains_key(CAPACITY_L));
        assert_eq!(group.totals[WATER_ADDED_L], 30.0);
        assert_eq!(
            summary.field_names(),
            vec!["water_added_l".to_string(), "concentrate_added_l".to_string()]
        );
    }

    #[test]
    fn empty_ledger_has_empty_summary() {
        let summary = summarize(&Vec::<LedgerEntry>::new());
        assert!(summary.is_empty());
    }
}
