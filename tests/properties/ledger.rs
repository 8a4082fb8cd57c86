//! Ledger store behavior shared by every backend.

use proptest::prelude::*;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use herbicalib::domain::entities::LedgerEntry;
use herbicalib::domain::ports::LedgerStore;
use herbicalib::domain::value_objects::Category;
use herbicalib::infrastructure::{JsonlLedgerStore, MemoryLedgerStore, SqliteLedgerStore};
use tempfile::TempDir;

fn base_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 7, 9)
        .unwrap()
        .and_hms_opt(6, 0, 0)
        .unwrap()
}

fn entries(n: usize) -> Vec<LedgerEntry> {
    let categories = [Category::Pesticide, Category::Fertilizer, Category::Containers];
    (0..n)
        .map(|i| {
            LedgerEntry::usage(
                base_time() + Duration::minutes(i as i64),
                categories[i % categories.len()],
                (i + 1) as f64,
            )
            .unwrap()
        })
        .collect()
}

/// One fresh store per backend; the `TempDir` keeps the files alive
fn stores() -> (TempDir, Vec<Box<dyn LedgerStore>>) {
    let dir = tempfile::tempdir().unwrap();
    let stores: Vec<Box<dyn LedgerStore>> = vec![
        Box::new(MemoryLedgerStore::new()),
        Box::new(JsonlLedgerStore::new(dir.path().join("ledger.jsonl"))),
        Box::new(SqliteLedgerStore::open(dir.path().join("ledger.sqlite")).unwrap()),
    ];
    (dir, stores)
}

#[test]
fn append_then_load_preserves_order() {
    for n in [0, 1, 100] {
        let expected = entries(n);
        let (_dir, stores) = stores();
        for store in &stores {
            for entry in &expected {
                store.append(entry).unwrap();
            }
            assert_eq!(store.load_all().unwrap(), expected, "{}", store.location());
            assert_eq!(store.len().unwrap(), n);
        }
    }
}

#[test]
fn delete_out_of_range_leaves_store_unchanged() {
    let (_dir, stores) = stores();
    for store in &stores {
        assert!(store.delete_at(0).is_err());
        store.append(&entries(1)[0]).unwrap();
        assert!(store.delete_at(1).is_err());
        assert!(store.delete_at(usize::MAX).is_err());
        assert_eq!(store.load_all().unwrap(), entries(1), "{}", store.location());
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 32,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: `delete_at(i)` removes exactly the i-th entry and keeps the rest in order
    #[test]
    fn property_delete_removes_only_target(n in 1usize..12, pick in any::<prop::sample::Index>()) {
        let expected = entries(n);
        let index = pick.index(n);
        let (_dir, stores) = stores();

        for store in &stores {
            for entry in &expected {
                store.append(entry).unwrap();
            }
            let removed = store.delete_at(index).unwrap();
            prop_assert_eq!(&removed, &expected[index]);

            let mut remaining = expected.clone();
            remaining.remove(index);
            prop_assert_eq!(store.load_all().unwrap(), remaining);
        }
    }
}
