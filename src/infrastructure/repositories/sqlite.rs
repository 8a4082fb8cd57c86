//! SQLite ledger store
//!
//! Entries live in a single `ledger_entries` table; the autoincrement id
//! carries insertion order and the category-specific fields are stored as a
//! JSON object. Every write runs in its own transaction.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::entities::LedgerEntry;
use crate::domain::ports::LedgerStore;
use crate::domain::value_objects::{CalibrationMode, Category};
use crate::error::{HerbicalibError, HerbicalibResult};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS ledger_entries (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    recorded_at TEXT NOT NULL,
    category TEXT NOT NULL,
    mode TEXT,
    fields TEXT NOT NULL
);";

pub struct SqliteLedgerStore {
    conn: Mutex<Connection>,
    location: String,
}

/// Raw column values of one row
type Row = (String, String, Option<String>, String);

impl SqliteLedgerStore {
    /// Open or create the database at `path`
    pub fn open(path: impl AsRef<Path>) -> HerbicalibResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.busy_timeout(std::time::Duration::from_secs(5))?;
        Self::init(conn, path.to_path_buf())
    }

    /// Database that lives only as long as this value
    pub fn open_in_memory() -> HerbicalibResult<Self> {
        Self::init(Connection::open_in_memory()?, PathBuf::from(":memory:"))
    }

    fn init(conn: Connection, path: PathBuf) -> HerbicalibResult<Self> {
        conn.execute_batch(SCHEMA)?;
        tracing::debug!(path = %path.display(), "opened sqlite ledger");
        Ok(Self {
            conn: Mutex::new(conn),
            location: path.display().to_string(),
        })
    }

    fn conn(&self) -> HerbicalibResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| HerbicalibError::storage("ledger connection lock poisoned"))
    }

    fn decode(&self, (recorded_at, category, mode, fields): Row) -> HerbicalibResult<LedgerEntry> {
        let timestamp = NaiveDateTime::parse_from_str(&recorded_at, TIMESTAMP_FORMAT)
            .map_err(|e| HerbicalibError::storage(format!("bad timestamp '{recorded_at}': {e}")))?;
        let category: Category = category.parse()?;
        let mode = mode.map(|m| m.parse::<CalibrationMode>()).transpose()?;
        let fields: BTreeMap<String, f64> =
            serde_json::from_str(&fields).map_err(HerbicalibError::storage)?;
        Ok(LedgerEntry::from_parts(timestamp, category, mode, fields))
    }
}

fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Row> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
}

impl LedgerStore for SqliteLedgerStore {
    fn append(&self, entry: &LedgerEntry) -> HerbicalibResult<()> {
        let fields = serde_json::to_string(entry.fields()).map_err(HerbicalibError::storage)?;

        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO ledger_entries (recorded_at, category, mode, fields)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                entry.timestamp().format(TIMESTAMP_FORMAT).to_string(),
                entry.category().as_str(),
                entry.mode().map(|m| m.as_str()),
                fields
            ],
        )?;
        tx.commit()?;

        tracing::debug!(
            location = %self.location,
            category = %entry.category(),
            "appended ledger entry"
        );
        Ok(())
    }

    fn load_all(&self) -> HerbicalibResult<Vec<LedgerEntry>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare_cached(
            "SELECT recorded_at, category, mode, fields FROM ledger_entries ORDER BY id",
        )?;
        let rows = stmt
            .query_map([], read_row)?
            .collect::<rusqlite::Result<Vec<Row>>>()?;
        rows.into_iter().map(|row| self.decode(row)).collect()
    }

    fn len(&self) -> HerbicalibResult<usize> {
        let conn = self.conn()?;
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM ledger_entries", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn delete_at(&self, index: usize) -> HerbicalibResult<LedgerEntry> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        // SQLite reads a negative OFFSET as 0, so indices past i64::MAX never reach the query
        let target = match i64::try_from(index) {
            Ok(offset) => tx
                .query_row(
                    "SELECT id, recorded_at, category, mode, fields FROM ledger_entries
                     ORDER BY id LIMIT 1 OFFSET ?1",
                    [offset],
                    |row| -> rusqlite::Result<(i64, Row)> {
                        Ok((
                            row.get(0)?,
                            (row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?),
                        ))
                    },
                )
                .optional()?,
            Err(_) => None,
        };

        let Some((id, row)) = target else {
            let len: i64 =
                tx.query_row("SELECT COUNT(*) FROM ledger_entries", [], |row| row.get(0))?;
            return Err(HerbicalibError::IndexOutOfRange {
                index,
                len: len as usize,
            });
        };

        let removed = self.decode(row)?;
        tx.execute("DELETE FROM ledger_entries WHERE id = ?1", [id])?;
        tx.commit()?;

        tracing::info!(location = %self.location, index, "deleted ledger entry");
        Ok(removed)
    }

    fn location(&self) -> String {
        self.location.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::{calibrate, CalibrationInput};
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn at(minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 6, 2)
            .unwrap()
            .and_hms_opt(9, minute, 0)
            .unwrap()
    }

    #[test]
    fn append_and_load_keep_order_and_mode() {
        let store = SqliteLedgerStore::open_in_memory().unwrap();
        let input = CalibrationInput::new(20.0, 0.24, 5.0, CalibrationMode::FillToCapacity);
        let result = calibrate(&input).unwrap();

        store
            .append(&LedgerEntry::calibration(at(0), &input, &result))
            .unwrap();
        store
            .append(&LedgerEntry::usage(at(1), Category::Containers, 4.0).unwrap())
            .unwrap();

        let entries = store.load_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].mode(), Some(CalibrationMode::FillToCapacity));
        assert_eq!(entries[0].timestamp(), at(0));
        assert_eq!(entries[1].field("count"), Some(4.0));
        assert_eq!(store.len().unwrap(), 2);
    }

    #[test]
    fn delete_uses_position_not_id() {
        let store = SqliteLedgerStore::open_in_memory().unwrap();
        for i in 0..4 {
            store
                .append(&LedgerEntry::usage(at(i), Category::Fertilizer, f64::from(i)).unwrap())
                .unwrap();
        }

        store.delete_at(0).unwrap();
        let removed = store.delete_at(1).unwrap();
        assert_eq!(removed.field("mass_kg"), Some(2.0));

        let remaining: Vec<_> = store
            .load_all()
            .unwrap()
            .iter()
            .map(|e| e.field("mass_kg").unwrap())
            .collect();
        assert_eq!(remaining, vec![1.0, 3.0]);
    }

    #[test]
    fn delete_on_empty_is_out_of_range() {
        let store = SqliteLedgerStore::open_in_memory().unwrap();
        assert!(matches!(
            store.delete_at(0),
            Err(HerbicalibError::IndexOutOfRange { index: 0, len: 0 })
        ));
    }

    #[test]
    fn delete_beyond_i64_range_is_out_of_range() {
        let store = SqliteLedgerStore::open_in_memory().unwrap();
        for i in 0..2 {
            store
                .append(&LedgerEntry::usage(at(i), Category::Pesticide, f64::from(i + 1)).unwrap())
                .unwrap();
        }

        assert!(matches!(
            store.delete_at(usize::MAX),
            Err(HerbicalibError::IndexOutOfRange { index: usize::MAX, len: 2 })
        ));
        let volumes: Vec<_> = store
            .load_all()
            .unwrap()
            .iter()
            .map(|e| e.field("volume_l").unwrap())
            .collect();
        assert_eq!(volumes, vec![1.0, 2.0]);
    }

    #[test]
    fn entries_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("db/ledger.sqlite");

        {
            let store = SqliteLedgerStore::open(&path).unwrap();
            store
                .append(&LedgerEntry::usage(at(5), Category::Pesticide, 1.5).unwrap())
                .unwrap();
        }

        let store = SqliteLedgerStore::open(&path).unwrap();
        let entries = store.load_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].field("volume_l"), Some(1.5));
    }
}
