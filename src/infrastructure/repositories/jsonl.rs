//! JSON Lines ledger store
//!
//! Persists the ledger as one JSON object per line. Appends never rewrite
//! committed lines: each entry is written with a single `write_all` and
//! synced before the lock is released. Deletion rewrites into a temp file in
//! the same directory and renames it over the store.
//!
//! Writers are serialized through an exclusive `fs2` lock on a sidecar
//! `<name>.lock` file; readers take a shared lock.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tempfile::NamedTempFile;

use crate::domain::entities::LedgerEntry;
use crate::domain::ports::LedgerStore;
use crate::error::{HerbicalibError, HerbicalibResult};

pub struct JsonlLedgerStore {
    path: PathBuf,
}

/// Releases the advisory lock when dropped
struct LockGuard(File);

impl Drop for LockGuard {
    fn drop(&mut self) {
        let _ = self.0.unlock();
    }
}

impl JsonlLedgerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `<file name>.lock` next to the store, keeping any existing extension
    fn lock_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("ledger"));
        name.push(".lock");
        self.path.with_file_name(name)
    }

    fn lock(&self, exclusive: bool) -> HerbicalibResult<LockGuard> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let lock_file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.lock_path())?;

        let locked = if exclusive {
            lock_file.lock_exclusive()
        } else {
            lock_file.lock_shared()
        };
        locked?;

        Ok(LockGuard(lock_file))
    }

    fn read_entries(&self) -> HerbicalibResult<Vec<LedgerEntry>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let complete = match content.rfind('\n') {
            Some(end) => &content[..=end],
            None => "",
        };
        if complete.len() < content.len() {
            tracing::warn!(
                path = %self.path.display(),
                bytes = content.len() - complete.len(),
                "ignoring unterminated trailing ledger line"
            );
        }

        complete
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| {
                serde_json::from_str(line).map_err(|e| HerbicalibError::CorruptStore {
                    path: self.path.clone(),
                    line: i + 1,
                    message: e.to_string(),
                })
            })
            .collect()
    }

    /// Drop a torn final line left by an interrupted append
    fn discard_torn_tail(file: &mut File) -> std::io::Result<()> {
        let len = file.metadata()?.len();
        if len == 0 {
            return Ok(());
        }

        let mut last = [0u8; 1];
        file.seek(SeekFrom::Start(len - 1))?;
        file.read_exact(&mut last)?;
        if last[0] == b'\n' {
            return Ok(());
        }

        let mut content = Vec::with_capacity(len as usize);
        file.seek(SeekFrom::Start(0))?;
        file.read_to_end(&mut content)?;
        let keep = content
            .iter()
            .rposition(|b| *b == b'\n')
            .map_or(0, |pos| pos + 1);
        file.set_len(keep as u64)?;
        tracing::warn!(discarded = len - keep as u64, "truncated torn ledger line");
        Ok(())
    }
}

impl LedgerStore for JsonlLedgerStore {
    fn append(&self, entry: &LedgerEntry) -> HerbicalibResult<()> {
        let mut line = serde_json::to_string(entry).map_err(HerbicalibError::storage)?;
        line.push('\n');

        let _guard = self.lock(true)?;

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)?;
        Self::discard_torn_tail(&mut file)?;
        file.write_all(line.as_bytes())?;
        file.sync_data()?;

        tracing::debug!(
            path = %self.path.display(),
            category = %entry.category(),
            "appended ledger entry"
        );
        Ok(())
    }

    fn load_all(&self) -> HerbicalibResult<Vec<LedgerEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let _guard = self.lock(false)?;
        self.read_entries()
    }

    fn delete_at(&self, index: usize) -> HerbicalibResult<LedgerEntry> {
        let _guard = self.lock(true)?;

        let mut entries = self.read_entries()?;
        if index >= entries.len() {
            return Err(HerbicalibError::IndexOutOfRange {
                index,
                len: entries.len(),
            });
        }
        let removed = entries.remove(index);

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let mut tmp = NamedTempFile::new_in(&dir)?;
        for entry in &entries {
            let line = serde_json::to_string(entry).map_err(HerbicalibError::storage)?;
            writeln!(tmp, "{}", line)?;
        }
        // NamedTempFile is created 0600; the store keeps its own mode
        let permissions = fs::metadata(&self.path)?.permissions();
        tmp.as_file().set_permissions(permissions)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        tracing::info!(path = %self.path.display(), index, "deleted ledger entry");
        Ok(removed)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::Category;
    use chrono::{NaiveDate, NaiveDateTime};
    use tempfile::tempdir;

    fn at(minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 6, 1)
            .unwrap()
            .and_hms_opt(8, minute, 0)
            .unwrap()
    }

    fn pesticide(minute: u32, liters: f64) -> LedgerEntry {
        LedgerEntry::usage(at(minute), Category::Pesticide, liters).unwrap()
    }

    #[test]
    fn load_nonexistent_returns_empty_ledger() {
        let dir = tempdir().unwrap();
        let store = JsonlLedgerStore::new(dir.path().join("ledger.jsonl"));

        assert!(store.load_all().unwrap().is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn append_preserves_order() {
        let dir = tempdir().unwrap();
        let store = JsonlLedgerStore::new(dir.path().join("nested/ledger.jsonl"));

        store.append(&pesticide(0, 1.0)).unwrap();
        store.append(&pesticide(1, 2.0)).unwrap();
        store.append(&pesticide(2, 3.0)).unwrap();

        let volumes: Vec<_> = store
            .load_all()
            .unwrap()
            .iter()
            .map(|e| e.field("volume_l").unwrap())
            .collect();
        assert_eq!(volumes, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn append_does_not_rewrite_existing_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ledger.jsonl");
        let store = JsonlLedgerStore::new(&path);

        store.append(&pesticide(0, 1.0)).unwrap();
        let before = fs::read_to_string(&path).unwrap();
        store.append(&pesticide(1, 2.0)).unwrap();
        let after = fs::read_to_string(&path).unwrap();

        assert!(after.starts_with(&before));
        assert_eq!(after.lines().count(), 2);
    }

    #[test]
    fn torn_tail_is_ignored_then_replaced() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ledger.jsonl");
        let store = JsonlLedgerStore::new(&path);

        store.append(&pesticide(0, 1.0)).unwrap();
        let mut file = OpenOptions::new().append(true).open(&path).unwrap();
        file.write_all(br#"{"timestamp":"2026-06-01T08:0"#).unwrap();
        drop(file);

        assert_eq!(store.load_all().unwrap().len(), 1);

        store.append(&pesticide(2, 4.0)).unwrap();
        let entries = store.load_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].field("volume_l"), Some(4.0));
    }

    #[test]
    fn corrupt_line_reports_location() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ledger.jsonl");
        fs::write(&path, "not json\n").unwrap();

        let err = JsonlLedgerStore::new(&path).load_all().unwrap_err();
        assert!(matches!(err, HerbicalibError::CorruptStore { line: 1, .. }));
    }

    #[test]
    fn delete_removes_only_target() {
        let dir = tempdir().unwrap();
        let store = JsonlLedgerStore::new(dir.path().join("ledger.jsonl"));
        for i in 0..3 {
            store.append(&pesticide(i, f64::from(i))).unwrap();
        }

        let removed = store.delete_at(1).unwrap();
        assert_eq!(removed.field("volume_l"), Some(1.0));

        let remaining: Vec<_> = store
            .load_all()
            .unwrap()
            .iter()
            .map(|e| e.field("volume_l").unwrap())
            .collect();
        assert_eq!(remaining, vec![0.0, 2.0]);
    }

    #[test]
    fn delete_out_of_range_leaves_file_untouched() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ledger.jsonl");
        let store = JsonlLedgerStore::new(&path);
        store.append(&pesticide(0, 1.0)).unwrap();
        let before = fs::read(&path).unwrap();

        let err = store.delete_at(1).unwrap_err();
        assert!(matches!(
            err,
            HerbicalibError::IndexOutOfRange { index: 1, len: 1 }
        ));
        assert_eq!(fs::read(&path).unwrap(), before);
    }

    #[cfg(unix)]
    #[test]
    fn delete_keeps_store_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("ledger.jsonl");
        let store = JsonlLedgerStore::new(&path);
        store.append(&pesticide(0, 1.0)).unwrap();
        store.append(&pesticide(1, 2.0)).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o640)).unwrap();

        store.delete_at(0).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o640);
    }

    #[test]
    fn lock_file_keeps_store_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("records.lock");
        let store = JsonlLedgerStore::new(&path);

        assert_eq!(store.lock_path(), dir.path().join("records.lock.lock"));
        assert_eq!(
            JsonlLedgerStore::new(dir.path().join("ledger.jsonl")).lock_path(),
            dir.path().join("ledger.jsonl.lock")
        );

        store.append(&pesticide(0, 1.0)).unwrap();
        store.append(&pesticide(1, 2.0)).unwrap();
        assert_eq!(store.load_all().unwrap().len(), 2);
        assert_eq!(store.delete_at(0).unwrap().field("volume_l"), Some(1.0));
        assert_eq!(store.load_all().unwrap().len(), 1);
    }

    #[test]
    fn unreadable_store_is_an_io_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ledger.jsonl");
        fs::create_dir(&path).unwrap();
        let store = JsonlLedgerStore::new(&path);

        let err = store.load_all().unwrap_err();
        assert!(matches!(err, HerbicalibError::Io(_)));
        assert_eq!(err.code(), "storage_error");
    }

    #[test]
    fn delete_on_missing_store_is_out_of_range() {
        let dir = tempdir().unwrap();
        let store = JsonlLedgerStore::new(dir.path().join("ledger.jsonl"));

        assert!(matches!(
            store.delete_at(0),
            Err(HerbicalibError::IndexOutOfRange { index: 0, len: 0 })
        ));
        assert!(!store.path().exists());
    }
}
