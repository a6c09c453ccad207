//! # redb-backed Sheet Storage
//!
//! Sheets persisted in a redb embedded database:
//! - ACID transactions: a row and its sheet counter commit together
//! - Crash safety (copy-on-write B-trees)
//! - MVCC (concurrent readers, single writer)
//!
//! Row payloads use the header-prefixed format from `formats`.

use super::SheetStore;
use crate::formats::{record_from_bytes, record_to_bytes};
use crate::{RowId, SaatyError, SheetId, SubmissionRecord};
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use std::path::Path;

/// Table for rows: (sheet id, row number) -> encoded record
const ROWS: TableDefinition<(&str, u64), &[u8]> = TableDefinition::new("rows");

/// Table for per-sheet row counters: sheet id -> last row number
const ROW_COUNTS: TableDefinition<&str, u64> = TableDefinition::new("row_counts");

fn storage_error(e: impl std::fmt::Display) -> SaatyError {
    SaatyError::Persistence(e.to_string())
}

/// A disk-backed sheet store using redb.
pub struct RedbSheets {
    db: Database,
}

impl std::fmt::Debug for RedbSheets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbSheets").finish_non_exhaustive()
    }
}

impl RedbSheets {
    /// Open or create a sheet database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SaatyError> {
        let db = Database::create(path.as_ref()).map_err(storage_error)?;

        // Initialize tables if they don't exist
        {
            let write_txn = db.begin_write().map_err(storage_error)?;
            let _ = write_txn.open_table(ROWS).map_err(storage_error)?;
            let _ = write_txn.open_table(ROW_COUNTS).map_err(storage_error)?;
            write_txn.commit().map_err(storage_error)?;
        }

        Ok(Self { db })
    }
}

impl SheetStore for RedbSheets {
    fn append(
        &mut self,
        sheet: &SheetId,
        record: &SubmissionRecord,
    ) -> Result<RowId, SaatyError> {
        // Encode before opening the transaction so a bad record never
        // leaves a half-written row behind.
        let bytes = record_to_bytes(record)?;

        let write_txn = self.db.begin_write().map_err(storage_error)?;
        let row = {
            let mut counts = write_txn.open_table(ROW_COUNTS).map_err(storage_error)?;
            let mut rows = write_txn.open_table(ROWS).map_err(storage_error)?;

            let last = counts
                .get(sheet.as_str())
                .map_err(storage_error)?
                .map(|v| v.value())
                .unwrap_or(0);
            let row = RowId(last).next();

            rows.insert((sheet.as_str(), row.value()), bytes.as_slice())
                .map_err(storage_error)?;
            counts
                .insert(sheet.as_str(), row.value())
                .map_err(storage_error)?;
            row
        };
        write_txn.commit().map_err(storage_error)?;

        Ok(row)
    }

    fn rows(&self, sheet: &SheetId) -> Result<Vec<(RowId, SubmissionRecord)>, SaatyError> {
        let read_txn = self.db.begin_read().map_err(storage_error)?;
        let table = read_txn.open_table(ROWS).map_err(storage_error)?;

        let mut rows = Vec::new();
        for entry in table
            .range((sheet.as_str(), 0u64)..=(sheet.as_str(), u64::MAX))
            .map_err(storage_error)?
        {
            let (key, value) = entry.map_err(storage_error)?;
            let (_, row) = key.value();
            rows.push((RowId(row), record_from_bytes(value.value())?));
        }

        Ok(rows)
    }

    fn row_count(&self, sheet: &SheetId) -> Result<u64, SaatyError> {
        let read_txn = self.db.begin_read().map_err(storage_error)?;
        let table = read_txn.open_table(ROW_COUNTS).map_err(storage_error)?;
        Ok(table
            .get(sheet.as_str())
            .map_err(storage_error)?
            .map(|v| v.value())
            .unwrap_or(0))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RecordEntry;
    use tempfile::tempdir;

    fn record(respondent: &str, percent: f64) -> SubmissionRecord {
        SubmissionRecord {
            respondent: respondent.into(),
            phenomenon: "drought".into(),
            entries: vec![
                RecordEntry {
                    criterion: "Water".into(),
                    percent,
                },
                RecordEntry {
                    criterion: "Land".into(),
                    percent: 100.0 - percent,
                },
            ],
        }
    }

    #[test]
    fn append_and_read_back() {
        let temp = tempdir().expect("temp dir");
        let mut store = RedbSheets::open(temp.path().join("sheets.redb")).expect("open db");
        let sheet = SheetId::new("survey");

        assert_eq!(store.append(&sheet, &record("a", 60.0)).expect("append"), RowId(1));
        assert_eq!(store.append(&sheet, &record("b", 30.0)).expect("append"), RowId(2));

        let rows = store.rows(&sheet).expect("rows");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], (RowId(1), record("a", 60.0)));
        assert_eq!(rows[1], (RowId(2), record("b", 30.0)));
        assert_eq!(store.row_count(&sheet).expect("count"), 2);
    }

    #[test]
    fn persistence_across_reopen() {
        let temp = tempdir().expect("temp dir");
        let path = temp.path().join("sheets.redb");
        let sheet = SheetId::default();

        {
            let mut store = RedbSheets::open(&path).expect("open db");
            store.append(&sheet, &record("a", 50.0)).expect("append");
        }

        let mut store = RedbSheets::open(&path).expect("reopen db");
        assert_eq!(store.row_count(&sheet).expect("count"), 1);
        assert_eq!(store.append(&sheet, &record("b", 10.0)).expect("append"), RowId(2));
    }

    #[test]
    fn sheets_do_not_share_rows() {
        let temp = tempdir().expect("temp dir");
        let mut store = RedbSheets::open(temp.path().join("sheets.redb")).expect("open db");

        store
            .append(&SheetId::new("a"), &record("x", 50.0))
            .expect("append");
        store
            .append(&SheetId::new("ab"), &record("y", 50.0))
            .expect("append");

        let rows = store.rows(&SheetId::new("a")).expect("rows");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].1.respondent, "x");
        assert!(store.rows(&SheetId::new("missing")).expect("rows").is_empty());
    }
}
