//! # Sheet Storage
//!
//! Append-only tabular storage for submission records. A sheet is a named
//! list of rows; rows are numbered from 1 in append order.
//!
//! Two backends:
//! - `InMemory`: `MemorySheets` (volatile, used by tests and `--database :memory:`)
//! - `Persistent`: `RedbSheets` (disk-backed, ACID)
//!
//! Every failure is reported with `ErrorKind::Persistence`. A failed append
//! leaves the caller's `Assessment` untouched.

mod redb_sheets;

pub use redb_sheets::RedbSheets;

use crate::{RowId, SaatyError, SheetId, SubmissionRecord};
use std::collections::BTreeMap;
use std::path::Path;

/// Where submission records go.
pub trait SheetStore {
    /// Append one row to `sheet` and return its row number.
    fn append(&mut self, sheet: &SheetId, record: &SubmissionRecord)
    -> Result<RowId, SaatyError>;

    /// All rows of `sheet` in append order. Unknown sheets are empty.
    fn rows(&self, sheet: &SheetId) -> Result<Vec<(RowId, SubmissionRecord)>, SaatyError>;

    /// Number of rows in `sheet`.
    fn row_count(&self, sheet: &SheetId) -> Result<u64, SaatyError>;
}

// =============================================================================
// IN-MEMORY BACKEND
// =============================================================================

/// Volatile sheets held in a BTreeMap.
#[derive(Debug, Clone, Default)]
pub struct MemorySheets {
    sheets: BTreeMap<SheetId, Vec<SubmissionRecord>>,
}

impl MemorySheets {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SheetStore for MemorySheets {
    fn append(
        &mut self,
        sheet: &SheetId,
        record: &SubmissionRecord,
    ) -> Result<RowId, SaatyError> {
        let rows = self.sheets.entry(sheet.clone()).or_default();
        rows.push(record.clone());
        Ok(RowId(rows.len() as u64))
    }

    fn rows(&self, sheet: &SheetId) -> Result<Vec<(RowId, SubmissionRecord)>, SaatyError> {
        Ok(self
            .sheets
            .get(sheet)
            .map(|rows| {
                rows.iter()
                    .enumerate()
                    .map(|(index, record)| (RowId(index as u64 + 1), record.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    fn row_count(&self, sheet: &SheetId) -> Result<u64, SaatyError> {
        Ok(self.sheets.get(sheet).map_or(0, |rows| rows.len() as u64))
    }
}

// =============================================================================
// BACKEND SELECTION
// =============================================================================

/// Storage backend chosen at startup.
#[derive(Debug)]
pub enum SheetBackend {
    /// Volatile sheets.
    InMemory(MemorySheets),
    /// Disk-backed sheets using redb.
    Persistent(RedbSheets),
}

impl Default for SheetBackend {
    fn default() -> Self {
        Self::InMemory(MemorySheets::new())
    }
}

impl SheetBackend {
    /// Open or create a redb file at `path`.
    pub fn with_redb(path: impl AsRef<Path>) -> Result<Self, SaatyError> {
        RedbSheets::open(path).map(Self::Persistent)
    }

    /// Whether rows survive a restart.
    #[must_use]
    pub const fn is_persistent(&self) -> bool {
        matches!(self, Self::Persistent(_))
    }
}

impl SheetStore for SheetBackend {
    fn append(
        &mut self,
        sheet: &SheetId,
        record: &SubmissionRecord,
    ) -> Result<RowId, SaatyError> {
        match self {
            Self::InMemory(sheets) => sheets.append(sheet, record),
            Self::Persistent(sheets) => sheets.append(sheet, record),
        }
    }

    fn rows(&self, sheet: &SheetId) -> Result<Vec<(RowId, SubmissionRecord)>, SaatyError> {
        match self {
            Self::InMemory(sheets) => sheets.rows(sheet),
            Self::Persistent(sheets) => sheets.rows(sheet),
        }
    }

    fn row_count(&self, sheet: &SheetId) -> Result<u64, SaatyError> {
        match self {
            Self::InMemory(sheets) => sheets.row_count(sheet),
            Self::Persistent(sheets) => sheets.row_count(sheet),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
