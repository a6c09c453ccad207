//! # Core Type Definitions
//!
//! Identifiers shared by the solver and the storage layer, and the error type
//! used throughout the crate.
//!
//! Errors fall into two kinds:
//! - **Invalid input**: the caller supplied something the builder refuses to
//!   work with (bad count, empty label, missing pair, ...)
//! - **Persistence**: the record store could not take the row. A computed
//!   `Assessment` stays valid regardless.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// STORAGE IDENTIFIERS
// =============================================================================

/// Identifier of the sheet (table) rows are appended to.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SheetId(pub String);

impl SheetId {
    /// Create a new sheet identifier.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SheetId {
    fn default() -> Self {
        Self::new(crate::primitives::DEFAULT_SHEET)
    }
}

impl fmt::Display for SheetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Position of an appended row within its sheet. The first row is 1.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct RowId(pub u64);

impl RowId {
    /// Get the raw row number.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// The row following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Broad classification of a [`SaatyError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Caller-side validation failure; nothing was computed.
    InvalidInput,
    /// The record store rejected or failed the write.
    Persistence,
    /// Reading or writing a local file failed.
    Io,
}

/// Errors that can occur in the Saaty system.
///
/// - No silent failures
/// - The core never panics on bad input; every rejection is a variant here
#[derive(Debug, Error)]
pub enum SaatyError {
    /// Number of criteria is outside the configured bounds.
    #[error("Criteria count {count} outside allowed range {min}..={max}")]
    CriteriaCountOutOfRange { count: usize, min: usize, max: usize },

    /// A criterion label is empty (or whitespace only).
    #[error("Criterion {index} has an empty label")]
    EmptyCriterion { index: usize },

    /// A criterion label exceeds the length limit.
    #[error("Criterion {index} label is {length} bytes (maximum {max})")]
    CriterionTooLong {
        index: usize,
        length: usize,
        max: usize,
    },

    /// Two criteria share the same label.
    #[error("Duplicate criterion label: {0:?}")]
    DuplicateCriterion(String),

    /// No judgment was supplied for a pair.
    #[error("Missing judgment for pair ({row}, {column})")]
    MissingJudgment { row: usize, column: usize },

    /// A judgment refers to the diagonal or to a criterion that does not exist.
    #[error("Invalid pair ({row}, {column})")]
    InvalidPair { row: usize, column: usize },

    /// The same pair was judged more than once.
    #[error("Duplicate judgment for pair ({row}, {column})")]
    DuplicateJudgment { row: usize, column: usize },

    /// A scale label or identifier could not be recognized.
    #[error("Unknown intensity: {0:?}")]
    UnknownIntensity(String),

    /// A label language could not be recognized.
    #[error("Unknown locale: {0:?}")]
    UnknownLocale(String),

    /// Configured criteria bounds are unusable.
    #[error("Invalid criteria bounds {min}..={max}")]
    InvalidBounds { min: usize, max: usize },

    /// An externally supplied matrix is not a positive reciprocal matrix.
    #[error("Invalid comparison matrix: {0}")]
    InvalidMatrix(String),

    /// A required text field is empty.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// A text field exceeds the length limit.
    #[error("Field {field} exceeds maximum of {max} bytes")]
    FieldTooLong { field: &'static str, max: usize },

    /// The record store failed (open, write, commit, read).
    #[error("Persistence failure: {0}")]
    Persistence(String),

    /// A stored record could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(String),
}

impl SaatyError {
    /// Classify the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Persistence(_) | Self::Serialization(_) => ErrorKind::Persistence,
            Self::Io(_) => ErrorKind::Io,
            _ => ErrorKind::InvalidInput,
        }
    }

    /// True if the error is a caller-side validation failure.
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        matches!(self.kind(), ErrorKind::InvalidInput)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_id_next_saturates() {
        assert_eq!(RowId(1).next(), RowId(2));
        assert_eq!(RowId(u64::MAX).next(), RowId(u64::MAX));
    }

    #[test]
    fn error_kinds() {
        assert_eq!(
            SaatyError::EmptyCriterion { index: 0 }.kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            SaatyError::MissingJudgment { row: 0, column: 1 }.kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            SaatyError::Persistence("quota".into()).kind(),
            ErrorKind::Persistence
        );
        assert_eq!(
            SaatyError::Serialization("bad".into()).kind(),
            ErrorKind::Persistence
        );
        assert_eq!(SaatyError::Io("gone".into()).kind(), ErrorKind::Io);
    }

    #[test]
    fn default_sheet_name() {
        assert_eq!(SheetId::default().as_str(), "responses");
        assert_eq!(SheetId::new("abc").to_string(), "abc");
    }
}
