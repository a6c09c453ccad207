//! # Fixed Primitives
//!
//! Compile-time constants for criteria bounds, input limits and the record
//! persistence format. These are immutable at runtime; configurable bounds
//! are always validated against them.

/// Smallest number of criteria a comparison can have.
///
/// A single criterion has no pairs and would trivially weigh 100%.
pub const MIN_CRITERIA: usize = 2;

/// Largest number of criteria accepted by default.
pub const MAX_CRITERIA: usize = 15;

/// Upper bound used by the reduced questionnaire variant.
pub const LEGACY_MAX_CRITERIA: usize = 10;

/// Hard ceiling for any configured upper bound.
///
/// Row products of values in `[1/9, 9]` stay well inside `f64` range up to
/// this size.
pub const CRITERIA_CEILING: usize = 64;

/// Maximum length for a criterion label, in bytes.
pub const MAX_LABEL_LENGTH: usize = 256;

/// Maximum length for the respondent and phenomenon fields, in bytes.
pub const MAX_FIELD_LENGTH: usize = 256;

/// Tolerance applied when validating externally supplied matrices.
pub const RECIPROCAL_TOLERANCE: f64 = 1e-9;

/// Magic bytes prefixed to every stored record.
pub const MAGIC_BYTES: &[u8; 4] = b"SATY";

/// Current record format version.
///
/// Increment this when making breaking changes to `SubmissionRecord`.
pub const FORMAT_VERSION: u8 = 1;

/// Sheet used when configuration does not name one.
pub const DEFAULT_SHEET: &str = "responses";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bounds_are_ordered() {
        assert!(MIN_CRITERIA < LEGACY_MAX_CRITERIA);
        assert!(LEGACY_MAX_CRITERIA < MAX_CRITERIA);
        assert!(MAX_CRITERIA <= CRITERIA_CEILING);
    }

    #[test]
    fn magic_bytes_correct() {
        assert_eq!(MAGIC_BYTES, b"SATY");
    }
}
