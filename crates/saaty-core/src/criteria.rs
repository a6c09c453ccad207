//! # Criteria
//!
//! The ordered, labelled set of criteria being compared. Position in the set
//! is the row/column index in the comparison matrix.
//!
//! Labels are trimmed on entry. A label that is empty after trimming is not
//! an error while the form is still being filled in; [`Criteria::readiness`]
//! reports it as [`Readiness::Deferred`]. [`Criteria::new`] is the strict
//! constructor used when a computation is requested.

use crate::judgment::Pair;
use crate::primitives::{
    CRITERIA_CEILING, LEGACY_MAX_CRITERIA, MAX_CRITERIA, MAX_LABEL_LENGTH, MIN_CRITERIA,
};
use crate::SaatyError;
use serde::Serialize;
use std::collections::BTreeSet;

// =============================================================================
// BOUNDS
// =============================================================================

/// Inclusive bounds on the number of criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CriteriaBounds {
    min: usize,
    max: usize,
}

impl CriteriaBounds {
    /// `2..=15`, the full questionnaire.
    pub const CANONICAL: Self = Self {
        min: MIN_CRITERIA,
        max: MAX_CRITERIA,
    };

    /// `2..=10`, the reduced questionnaire.
    pub const LEGACY: Self = Self {
        min: MIN_CRITERIA,
        max: LEGACY_MAX_CRITERIA,
    };

    /// Create custom bounds.
    ///
    /// `min` must be at least 2, `max` at least `min` and at most
    /// `CRITERIA_CEILING`.
    pub fn new(min: usize, max: usize) -> Result<Self, SaatyError> {
        if min < MIN_CRITERIA || min > max || max > CRITERIA_CEILING {
            return Err(SaatyError::InvalidBounds { min, max });
        }
        Ok(Self { min, max })
    }

    #[must_use]
    pub const fn min(&self) -> usize {
        self.min
    }

    #[must_use]
    pub const fn max(&self) -> usize {
        self.max
    }

    /// Whether `count` criteria are allowed.
    #[must_use]
    pub const fn contains(&self, count: usize) -> bool {
        count >= self.min && count <= self.max
    }

    /// Reject `count` if it is outside the bounds.
    pub fn check(&self, count: usize) -> Result<(), SaatyError> {
        if self.contains(count) {
            Ok(())
        } else {
            Err(SaatyError::CriteriaCountOutOfRange {
                count,
                min: self.min,
                max: self.max,
            })
        }
    }
}

impl Default for CriteriaBounds {
    fn default() -> Self {
        Self::CANONICAL
    }
}

// =============================================================================
// READINESS
// =============================================================================

/// Outcome of checking a partially filled list of labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Readiness {
    /// Every label is present; the matrix can be built.
    Ready(Criteria),
    /// Some labels are still empty (indices listed); construction waits.
    Deferred { empty: Vec<usize> },
}

impl Readiness {
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

// =============================================================================
// CRITERIA
// =============================================================================

/// A validated, ordered list of unique criterion labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Criteria {
    labels: Vec<String>,
}

impl Criteria {
    /// Validate and build a criteria set.
    ///
    /// # Errors
    ///
    /// - `CriteriaCountOutOfRange` if the count is outside `bounds`
    /// - `EmptyCriterion` for the first empty label
    /// - `CriterionTooLong` if a label exceeds `MAX_LABEL_LENGTH`
    /// - `DuplicateCriterion` if two labels are equal after trimming
    pub fn new<I, S>(labels: I, bounds: CriteriaBounds) -> Result<Self, SaatyError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let labels = normalize(labels);
        bounds.check(labels.len())?;

        if let Some(index) = labels.iter().position(String::is_empty) {
            return Err(SaatyError::EmptyCriterion { index });
        }

        let mut seen = BTreeSet::new();
        for (index, label) in labels.iter().enumerate() {
            if label.len() > MAX_LABEL_LENGTH {
                return Err(SaatyError::CriterionTooLong {
                    index,
                    length: label.len(),
                    max: MAX_LABEL_LENGTH,
                });
            }
            if !seen.insert(label.as_str()) {
                return Err(SaatyError::DuplicateCriterion(label.clone()));
            }
        }

        Ok(Self { labels })
    }

    /// Check whether a form's labels are complete enough to build a matrix.
    ///
    /// An out-of-range count is still an error: the form should never offer
    /// that many fields in the first place.
    pub fn readiness<I, S>(labels: I, bounds: CriteriaBounds) -> Result<Readiness, SaatyError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let labels = normalize(labels);
        bounds.check(labels.len())?;

        let empty: Vec<usize> = labels
            .iter()
            .enumerate()
            .filter(|(_, label)| label.is_empty())
            .map(|(index, _)| index)
            .collect();

        if empty.is_empty() {
            Self::new(labels, bounds).map(Readiness::Ready)
        } else {
            Ok(Readiness::Deferred { empty })
        }
    }

    /// Number of criteria.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always false for a validated set; provided for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// Index of a label, if present.
    #[must_use]
    pub fn position(&self, label: &str) -> Option<usize> {
        let label = label.trim();
        self.labels.iter().position(|l| l == label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.labels
    }

    /// Every unordered pair `(i, j)` with `i < j`, in ascending order.
    pub fn pairs(&self) -> impl Iterator<Item = Pair> + '_ {
        let n = self.labels.len();
        (0..n).flat_map(move |row| (row + 1..n).map(move |column| Pair::ordered(row, column)))
    }

    /// Number of pairwise judgments needed: `n * (n - 1) / 2`.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        let n = self.labels.len();
        n * n.saturating_sub(1) / 2
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<String> {
        self.labels
    }
}

fn normalize<I, S>(labels: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    labels
        .into_iter()
        .map(|label| label.as_ref().trim().to_string())
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================
