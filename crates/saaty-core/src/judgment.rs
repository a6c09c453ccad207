//! # Pairwise Judgments
//!
//! One judgment per unordered pair of criteria. Only the upper triangle
//! (`row < column`) is ever stored; a judgment entered for `(j, i)` is
//! normalized to `(i, j)` with the favored side flipped.

use crate::scale::Intensity;
use crate::SaatyError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// PAIR
// =============================================================================

/// An unordered pair of criterion indices, stored as `row < column`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pair {
    row: usize,
    column: usize,
}

impl Pair {
    /// Build a pair from two distinct indices in either order.
    ///
    /// Returns `None` if `a == b` (the diagonal is never elicited).
    #[must_use]
    pub fn new(a: usize, b: usize) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self { row: a, column: b }),
            std::cmp::Ordering::Greater => Some(Self { row: b, column: a }),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Build a pair the caller already knows is ordered.
    pub(crate) const fn ordered(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// The earlier criterion.
    #[must_use]
    pub const fn row(&self) -> usize {
        self.row
    }

    /// The later criterion.
    #[must_use]
    pub const fn column(&self) -> usize {
        self.column
    }
}

// =============================================================================
// JUDGMENT
// =============================================================================

/// Which criterion of a pair a judgment favors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Favors {
    /// The earlier criterion (`row`). This is what a form question
    /// "how does A compare to B" records.
    #[default]
    Row,
    /// The later criterion (`column`).
    Column,
}

impl Favors {
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Row => Self::Column,
            Self::Column => Self::Row,
        }
    }
}

/// A single pairwise comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Judgment {
    pub intensity: Intensity,
    #[serde(default)]
    pub favors: Favors,
}

impl Judgment {
    /// The earlier criterion is `intensity` more important than the later.
    #[must_use]
    pub const fn favoring_row(intensity: Intensity) -> Self {
        Self {
            intensity,
            favors: Favors::Row,
        }
    }

    /// The later criterion is `intensity` more important than the earlier.
    #[must_use]
    pub const fn favoring_column(intensity: Intensity) -> Self {
        Self {
            intensity,
            favors: Favors::Column,
        }
    }

    /// Same comparison seen from the other side of the pair.
    #[must_use]
    pub const fn flipped(self) -> Self {
        Self {
            intensity: self.intensity,
            favors: self.favors.flipped(),
        }
    }
}

impl From<Intensity> for Judgment {
    fn from(intensity: Intensity) -> Self {
        Self::favoring_row(intensity)
    }
}

// =============================================================================
// JUDGMENTS
// =============================================================================

/// Judgments keyed by pair. BTreeMap keeps iteration deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Judgments {
    entries: BTreeMap<Pair, Judgment>,
}

impl Judgments {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The same intensity for every pair of `n` criteria, favoring the row.
    #[must_use]
    pub fn uniform(n: usize, intensity: Intensity) -> Self {
        let mut judgments = Self::new();
        for row in 0..n {
            for column in row + 1..n {
                judgments
                    .entries
                    .insert(Pair::ordered(row, column), Judgment::favoring_row(intensity));
            }
        }
        judgments
    }

    /// Record a judgment for criteria `a` and `b`, expressed from `a`'s side.
    ///
    /// # Errors
    ///
    /// - `InvalidPair` if `a == b`
    /// - `DuplicateJudgment` if the pair was already judged
    pub fn insert(
        &mut self,
        a: usize,
        b: usize,
        judgment: impl Into<Judgment>,
    ) -> Result<(), SaatyError> {
        let pair = Pair::new(a, b).ok_or(SaatyError::InvalidPair { row: a, column: b })?;
        let judgment = judgment.into();
        let judgment = if a > b { judgment.flipped() } else { judgment };

        if self.entries.contains_key(&pair) {
            return Err(SaatyError::DuplicateJudgment {
                row: pair.row,
                column: pair.column,
            });
        }
        self.entries.insert(pair, judgment);
        Ok(())
    }

    /// Record or overwrite a judgment, as a form field being changed would.
    pub fn set(
        &mut self,
        a: usize,
        b: usize,
        judgment: impl Into<Judgment>,
    ) -> Result<(), SaatyError> {
        if let Some(pair) = Pair::new(a, b) {
            self.entries.remove(&pair);
        }
        self.insert(a, b, judgment)
    }

    #[must_use]
    pub fn get(&self, pair: Pair) -> Option<Judgment> {
        self.entries.get(&pair).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Judged pairs in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (Pair, Judgment)> + '_ {
        self.entries.iter().map(|(pair, judgment)| (*pair, *judgment))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_normalizes_order() {
        let pair = Pair::new(3, 1).expect("distinct");
        assert_eq!((pair.row(), pair.column()), (1, 3));
        assert!(Pair::new(2, 2).is_none());
    }

    #[test]
    fn reversed_insert_flips_favored_side() {
        let mut judgments = Judgments::new();
        judgments
            .insert(2, 0, Intensity::StronglyMore)
            .expect("insert");

        let stored = judgments.get(Pair::new(0, 2).expect("pair")).expect("present");
        assert_eq!(stored, Judgment::favoring_column(Intensity::StronglyMore));
    }

    #[test]
    fn diagonal_rejected() {
        let mut judgments = Judgments::new();
        assert!(matches!(
            judgments.insert(1, 1, Intensity::Equal),
            Err(SaatyError::InvalidPair { .. })
        ));
    }

    #[test]
    fn duplicate_rejected_set_overwrites() {
        let mut judgments = Judgments::new();
        judgments.insert(0, 1, Intensity::Equal).expect("first");
        assert!(matches!(
            judgments.insert(1, 0, Intensity::SlightlyMore),
            Err(SaatyError::DuplicateJudgment { row: 0, column: 1 })
        ));

        judgments
            .set(0, 1, Intensity::ExtremelyMore)
            .expect("overwrite");
        assert_eq!(judgments.len(), 1);
        assert_eq!(
            judgments.get(Pair::new(0, 1).expect("pair")).map(|j| j.intensity),
            Some(Intensity::ExtremelyMore)
        );
    }

    #[test]
    fn uniform_covers_upper_triangle() {
        let judgments = Judgments::uniform(5, Intensity::Equal);
        assert_eq!(judgments.len(), 10);
        assert!(judgments.iter().all(|(p, _)| p.row() < p.column()));
    }

    #[test]
    fn intensity_converts_to_row_judgment() {
        let judgment = Judgment::from(Intensity::ModeratelyMore);
        assert_eq!(judgment.favors, Favors::Row);
        assert_eq!(judgment.flipped().flipped(), judgment);
    }
}
