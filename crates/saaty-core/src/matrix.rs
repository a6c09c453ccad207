//! # Comparison Matrix Builder
//!
//! Builds the N×N positive reciprocal matrix from criteria and judgments.
//!
//! Invariants of every `ComparisonMatrix`:
//! - all entries are finite and strictly positive
//! - the diagonal is exactly 1
//! - `m[j][i] == 1 / m[i][j]` for all `i != j`
//!
//! The builder sets the favored entry to the scale value and the opposite
//! entry to its literal reciprocal, so `m[i][j] * m[j][i] == 1` holds
//! exactly. No consistency ratio is computed; intransitive judgments are
//! accepted as given.

use crate::criteria::{Criteria, CriteriaBounds};
use crate::judgment::{Favors, Judgments};
use crate::primitives::RECIPROCAL_TOLERANCE;
use crate::SaatyError;

/// A square positive reciprocal matrix stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonMatrix {
    size: usize,
    entries: Vec<f64>,
}

impl ComparisonMatrix {
    /// An `n`×`n` matrix of ones: every criterion equal to every other.
    #[must_use]
    pub fn ones(size: usize) -> Self {
        Self {
            size,
            entries: vec![1.0; size * size],
        }
    }

    /// Build the matrix for `criteria` from one judgment per pair.
    ///
    /// Pairs are visited in ascending order `(0,1), (0,2), ..., (n-2,n-1)`.
    ///
    /// # Errors
    ///
    /// - `InvalidPair` if a judgment names an index `>= criteria.len()`
    /// - `MissingJudgment` for the first pair without a judgment
    pub fn build(criteria: &Criteria, judgments: &Judgments) -> Result<Self, SaatyError> {
        let size = criteria.len();

        if let Some((pair, _)) = judgments.iter().find(|(pair, _)| pair.column() >= size) {
            return Err(SaatyError::InvalidPair {
                row: pair.row(),
                column: pair.column(),
            });
        }

        let mut matrix = Self::ones(size);
        for pair in criteria.pairs() {
            let judgment = judgments
                .get(pair)
                .ok_or(SaatyError::MissingJudgment {
                    row: pair.row(),
                    column: pair.column(),
                })?;

            let (winner, loser) = match judgment.favors {
                Favors::Row => (pair.row(), pair.column()),
                Favors::Column => (pair.column(), pair.row()),
            };
            let value = judgment.intensity.value();
            matrix.set(winner, loser, value);
            matrix.set(loser, winner, 1.0 / value);
        }

        Ok(matrix)
    }

    /// Accept a matrix supplied from outside the builder.
    ///
    /// # Errors
    ///
    /// - `CriteriaCountOutOfRange` if the number of rows is outside `bounds`
    /// - `InvalidMatrix` unless the rows form a square matrix with finite
    ///   positive entries, a unit diagonal and reciprocal pairs (product
    ///   within `RECIPROCAL_TOLERANCE` of 1)
    pub fn from_rows(rows: Vec<Vec<f64>>, bounds: CriteriaBounds) -> Result<Self, SaatyError> {
        let size = rows.len();
        bounds.check(size)?;

        if let Some(index) = rows.iter().position(|row| row.len() != size) {
            return Err(SaatyError::InvalidMatrix(format!(
                "row {} has {} entries, expected {}",
                index,
                rows[index].len(),
                size
            )));
        }

        let entries: Vec<f64> = rows.into_iter().flatten().collect();
        let matrix = Self { size, entries };

        for i in 0..size {
            for j in 0..size {
                let value = matrix.get(i, j);
                if !value.is_finite() || value <= 0.0 {
                    return Err(SaatyError::InvalidMatrix(format!(
                        "entry ({}, {}) = {} is not a positive number",
                        i, j, value
                    )));
                }
            }
            if matrix.get(i, i) != 1.0 {
                return Err(SaatyError::InvalidMatrix(format!(
                    "diagonal entry ({}, {}) must be 1",
                    i, i
                )));
            }
        }

        for i in 0..size {
            for j in i + 1..size {
                let product = matrix.get(i, j) * matrix.get(j, i);
                if (product - 1.0).abs() > RECIPROCAL_TOLERANCE {
                    return Err(SaatyError::InvalidMatrix(format!(
                        "entries ({}, {}) and ({}, {}) are not reciprocal",
                        i, j, j, i
                    )));
                }
            }
        }

        Ok(matrix)
    }

    /// Dimension `n` of the `n`×`n` matrix.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Entry at row `i`, column `j`.
    ///
    /// # Panics
    ///
    /// If `i` or `j` is not below `size()`.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.entries[i * self.size + j]
    }

    /// Row `i` as a slice.
    #[must_use]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.entries[i * self.size..(i + 1) * self.size]
    }

    /// Rows in index order.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks_exact rejects a chunk size of 0.
        self.entries.chunks_exact(self.size.max(1))
    }

    /// Owned copy as nested rows (for JSON output).
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.rows().map(<[f64]>::to_vec).collect()
    }

    fn set(&mut self, i: usize, j: usize, value: f64) {
        self.entries[i * self.size + j] = value;
    }
}

// =============================================================================
// TESTS
// =============================================================================
