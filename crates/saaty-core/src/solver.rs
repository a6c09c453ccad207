//! # Weight Solver
//!
//! Geometric-mean (row-product) priority derivation:
//!
//! 1. multiply the `n` entries of each row
//! 2. take the `n`-th root of each product
//! 3. divide each root by the sum of all roots
//!
//! The solver is a pure function of the matrix: the same matrix always gives
//! bit-identical weights. It raises no errors; a malformed matrix cannot be
//! constructed through the public API.

use crate::assessment::Assessment;
use crate::criteria::{Criteria, CriteriaBounds};
use crate::judgment::Judgments;
use crate::matrix::ComparisonMatrix;
use crate::SaatyError;
use serde::Serialize;

// =============================================================================
// WEIGHT VECTOR
// =============================================================================

/// Normalized priority weights, index-aligned with the criteria.
///
/// Entries are non-negative and sum to 1 (within floating-point rounding).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct WeightVector {
    weights: Vec<f64>,
}

impl WeightVector {
    #[must_use]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.weights.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.weights.iter().copied()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.weights
    }

    /// Sum of all weights; 1 up to rounding.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Weights scaled to percentages (sum 100).
    #[must_use]
    pub fn percentages(&self) -> Vec<f64> {
        self.weights.iter().map(|w| w * 100.0).collect()
    }

    /// Index of the largest weight (first one on ties).
    #[must_use]
    pub fn argmax(&self) -> Option<usize> {
        self.weights
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, f64)>, (index, &weight)| match best {
                Some((_, top)) if top >= weight => best,
                _ => Some((index, weight)),
            })
            .map(|(index, _)| index)
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<f64> {
        self.weights
    }
}

// =============================================================================
// SOLVER
// =============================================================================

/// Derive priority weights from a comparison matrix.
#[must_use]
pub fn solve_matrix(matrix: &ComparisonMatrix) -> WeightVector {
    let exponent = 1.0 / matrix.size() as f64;

    let roots: Vec<f64> = matrix
        .rows()
        .map(|row| row.iter().product::<f64>().powf(exponent))
        .collect();
    let total: f64 = roots.iter().sum();

    WeightVector {
        weights: roots.iter().map(|root| root / total).collect(),
    }
}

/// Build the matrix and solve it, using the default `2..=15` bounds.
///
/// This is the whole pipeline behind the questionnaire: labels in form
/// order, one judgment per pair, weights out.
pub fn solve<I, S>(criteria: I, judgments: &Judgments) -> Result<Assessment, SaatyError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    solve_with_bounds(criteria, judgments, CriteriaBounds::default())
}

/// [`solve`] with configurable criteria-count bounds.
pub fn solve_with_bounds<I, S>(
    criteria: I,
    judgments: &Judgments,
    bounds: CriteriaBounds,
) -> Result<Assessment, SaatyError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let criteria = Criteria::new(criteria, bounds)?;
    Assessment::compute(criteria, judgments)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::Intensity;

    fn assert_within(value: f64, expected: f64, tolerance: f64) {
        let diff = (value - expected).abs();
        assert!(
            diff <= tolerance,
            "Expected {expected} +- {tolerance} but got {value} (off by {diff})"
        );
    }

    #[test]
    fn cost_time_quality_example() {
        let mut judgments = Judgments::new();
        judgments.insert(0, 1, Intensity::Equal).expect("insert");
        judgments
            .insert(0, 2, Intensity::ModeratelyMore)
            .expect("insert");
        judgments
            .insert(1, 2, Intensity::ModeratelyMore)
            .expect("insert");

        let assessment = solve(["Cost", "Time", "Quality"], &judgments).expect("solve");
        let weights = assessment.weights();

        assert_within(weights.get(0).expect("w0"), 5.0 / 11.0, 1e-9);
        assert_within(weights.get(1).expect("w1"), 5.0 / 11.0, 1e-9);
        assert_within(weights.get(2).expect("w2"), 1.0 / 11.0, 1e-9);
        assert_within(weights.sum(), 1.0, 1e-9);
    }

    #[test]
    fn equal_judgments_give_uniform_weights() {
        for n in 2..=15 {
            let weights = solve_matrix(&ComparisonMatrix::ones(n));
            assert_eq!(weights.len(), n);
            for w in weights.iter() {
                assert_within(w, 1.0 / n as f64, 1e-12);
            }
        }
    }

    #[test]
    fn solver_is_bitwise_idempotent() {
        let mut judgments = Judgments::new();
        judgments.insert(0, 1, Intensity::StronglyMore).expect("insert");
        judgments.insert(0, 2, Intensity::SlightlyMore).expect("insert");
        judgments.insert(2, 1, Intensity::ExtremelyMore).expect("insert");

        let assessment = solve(["A", "B", "C"], &judgments).expect("solve");
        let first = solve_matrix(assessment.matrix());
        let second = solve_matrix(assessment.matrix());

        let first_bits: Vec<u64> = first.iter().map(f64::to_bits).collect();
        let second_bits: Vec<u64> = second.iter().map(f64::to_bits).collect();
        assert_eq!(first_bits, second_bits);
    }

    #[test]
    fn percentages_sum_to_one_hundred() {
        let weights = solve_matrix(&ComparisonMatrix::ones(3));
        let total: f64 = weights.percentages().iter().sum();
        assert_within(total, 100.0, 1e-9);
    }

    #[test]
    fn argmax_picks_first_on_tie() {
        let weights = solve_matrix(&ComparisonMatrix::ones(4));
        assert_eq!(weights.argmax(), Some(0));
    }

    #[test]
    fn invalid_input_surfaces_before_solving() {
        let judgments = Judgments::uniform(3, Intensity::Equal);
        assert!(matches!(
            solve(["A", "", "C"], &judgments),
            Err(SaatyError::EmptyCriterion { index: 1 })
        ));
        assert!(matches!(
            solve_with_bounds(
                (0..12).map(|i| format!("c{i}")),
                &Judgments::uniform(12, Intensity::Equal),
                CriteriaBounds::LEGACY
            ),
            Err(SaatyError::CriteriaCountOutOfRange { count: 12, .. })
        ));
    }
}
