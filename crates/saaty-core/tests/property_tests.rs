//! # Property-Based Tests
//!
//! Invariants of the builder and the solver over random judgments.

use proptest::collection::vec;
use proptest::prelude::*;
use saaty_core::{
    ComparisonMatrix, Criteria, CriteriaBounds, Intensity, Judgment, Judgments, solve,
    solve_matrix,
};

// =============================================================================
// HELPERS
// =============================================================================

/// Largest number of pairs the default bounds allow (15 choose 2).
const MAX_PAIRS: usize = 105;

fn labels(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("C{}", i)).collect()
}

/// Fill every pair of `n` criteria from a random (scale index, favors row) list.
fn judgments_from(n: usize, choices: &[(usize, bool)]) -> Judgments {
    let mut judgments = Judgments::new();
    let mut next = choices.iter().cycle();
    for row in 0..n {
        for column in row + 1..n {
            let (scale, favors_row) = next.next().copied().unwrap_or((0, true));
            let intensity = Intensity::ALL[scale % Intensity::ALL.len()];
            let judgment = if favors_row {
                Judgment::favoring_row(intensity)
            } else {
                Judgment::favoring_column(intensity)
            };
            judgments.insert(row, column, judgment).expect("insert");
        }
    }
    judgments
}

fn choices() -> impl Strategy<Value = Vec<(usize, bool)>> {
    vec((0usize..5, any::<bool>()), 1..=MAX_PAIRS)
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

proptest! {
    /// One non-negative weight per criterion, summing to 1.
    #[test]
    fn weights_are_a_distribution(n in 2usize..=15, picks in choices()) {
        let assessment = solve(labels(n), &judgments_from(n, &picks)).expect("solve");
        let weights = assessment.weights();

        prop_assert_eq!(weights.len(), n);
        prop_assert!(weights.iter().all(|w| w >= 0.0));
        prop_assert!((weights.sum() - 1.0).abs() < 1e-9);
    }

    /// Diagonal is 1 and mirrored entries multiply to exactly 1.
    #[test]
    fn matrix_is_reciprocal(n in 2usize..=15, picks in choices()) {
        let criteria = Criteria::new(labels(n), CriteriaBounds::default()).expect("criteria");
        let matrix = ComparisonMatrix::build(&criteria, &judgments_from(n, &picks)).expect("build");

        for i in 0..n {
            prop_assert_eq!(matrix.get(i, i), 1.0);
            for j in 0..n {
                prop_assert!(matrix.get(i, j) > 0.0);
                prop_assert_eq!(matrix.get(i, j) * matrix.get(j, i), 1.0);
            }
        }
    }

    /// Same matrix, bit-identical weights.
    #[test]
    fn solving_is_deterministic(n in 2usize..=15, picks in choices()) {
        let criteria = Criteria::new(labels(n), CriteriaBounds::default()).expect("criteria");
        let matrix = ComparisonMatrix::build(&criteria, &judgments_from(n, &picks)).expect("build");

        let first = solve_matrix(&matrix);
        let second = solve_matrix(&matrix);
        for (a, b) in first.iter().zip(second.iter()) {
            prop_assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    /// Strengthening a judgment in favor of a criterion never lowers its weight.
    #[test]
    fn stronger_preference_raises_weight(
        n in 2usize..=15,
        picks in choices(),
        row in 0usize..15,
    ) {
        let row = row % (n - 1);
        let column = row + 1;
        let mut weak = judgments_from(n, &picks);
        let mut strong = weak.clone();
        weak.set(row, column, Judgment::favoring_row(Intensity::SlightlyMore)).expect("set");
        strong.set(row, column, Judgment::favoring_row(Intensity::ExtremelyMore)).expect("set");

        let weak = solve(labels(n), &weak).expect("solve");
        let strong = solve(labels(n), &strong).expect("solve");

        prop_assert!(strong.weights().get(row) > weak.weights().get(row));
        prop_assert!(strong.weights().get(column) < weak.weights().get(column));
    }

    /// A criterion favored over every other one has the largest weight.
    #[test]
    fn dominant_criterion_ranks_first(n in 2usize..=15, winner in 0usize..15) {
        let winner = winner % n;
        let mut judgments = Judgments::new();
        for row in 0..n {
            for column in row + 1..n {
                let intensity = if row == winner || column == winner {
                    Intensity::ModeratelyMore
                } else {
                    Intensity::Equal
                };
                let judgment = if column == winner {
                    Judgment::favoring_column(intensity)
                } else {
                    Judgment::favoring_row(intensity)
                };
                judgments.insert(row, column, judgment).expect("insert");
            }
        }

        let assessment = solve(labels(n), &judgments).expect("solve");
        prop_assert_eq!(assessment.weights().argmax(), Some(winner));
        prop_assert_eq!(assessment.ranked()[0].criterion.clone(), format!("C{}", winner));
    }

    /// Extremely more important than every other criterion means strictly
    /// heavier than each of them, whatever the remaining judgments say.
    #[test]
    fn extreme_preference_outweighs_every_other(
        n in 2usize..=15,
        picks in choices(),
        winner in 0usize..15,
    ) {
        let winner = winner % n;
        let mut judgments = judgments_from(n, &picks);
        for other in (0..n).filter(|&k| k != winner) {
            let judgment = if winner < other {
                Judgment::favoring_row(Intensity::ExtremelyMore)
            } else {
                Judgment::favoring_column(Intensity::ExtremelyMore)
            };
            judgments
                .set(winner.min(other), winner.max(other), judgment)
                .expect("set");
        }

        let assessment = solve(labels(n), &judgments).expect("solve");
        let weights: Vec<f64> = assessment.weights().iter().collect();
        for (k, weight) in weights.iter().enumerate().filter(|&(k, _)| k != winner) {
            prop_assert!(
                weights[winner] > *weight,
                "C{} weighs {} but C{} weighs {}",
                winner,
                weights[winner],
                k,
                weight
            );
        }
    }

    /// Percentages mirror weights and add up to 100.
    #[test]
    fn percentages_sum_to_hundred(n in 2usize..=15, picks in choices()) {
        let assessment = solve(labels(n), &judgments_from(n, &picks)).expect("solve");
        let total: f64 = assessment.weights().percentages().iter().sum();
        prop_assert!((total - 100.0).abs() < 1e-7);
    }
}
