//! # Assessment
//!
//! The single result object of the compute step. It carries the criteria,
//! the matrix they produced and the derived weights, and is handed
//! explicitly to whatever displays or stores it. Nothing is kept anywhere
//! else between computing and saving.

use crate::criteria::Criteria;
use crate::judgment::Judgments;
use crate::matrix::ComparisonMatrix;
use crate::primitives::MAX_FIELD_LENGTH;
use crate::record::{RecordEntry, SubmissionRecord};
use crate::solver::{WeightVector, solve_matrix};
use crate::SaatyError;
use serde::Serialize;

/// One criterion's share of the total priority.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Priority {
    pub criterion: String,
    pub weight: f64,
    pub percent: f64,
}

/// Criteria, matrix and weights for one submitted set of judgments.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    criteria: Criteria,
    matrix: ComparisonMatrix,
    weights: WeightVector,
}

impl Assessment {
    /// Build the matrix for `criteria` and solve it.
    pub fn compute(criteria: Criteria, judgments: &Judgments) -> Result<Self, SaatyError> {
        let matrix = ComparisonMatrix::build(&criteria, judgments)?;
        let weights = solve_matrix(&matrix);
        Ok(Self {
            criteria,
            matrix,
            weights,
        })
    }

    #[must_use]
    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    #[must_use]
    pub fn matrix(&self) -> &ComparisonMatrix {
        &self.matrix
    }

    #[must_use]
    pub fn weights(&self) -> &WeightVector {
        &self.weights
    }

    /// Weight of a criterion by label.
    #[must_use]
    pub fn weight_of(&self, label: &str) -> Option<f64> {
        self.criteria
            .position(label)
            .and_then(|index| self.weights.get(index))
    }

    /// Weights scaled to 100, in input order.
    #[must_use]
    pub fn percentages(&self) -> Vec<f64> {
        self.weights.percentages()
    }

    /// One row per criterion, in input order.
    #[must_use]
    pub fn priorities(&self) -> Vec<Priority> {
        self.criteria
            .iter()
            .zip(self.weights.iter())
            .map(|(criterion, weight)| Priority {
                criterion: criterion.to_string(),
                weight,
                percent: weight * 100.0,
            })
            .collect()
    }

    /// Priorities sorted by descending weight; ties keep input order.
    #[must_use]
    pub fn ranked(&self) -> Vec<Priority> {
        let mut priorities = self.priorities();
        priorities.sort_by(|a, b| b.weight.total_cmp(&a.weight));
        priorities
    }

    /// Flatten into the row appended to a sheet.
    ///
    /// # Errors
    ///
    /// `MissingField` if `respondent` or `phenomenon` is blank, `FieldTooLong`
    /// if either exceeds `MAX_FIELD_LENGTH`.
    pub fn to_record(
        &self,
        respondent: &str,
        phenomenon: &str,
    ) -> Result<SubmissionRecord, SaatyError> {
        let respondent = required_field("respondent", respondent)?;
        let phenomenon = required_field("phenomenon", phenomenon)?;

        let entries = self
            .priorities()
            .into_iter()
            .map(|p| RecordEntry {
                criterion: p.criterion,
                percent: p.percent,
            })
            .collect();

        Ok(SubmissionRecord {
            respondent,
            phenomenon,
            entries,
        })
    }
}

fn required_field(field: &'static str, value: &str) -> Result<String, SaatyError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(SaatyError::MissingField(field));
    }
    if value.len() > MAX_FIELD_LENGTH {
        return Err(SaatyError::FieldTooLong {
            field,
            max: MAX_FIELD_LENGTH,
        });
    }
    Ok(value.to_string())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::CriteriaBounds;
    use crate::scale::Intensity;

    fn sample() -> Assessment {
        let criteria =
            Criteria::new(["Cost", "Time", "Quality"], CriteriaBounds::default()).expect("ok");
        let mut judgments = Judgments::new();
        judgments.insert(0, 1, Intensity::Equal).expect("insert");
        judgments
            .insert(2, 0, Intensity::StronglyMore)
            .expect("insert");
        judgments
            .insert(2, 1, Intensity::SlightlyMore)
            .expect("insert");
        Assessment::compute(criteria, &judgments).expect("compute")
    }

    #[test]
    fn priorities_follow_input_order() {
        let assessment = sample();
        let labels: Vec<String> = assessment
            .priorities()
            .into_iter()
            .map(|p| p.criterion)
            .collect();
        assert_eq!(labels, vec!["Cost", "Time", "Quality"]);
    }

    #[test]
    fn ranked_puts_quality_first() {
        let assessment = sample();
        let ranked = assessment.ranked();
        assert_eq!(ranked[0].criterion, "Quality");
        assert!(ranked.windows(2).all(|w| w[0].weight >= w[1].weight));
    }

    #[test]
    fn weight_of_by_label() {
        let assessment = sample();
        assert_eq!(
            assessment.weight_of("Quality"),
            assessment.weights().get(2)
        );
        assert!(assessment.weight_of("Scope").is_none());
    }

    #[test]
    fn record_carries_percentages() {
        let assessment = sample();
        let record = assessment
            .to_record(" ana@example.org ", "Water conflict")
            .expect("record");

        assert_eq!(record.respondent, "ana@example.org");
        assert_eq!(record.entries.len(), 3);
        let total: f64 = record.entries.iter().map(|e| e.percent).sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn record_requires_names() {
        let assessment = sample();
        assert!(matches!(
            assessment.to_record("", "Phenomenon"),
            Err(SaatyError::MissingField("respondent"))
        ));
        assert!(matches!(
            assessment.to_record("someone", "   "),
            Err(SaatyError::MissingField("phenomenon"))
        ));
        let long = "p".repeat(MAX_FIELD_LENGTH + 1);
        assert!(matches!(
            assessment.to_record("someone", &long),
            Err(SaatyError::FieldTooLong { field: "phenomenon", .. })
        ));
    }
}
