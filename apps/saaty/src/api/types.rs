//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API.

use saaty_core::{
    Assessment, ComparisonMatrix, Criteria, CriteriaBounds, Favors, Intensity, Judgment,
    Judgments, Locale, Priority, RowId, SaatyError, SheetId, SubmissionRecord, WeightVector,
};
use serde::{Deserialize, Serialize};

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// SCALE
// =============================================================================

/// Query string for `GET /scale`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScaleQuery {
    pub locale: Option<String>,
}

/// One level of the judgment scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleLevelJson {
    pub id: String,
    pub label: String,
    pub value: u8,
    pub reciprocal: f64,
}

/// The judgment scale in one language.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScaleResponse {
    pub locale: Locale,
    pub levels: Vec<ScaleLevelJson>,
}

impl ScaleResponse {
    #[must_use]
    pub fn new(locale: Locale) -> Self {
        let levels = Intensity::ALL
            .into_iter()
            .map(|intensity| ScaleLevelJson {
                id: intensity.id().to_string(),
                label: intensity.label(locale).to_string(),
                value: intensity.scale(),
                reciprocal: intensity.reciprocal(),
            })
            .collect();
        Self { locale, levels }
    }
}

// =============================================================================
// WEIGHTS REQUEST/RESPONSE
// =============================================================================

/// A scale level given as its value (`5`) or as text (`"moderately_more"`,
/// `"Bastante más importante"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IntensityInput {
    Value(u8),
    Text(String),
}

impl IntensityInput {
    pub fn to_intensity(&self) -> Result<Intensity, SaatyError> {
        match self {
            Self::Value(value) => Intensity::from_scale(*value)
                .ok_or_else(|| SaatyError::UnknownIntensity(value.to_string())),
            Self::Text(text) => text.parse(),
        }
    }
}

impl From<Intensity> for IntensityInput {
    fn from(intensity: Intensity) -> Self {
        Self::Text(intensity.id().to_string())
    }
}

/// One pairwise judgment: criterion `row` compared with criterion `column`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JudgmentJson {
    pub row: usize,
    pub column: usize,
    pub intensity: IntensityInput,
    /// Which criterion the intensity favors; defaults to `row`.
    #[serde(default)]
    pub favors: Favors,
}

/// Criteria plus one judgment per pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightsRequest {
    pub criteria: Vec<String>,
    pub judgments: Vec<JudgmentJson>,
}

impl WeightsRequest {
    /// Convert the judgment list, rejecting unknown levels and repeated pairs.
    pub fn to_judgments(&self) -> Result<Judgments, SaatyError> {
        let mut judgments = Judgments::new();
        for j in &self.judgments {
            let judgment = Judgment {
                intensity: j.intensity.to_intensity()?,
                favors: j.favors,
            };
            judgments.insert(j.row, j.column, judgment)?;
        }
        Ok(judgments)
    }

    /// Validate the criteria, then the judgments, and solve.
    pub fn solve(&self, bounds: CriteriaBounds) -> Result<Assessment, SaatyError> {
        let criteria = Criteria::new(&self.criteria, bounds)?;
        let judgments = self.to_judgments()?;
        Assessment::compute(criteria, &judgments)
    }
}

/// One criterion's computed weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityJson {
    pub criterion: String,
    pub weight: f64,
    pub percent: f64,
}

impl From<Priority> for PriorityJson {
    fn from(p: Priority) -> Self {
        Self {
            criterion: p.criterion,
            weight: p.weight,
            percent: p.percent,
        }
    }
}

/// Weights response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightsResponse {
    pub success: bool,
    /// Criteria in input order with their weights.
    pub priorities: Vec<PriorityJson>,
    /// Index of the heaviest criterion (first on ties).
    pub top: Option<usize>,
    pub matrix: Vec<Vec<f64>>,
    pub error: Option<String>,
}

impl WeightsResponse {
    /// Create a successful response.
    #[must_use]
    pub fn success(assessment: &Assessment) -> Self {
        Self {
            success: true,
            priorities: assessment
                .priorities()
                .into_iter()
                .map(PriorityJson::from)
                .collect(),
            top: assessment.weights().argmax(),
            matrix: assessment.matrix().to_rows(),
            error: None,
        }
    }

    /// Create an error response.
    #[must_use]
    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            priorities: vec![],
            top: None,
            matrix: vec![],
            error: Some(msg.into()),
        }
    }
}

// =============================================================================
// MATRIX REQUEST/RESPONSE
// =============================================================================

/// A complete comparison matrix supplied by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatrixRequest {
    pub matrix: Vec<Vec<f64>>,
}

impl MatrixRequest {
    /// Validate the matrix.
    pub fn to_matrix(&self, bounds: CriteriaBounds) -> Result<ComparisonMatrix, SaatyError> {
        ComparisonMatrix::from_rows(self.matrix.clone(), bounds)
    }
}

/// Weights derived from a raw matrix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatrixResponse {
    pub success: bool,
    pub weights: Vec<f64>,
    pub percentages: Vec<f64>,
    pub error: Option<String>,
}

impl MatrixResponse {
    #[must_use]
    pub fn success(weights: &WeightVector) -> Self {
        Self {
            success: true,
            weights: weights.as_slice().to_vec(),
            percentages: weights.percentages(),
            error: None,
        }
    }

    #[must_use]
    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            weights: vec![],
            percentages: vec![],
            error: Some(msg.into()),
        }
    }
}

// =============================================================================
// SUBMISSION REQUEST/RESPONSE
// =============================================================================

/// A questionnaire to compute and save.
///
/// Also the format of the file read by `saaty solve`, where `respondent` and
/// `phenomenon` may be left out unless the result is saved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionRequest {
    #[serde(default)]
    pub respondent: String,
    #[serde(default)]
    pub phenomenon: String,
    pub criteria: Vec<String>,
    pub judgments: Vec<JudgmentJson>,
}

impl SubmissionRequest {
    /// The criteria and judgments part of the submission.
    #[must_use]
    pub fn weights_request(&self) -> WeightsRequest {
        WeightsRequest {
            criteria: self.criteria.clone(),
            judgments: self.judgments.clone(),
        }
    }
}

/// Outcome of the save step, reported separately from the weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistenceJson {
    pub saved: bool,
    pub sheet: String,
    pub row: Option<u64>,
    pub error: Option<String>,
}

impl PersistenceJson {
    #[must_use]
    pub fn saved(sheet: &SheetId, row: RowId) -> Self {
        Self {
            saved: true,
            sheet: sheet.to_string(),
            row: Some(row.value()),
            error: None,
        }
    }

    #[must_use]
    pub fn failed(sheet: &SheetId, error: &SaatyError) -> Self {
        Self {
            saved: false,
            sheet: sheet.to_string(),
            row: None,
            error: Some(error.to_string()),
        }
    }
}

/// Submission response: weights plus the persistence outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionResponse {
    pub success: bool,
    pub priorities: Vec<PriorityJson>,
    pub persistence: Option<PersistenceJson>,
    pub error: Option<String>,
}

impl SubmissionResponse {
    #[must_use]
    pub fn computed(assessment: &Assessment, persistence: PersistenceJson) -> Self {
        Self {
            success: true,
            priorities: assessment
                .priorities()
                .into_iter()
                .map(PriorityJson::from)
                .collect(),
            persistence: Some(persistence),
            error: None,
        }
    }

    #[must_use]
    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            priorities: vec![],
            persistence: None,
            error: Some(msg.into()),
        }
    }
}

// =============================================================================
// RECORDS RESPONSE
// =============================================================================

/// A stored row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowJson {
    pub row: u64,
    pub record: SubmissionRecord,
}

/// Rows of the configured sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordsResponse {
    pub success: bool,
    pub sheet: String,
    pub rows: Vec<RowJson>,
    pub error: Option<String>,
}

impl RecordsResponse {
    #[must_use]
    pub fn success(sheet: &SheetId, rows: Vec<(RowId, SubmissionRecord)>) -> Self {
        Self {
            success: true,
            sheet: sheet.to_string(),
            rows: rows
                .into_iter()
                .map(|(row, record)| RowJson {
                    row: row.value(),
                    record,
                })
                .collect(),
            error: None,
        }
    }

    #[must_use]
    pub fn error(sheet: &SheetId, msg: impl Into<String>) -> Self {
        Self {
            success: false,
            sheet: sheet.to_string(),
            rows: vec![],
            error: Some(msg.into()),
        }
    }
}
