//! Unit tests for API types serialization/deserialization.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use saaty::api::{
    HealthResponse, IntensityInput, JudgmentJson, PersistenceJson, ScaleResponse,
    SubmissionRequest, WeightsRequest, WeightsResponse,
};
use saaty_core::{CriteriaBounds, Favors, Intensity, Locale, RowId, SaatyError, SheetId};

// =============================================================================
// HEALTH RESPONSE TESTS
// =============================================================================

#[test]
fn test_health_response_default() {
    let health = HealthResponse::default();
    assert_eq!(health.status, "ok");
    assert!(!health.version.is_empty());
}

#[test]
fn test_health_response_deserialization() {
    let json = r#"{"status":"healthy","version":"1.0.0"}"#;
    let health: HealthResponse = serde_json::from_str(json).unwrap();

    assert_eq!(health.status, "healthy");
    assert_eq!(health.version, "1.0.0");
}

// =============================================================================
// SCALE RESPONSE TESTS
// =============================================================================

#[test]
fn test_scale_response_lists_reciprocals() {
    let scale = ScaleResponse::new(Locale::En);
    assert_eq!(scale.levels.len(), 5);
    assert_eq!(scale.levels[0].reciprocal, 1.0);
    assert_eq!(scale.levels[4].id, "extremely_more");
    assert_eq!(scale.levels[4].reciprocal, 1.0 / 9.0);

    let json = serde_json::to_string(&scale).unwrap();
    assert!(json.contains("\"locale\":\"en\""));
}

// =============================================================================
// INTENSITY INPUT TESTS
// =============================================================================

#[test]
fn test_intensity_input_accepts_number_or_text() {
    let number: IntensityInput = serde_json::from_str("7").unwrap();
    assert_eq!(number, IntensityInput::Value(7));
    assert_eq!(number.to_intensity().unwrap(), Intensity::StronglyMore);

    let id: IntensityInput = serde_json::from_str("\"slightly_more\"").unwrap();
    assert_eq!(id.to_intensity().unwrap(), Intensity::SlightlyMore);

    let label: IntensityInput = serde_json::from_str("\"Igualmente importante\"").unwrap();
    assert_eq!(label.to_intensity().unwrap(), Intensity::Equal);
}

#[test]
fn test_intensity_input_rejects_off_scale_values() {
    let even = IntensityInput::Value(2);
    assert!(matches!(
        even.to_intensity(),
        Err(SaatyError::UnknownIntensity(_))
    ));

    let text = IntensityInput::Text("a lot".to_string());
    assert!(text.to_intensity().is_err());
}

// =============================================================================
// JUDGMENT TESTS
// =============================================================================

#[test]
fn test_judgment_favors_defaults_to_row() {
    let json = r#"{"row":0,"column":1,"intensity":3}"#;
    let judgment: JudgmentJson = serde_json::from_str(json).unwrap();
    assert_eq!(judgment.favors, Favors::Row);

    let json = r#"{"row":0,"column":1,"intensity":3,"favors":"column"}"#;
    let judgment: JudgmentJson = serde_json::from_str(json).unwrap();
    assert_eq!(judgment.favors, Favors::Column);
}

#[test]
fn test_weights_request_rejects_repeated_pair() {
    let json = r#"{
        "criteria": ["A", "B"],
        "judgments": [
            {"row": 0, "column": 1, "intensity": 3},
            {"row": 1, "column": 0, "intensity": 5}
        ]
    }"#;
    let request: WeightsRequest = serde_json::from_str(json).unwrap();
    assert!(matches!(
        request.to_judgments(),
        Err(SaatyError::DuplicateJudgment { .. })
    ));
}

#[test]
fn test_weights_request_checks_criteria_before_judgments() {
    let json = r#"{
        "criteria": ["Cost"],
        "judgments": [{"row": 0, "column": 0, "intensity": 3}]
    }"#;
    let request: WeightsRequest = serde_json::from_str(json).unwrap();
    assert!(matches!(
        request.solve(CriteriaBounds::default()),
        Err(SaatyError::CriteriaCountOutOfRange { count: 1, .. })
    ));

    let json = r#"{
        "criteria": ["Cost", "Cost"],
        "judgments": [{"row": 0, "column": 7, "intensity": 3}]
    }"#;
    let request: WeightsRequest = serde_json::from_str(json).unwrap();
    assert!(matches!(
        request.solve(CriteriaBounds::default()),
        Err(SaatyError::DuplicateCriterion(_))
    ));
}

#[test]
fn test_weights_request_solves() {
    let request = WeightsRequest {
        criteria: vec!["A".to_string(), "B".to_string()],
        judgments: vec![JudgmentJson {
            row: 0,
            column: 1,
            intensity: Intensity::ExtremelyMore.into(),
            favors: Favors::Row,
        }],
    };

    let assessment = request.solve(CriteriaBounds::default()).unwrap();
    let response = WeightsResponse::success(&assessment);
    assert!((response.priorities[0].weight - 0.9).abs() < 1e-12);
    assert!((response.priorities[0].percent - 90.0).abs() < 1e-9);
    assert_eq!(response.matrix, vec![vec![1.0, 9.0], vec![1.0 / 9.0, 1.0]]);
}

// =============================================================================
// SUBMISSION TESTS
// =============================================================================

#[test]
fn test_submission_names_default_to_empty() {
    let json = r#"{"criteria":["A","B"],"judgments":[{"row":0,"column":1,"intensity":1}]}"#;
    let request: SubmissionRequest = serde_json::from_str(json).unwrap();

    assert!(request.respondent.is_empty());
    assert!(request.phenomenon.is_empty());
    assert_eq!(request.weights_request().criteria.len(), 2);
}

#[test]
fn test_persistence_outcomes() {
    let sheet = SheetId::new("responses");

    let saved = PersistenceJson::saved(&sheet, RowId(4));
    assert!(saved.saved);
    assert_eq!(saved.row, Some(4));
    assert!(saved.error.is_none());

    let failed = PersistenceJson::failed(&sheet, &SaatyError::Persistence("disk full".into()));
    assert!(!failed.saved);
    assert!(failed.row.is_none());
    assert!(failed.error.unwrap().contains("disk full"));
}
