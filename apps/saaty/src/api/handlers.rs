//! # API Endpoint Handlers
//!
//! Invalid input is answered with 400 and nothing is stored. A submission
//! whose weights were computed always answers 200; whether the row was
//! stored is reported in its `persistence` field.

use super::{
    AppState,
    types::{
        HealthResponse, MatrixRequest, MatrixResponse, PersistenceJson, RecordsResponse,
        ScaleQuery, ScaleResponse, SubmissionRequest, SubmissionResponse, WeightsRequest,
        WeightsResponse,
    },
};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use saaty_core::{Locale, SaatyError, solve_matrix};

/// Status code for a failed core operation.
fn status_for(error: &SaatyError) -> StatusCode {
    if error.is_invalid_input() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// SCALE HANDLER
// =============================================================================

/// List the judgment scale. `?locale=es` switches the labels.
pub async fn scale_handler(
    State(state): State<AppState>,
    Query(query): Query<ScaleQuery>,
) -> impl IntoResponse {
    let locale = match query.locale.as_deref() {
        None => state.locale,
        Some(text) => match text.parse::<Locale>() {
            Ok(locale) => locale,
            Err(e) => {
                return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
            }
        },
    };

    (StatusCode::OK, Json(ScaleResponse::new(locale))).into_response()
}

// =============================================================================
// WEIGHTS HANDLERS
// =============================================================================

/// Compute weights from criteria and pairwise judgments.
pub async fn weights_handler(
    State(state): State<AppState>,
    Json(request): Json<WeightsRequest>,
) -> impl IntoResponse {
    match request.solve(state.bounds) {
        Ok(assessment) => {
            tracing::debug!(criteria = assessment.criteria().len(), "Weights computed");
            (StatusCode::OK, Json(WeightsResponse::success(&assessment)))
        }
        Err(e) => (
            status_for(&e),
            Json(WeightsResponse::error(format!("Invalid request: {}", e))),
        ),
    }
}

/// Compute weights from a complete comparison matrix.
pub async fn matrix_handler(
    State(state): State<AppState>,
    Json(request): Json<MatrixRequest>,
) -> impl IntoResponse {
    match request.to_matrix(state.bounds) {
        Ok(matrix) => (
            StatusCode::OK,
            Json(MatrixResponse::success(&solve_matrix(&matrix))),
        ),
        Err(e) => (
            status_for(&e),
            Json(MatrixResponse::error(format!("Invalid matrix: {}", e))),
        ),
    }
}

// =============================================================================
// SUBMISSION HANDLERS
// =============================================================================

/// Compute weights, then append one row to the configured sheet.
pub async fn submit_handler(
    State(state): State<AppState>,
    Json(request): Json<SubmissionRequest>,
) -> impl IntoResponse {
    let computed = request.weights_request().solve(state.bounds).and_then(|assessment| {
        let record = assessment.to_record(&request.respondent, &request.phenomenon)?;
        Ok((assessment, record))
    });

    let (assessment, record) = match computed {
        Ok(pair) => pair,
        Err(e) => {
            return (
                status_for(&e),
                Json(SubmissionResponse::error(format!("Invalid submission: {}", e))),
            );
        }
    };

    let appended = {
        let mut store = state.store.write().await;
        store.append(&state.sheet, &record)
    };

    let persistence = match appended {
        Ok(row) => {
            tracing::info!(sheet = %state.sheet, row = row.value(), "Submission saved");
            PersistenceJson::saved(&state.sheet, row)
        }
        Err(e) => {
            tracing::error!(sheet = %state.sheet, error = %e, "Submission not saved");
            PersistenceJson::failed(&state.sheet, &e)
        }
    };

    (
        StatusCode::OK,
        Json(SubmissionResponse::computed(&assessment, persistence)),
    )
}

/// List the rows of the configured sheet.
pub async fn records_handler(State(state): State<AppState>) -> impl IntoResponse {
    let store = state.store.read().await;
    match store.rows(&state.sheet) {
        Ok(rows) => (
            StatusCode::OK,
            Json(RecordsResponse::success(&state.sheet, rows)),
        ),
        Err(e) => (
            status_for(&e),
            Json(RecordsResponse::error(
                &state.sheet,
                format!("Read failed: {}", e),
            )),
        ),
    }
}
