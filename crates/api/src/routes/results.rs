//! Result routes: recording scores, scoped listing, and class rankings.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser};
use crate::routes::support::{forbidden, internal_error, json_error, load_principal};
use scholaris_core::grading::{ScoreSheet, Term};
use scholaris_core::ranking::RankedStudent;
use scholaris_db::repositories::result::{
    RecordResultInput, ResultError, ResultRepository, ResultWithContext,
};

/// Creates the result routes (requires auth middleware to be applied
/// externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/results", get(list_results))
        .route("/results", post(record_result))
        .route("/results/rankings", get(class_rankings))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for recording a result.
#[derive(Debug, Deserialize)]
pub struct RecordResultRequest {
    /// Student profile ID.
    pub student_id: Uuid,
    /// Subject ID.
    pub subject_id: Uuid,
    /// Academic year ID.
    pub academic_year_id: Uuid,
    /// Term: first, second, third, final.
    pub term: String,
    /// Class to snapshot; defaults to the student's current class.
    pub recorded_class_id: Option<Uuid>,
    /// CA test 1 (max 10 marks).
    pub ca1_score: Decimal,
    /// CA test 2 (max 10 marks).
    pub ca2_score: Decimal,
    /// CA test 3 (max 10 marks).
    pub ca3_score: Decimal,
    /// CA test 4 (max 10 marks).
    pub ca4_score: Decimal,
    /// Final exam (max 60 marks).
    pub exam_score: Decimal,
    /// Optional remarks.
    pub remarks: Option<String>,
}

/// Response for a result row.
#[derive(Debug, Serialize)]
pub struct ResultResponse {
    /// Result ID.
    pub id: Uuid,
    /// Student profile ID.
    pub student_id: Uuid,
    /// Student display name.
    pub student_name: String,
    /// Subject ID.
    pub subject_id: Uuid,
    /// Subject name.
    pub subject_name: String,
    /// Academic year ID.
    pub academic_year_id: Uuid,
    /// Academic year name.
    pub academic_year_name: String,
    /// Term.
    pub term: String,
    /// Recorded class snapshot.
    pub recorded_class_id: Option<Uuid>,
    /// CA test 1 score.
    pub ca1_score: String,
    /// CA test 2 score.
    pub ca2_score: String,
    /// CA test 3 score.
    pub ca3_score: String,
    /// CA test 4 score.
    pub ca4_score: String,
    /// Exam score.
    pub exam_score: String,
    /// Sum of the CA scores (derived).
    pub ca_total: String,
    /// Marks obtained (derived).
    pub marks_obtained: String,
    /// Total marks (always 100).
    pub total_marks: String,
    /// Percentage (derived).
    pub percentage: String,
    /// Letter grade (derived).
    pub grade: String,
    /// Remarks.
    pub remarks: Option<String>,
    /// Upload timestamp.
    pub upload_date: String,
}

/// Query parameters for the rankings endpoint.
#[derive(Debug, Deserialize)]
pub struct RankingsQuery {
    /// Class to rank.
    pub class_id: Uuid,
    /// Term: first, second, third.
    pub term: String,
    /// Academic year ID.
    pub academic_year_id: Uuid,
}

/// Response for class rankings.
#[derive(Debug, Serialize)]
pub struct RankingsResponse {
    /// Class ID.
    pub class_id: Uuid,
    /// Term.
    pub term: String,
    /// Academic year ID.
    pub academic_year_id: Uuid,
    /// Ranked standings, best average first.
    pub rankings: Vec<RankedStudent>,
    /// Present when there is nothing to rank.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// ============================================================================
// Helpers
// ============================================================================

fn result_response(ctx: ResultWithContext) -> ResultResponse {
    let result = ctx.result;
    let ca_total =
        result.ca1_score + result.ca2_score + result.ca3_score + result.ca4_score;
    let percentage = if result.total_marks.is_zero() {
        Decimal::ZERO
    } else {
        result.marks_obtained / result.total_marks * Decimal::ONE_HUNDRED
    };
    ResultResponse {
        id: result.id,
        student_id: result.student_id,
        student_name: ctx.student_name,
        subject_id: result.subject_id,
        subject_name: ctx.subject_name,
        academic_year_id: result.academic_year_id,
        academic_year_name: ctx.academic_year_name,
        term: Term::from(result.term).as_str().to_string(),
        recorded_class_id: result.recorded_class_id,
        ca1_score: result.ca1_score.to_string(),
        ca2_score: result.ca2_score.to_string(),
        ca3_score: result.ca3_score.to_string(),
        ca4_score: result.ca4_score.to_string(),
        exam_score: result.exam_score.to_string(),
        ca_total: ca_total.to_string(),
        marks_obtained: result.marks_obtained.to_string(),
        total_marks: result.total_marks.to_string(),
        percentage: percentage.round_dp(2).to_string(),
        grade: result.grade,
        remarks: result.remarks,
        upload_date: result.upload_date.to_rfc3339(),
    }
}

fn map_result_error(e: ResultError) -> axum::response::Response {
    match e {
        ResultError::InvalidScores(err) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", &err.to_string())
        }
        ResultError::StudentNotFound(_)
        | ResultError::SubjectNotFound(_)
        | ResultError::AcademicYearNotFound(_)
        | ResultError::ClassNotFound(_) => {
            json_error(StatusCode::NOT_FOUND, "not_found", &e.to_string())
        }
        ResultError::Database(err) => internal_error("Result operation failed", &err),
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /results - List results visible to the caller.
async fn list_results(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let (_, _, scope) = match load_principal(&state, auth.user_id()).await {
        Ok(loaded) => loaded,
        Err(response) => return response,
    };

    let repo = ResultRepository::new((*state.db).clone());
    match repo.list_scoped(scope).await {
        Ok(rows) => {
            let response: Vec<ResultResponse> = rows.into_iter().map(result_response).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => map_result_error(e),
    }
}

/// POST /results - Record or update a result.
///
/// Upserts on (student, subject, year, term); the derived columns are
/// recomputed on every write.
async fn record_result(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<RecordResultRequest>,
) -> impl IntoResponse {
    let (_, principal, _) = match load_principal(&state, auth.user_id()).await {
        Ok(loaded) => loaded,
        Err(response) => return response,
    };

    if !principal.role.can_record_results() {
        return forbidden("Only staff can record results");
    }

    let Some(term) = Term::parse(&payload.term) else {
        return json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            &format!("unrecognized term: {}", payload.term),
        );
    };

    let input = RecordResultInput {
        student_id: payload.student_id,
        subject_id: payload.subject_id,
        academic_year_id: payload.academic_year_id,
        term,
        recorded_class_id: payload.recorded_class_id,
        scores: ScoreSheet {
            ca1_score: payload.ca1_score,
            ca2_score: payload.ca2_score,
            ca3_score: payload.ca3_score,
            ca4_score: payload.ca4_score,
            exam_score: payload.exam_score,
        },
        remarks: payload.remarks,
        uploaded_by: principal.staff_id,
    };

    let repo = ResultRepository::new((*state.db).clone());
    match repo.record_result(input).await {
        Ok(result) => {
            info!(
                result_id = %result.id,
                student_id = %result.student_id,
                grade = %result.grade,
                "Result recorded"
            );
            (StatusCode::OK, Json(result)).into_response()
        }
        Err(e) => map_result_error(e),
    }
}

/// GET /results/rankings - Ranked standings for a class and term.
async fn class_rankings(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<RankingsQuery>,
) -> impl IntoResponse {
    let (_, principal, _) = match load_principal(&state, auth.user_id()).await {
        Ok(loaded) => loaded,
        Err(response) => return response,
    };

    if !principal.role.can_record_results() {
        return forbidden("Only staff can view class rankings");
    }

    // Rankings cover the three teaching terms only.
    let term = match Term::parse(&query.term) {
        Some(term) if term != Term::Final => term,
        _ => {
            return json_error(
                StatusCode::BAD_REQUEST,
                "validation_error",
                &format!("unrecognized term: {}", query.term),
            );
        }
    };

    let repo = ResultRepository::new((*state.db).clone());
    match repo
        .class_rankings(query.class_id, term, query.academic_year_id)
        .await
    {
        Ok(rankings) => {
            let message = rankings
                .is_empty()
                .then(|| "No results recorded for this class and term yet".to_string());

            let response = RankingsResponse {
                class_id: query.class_id,
                term: term.as_str().to_string(),
                academic_year_id: query.academic_year_id,
                rankings,
                message,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => map_result_error(e),
    }
}
