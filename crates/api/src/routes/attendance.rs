//! Attendance routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser};
use crate::routes::support::{forbidden, internal_error, json_error, load_principal};
use scholaris_db::AttendanceRepository;
use scholaris_db::entities::sea_orm_active_enums::AttendanceStatus;
use scholaris_db::repositories::attendance::{AttendanceError, MarkAttendanceInput};

/// Creates the attendance routes (requires auth middleware to be applied
/// externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/attendance", get(list_attendance))
        .route("/attendance", post(mark_attendance))
}

/// Request body for marking attendance.
#[derive(Debug, Deserialize)]
pub struct MarkAttendanceRequest {
    /// Student profile ID.
    pub student_id: Uuid,
    /// Attendance date.
    pub date: NaiveDate,
    /// Status: present, absent, late, excused.
    pub status: String,
    /// Class the attendance belongs to.
    pub class_id: Uuid,
    /// Optional remarks.
    pub remarks: Option<String>,
}

fn parse_status(s: &str) -> Option<AttendanceStatus> {
    match s.to_lowercase().as_str() {
        "present" => Some(AttendanceStatus::Present),
        "absent" => Some(AttendanceStatus::Absent),
        "late" => Some(AttendanceStatus::Late),
        "excused" => Some(AttendanceStatus::Excused),
        _ => None,
    }
}

fn map_attendance_error(e: AttendanceError) -> axum::response::Response {
    match e {
        AttendanceError::StudentNotFound(_) | AttendanceError::ClassNotFound(_) => {
            json_error(StatusCode::NOT_FOUND, "not_found", &e.to_string())
        }
        AttendanceError::Database(err) => internal_error("Attendance operation failed", &err),
    }
}

/// GET /attendance - List attendance visible to the caller.
async fn list_attendance(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let (_, _, scope) = match load_principal(&state, auth.user_id()).await {
        Ok(loaded) => loaded,
        Err(response) => return response,
    };

    let repo = AttendanceRepository::new((*state.db).clone());
    match repo.list_scoped(scope).await {
        Ok(rows) => (StatusCode::OK, Json(rows)).into_response(),
        Err(e) => map_attendance_error(e),
    }
}

/// POST /attendance - Mark attendance (staff and above).
async fn mark_attendance(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<MarkAttendanceRequest>,
) -> impl IntoResponse {
    let (_, principal, _) = match load_principal(&state, auth.user_id()).await {
        Ok(loaded) => loaded,
        Err(response) => return response,
    };

    if !principal.role.can_mark_attendance() {
        return forbidden("Only staff can mark attendance");
    }

    let Some(status) = parse_status(&payload.status) else {
        return json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            &format!("unrecognized attendance status: {}", payload.status),
        );
    };

    let repo = AttendanceRepository::new((*state.db).clone());
    match repo
        .mark(MarkAttendanceInput {
            student_id: payload.student_id,
            date: payload.date,
            status,
            class_id: payload.class_id,
            marked_by: principal.staff_id,
            remarks: payload.remarks,
        })
        .await
    {
        Ok(row) => (StatusCode::OK, Json(row)).into_response(),
        Err(e) => map_attendance_error(e),
    }
}
