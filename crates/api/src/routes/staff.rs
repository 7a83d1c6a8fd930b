//! Staff routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser};
use crate::routes::support::{forbidden, internal_error, json_error, load_principal};
use scholaris_db::StaffRepository;
use scholaris_db::entities::sea_orm_active_enums::StaffDesignation;
use scholaris_db::repositories::staff::{CreateStaffInput, StaffError};

/// Creates the staff routes (requires auth middleware to be applied
/// externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/staff", get(list_staff))
        .route("/staff", post(create_staff))
        .route("/staff/{staff_id}/subjects", get(staff_subjects))
        .route("/staff/{staff_id}/subjects", put(set_staff_subjects))
}

/// Request body for creating a staff profile.
#[derive(Debug, Deserialize)]
pub struct CreateStaffRequest {
    /// Linked user account.
    pub user_id: Uuid,
    /// Unique staff code.
    pub staff_code: String,
    /// Designation: teacher, principal, vice_principal, administrator,
    /// librarian, counselor.
    pub designation: String,
    /// Joining date.
    pub joining_date: NaiveDate,
    /// Qualification summary.
    pub qualification: Option<String>,
    /// Years of experience.
    #[serde(default)]
    pub experience_years: i32,
}

/// Request body for replacing a staff member's subjects.
#[derive(Debug, Deserialize)]
pub struct SetSubjectsRequest {
    /// Subject IDs the staff member teaches.
    pub subject_ids: Vec<Uuid>,
}

fn parse_designation(s: &str) -> Option<StaffDesignation> {
    match s.to_lowercase().as_str() {
        "teacher" => Some(StaffDesignation::Teacher),
        "principal" => Some(StaffDesignation::Principal),
        "vice_principal" => Some(StaffDesignation::VicePrincipal),
        "administrator" => Some(StaffDesignation::Administrator),
        "librarian" => Some(StaffDesignation::Librarian),
        "counselor" => Some(StaffDesignation::Counselor),
        _ => None,
    }
}

fn map_staff_error(e: StaffError) -> axum::response::Response {
    match e {
        StaffError::NotFound(_) | StaffError::UserNotFound(_) | StaffError::SubjectNotFound(_) => {
            json_error(StatusCode::NOT_FOUND, "not_found", &e.to_string())
        }
        StaffError::DuplicateCode(_) => json_error(StatusCode::CONFLICT, "conflict", &e.to_string()),
        StaffError::Database(err) => internal_error("Staff operation failed", &err),
    }
}

/// GET /staff - List staff visible to the caller.
async fn list_staff(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let (user, _, scope) = match load_principal(&state, auth.user_id()).await {
        Ok(loaded) => loaded,
        Err(response) => return response,
    };

    let repo = StaffRepository::new((*state.db).clone());
    match repo.list_scoped(scope, user.id).await {
        Ok(staff) => (StatusCode::OK, Json(staff)).into_response(),
        Err(e) => map_staff_error(e),
    }
}

/// POST /staff - Create a staff profile (admin/management only).
async fn create_staff(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateStaffRequest>,
) -> impl IntoResponse {
    let (_, principal, _) = match load_principal(&state, auth.user_id()).await {
        Ok(loaded) => loaded,
        Err(response) => return response,
    };

    if !principal.role.can_manage_records() {
        return forbidden("Only admin or management can manage staff");
    }

    let Some(designation) = parse_designation(&payload.designation) else {
        return json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            &format!("unrecognized designation: {}", payload.designation),
        );
    };

    let repo = StaffRepository::new((*state.db).clone());
    match repo
        .create(CreateStaffInput {
            user_id: payload.user_id,
            staff_code: payload.staff_code,
            designation,
            joining_date: payload.joining_date,
            qualification: payload.qualification,
            experience_years: payload.experience_years,
        })
        .await
    {
        Ok(staff) => (StatusCode::CREATED, Json(staff)).into_response(),
        Err(e) => map_staff_error(e),
    }
}

/// GET /staff/{staff_id}/subjects - Subjects a staff member teaches.
async fn staff_subjects(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(staff_id): Path<Uuid>,
) -> impl IntoResponse {
    if let Err(response) = load_principal(&state, auth.user_id()).await {
        return response;
    }

    let repo = StaffRepository::new((*state.db).clone());
    match repo.subjects(staff_id).await {
        Ok(subjects) => (StatusCode::OK, Json(subjects)).into_response(),
        Err(e) => map_staff_error(e),
    }
}

/// PUT /staff/{staff_id}/subjects - Replace a staff member's subjects.
async fn set_staff_subjects(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(staff_id): Path<Uuid>,
    Json(payload): Json<SetSubjectsRequest>,
) -> impl IntoResponse {
    let (_, principal, _) = match load_principal(&state, auth.user_id()).await {
        Ok(loaded) => loaded,
        Err(response) => return response,
    };

    if !principal.role.can_manage_records() {
        return forbidden("Only admin or management can assign subjects");
    }

    let repo = StaffRepository::new((*state.db).clone());
    match repo.set_subjects(staff_id, payload.subject_ids).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => map_staff_error(e),
    }
}
