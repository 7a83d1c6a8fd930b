//! Student routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser};
use crate::routes::support::{forbidden, internal_error, json_error, load_principal};
use scholaris_db::StudentRepository;
use scholaris_db::repositories::student::{CreateStudentInput, StudentError, StudentWithUser};
use scholaris_shared::types::{PageRequest, PageResponse};

/// Creates the student routes (requires auth middleware to be applied
/// externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/students", get(list_students))
        .route("/students", post(create_student))
        .route("/students/{student_id}/class", put(assign_class))
}

/// Request body for creating a student profile.
#[derive(Debug, Deserialize)]
pub struct CreateStudentRequest {
    /// Linked user account.
    pub user_id: Uuid,
    /// Unique student code.
    pub student_code: String,
    /// Admission date; defaults to today.
    pub admission_date: Option<NaiveDate>,
    /// Initial class, if any.
    pub current_class_id: Option<Uuid>,
    /// Emergency contact name.
    pub emergency_contact_name: Option<String>,
    /// Emergency contact phone.
    pub emergency_contact_phone: Option<String>,
    /// Medical information.
    pub medical_info: Option<String>,
}

/// Request body for moving a student between classes.
#[derive(Debug, Deserialize)]
pub struct AssignClassRequest {
    /// Target class; null removes the student from any class.
    pub class_id: Option<Uuid>,
}

/// Response for a student profile.
#[derive(Debug, Serialize)]
pub struct StudentResponse {
    /// Student profile ID.
    pub id: Uuid,
    /// Linked account ID.
    pub user_id: Uuid,
    /// Student code.
    pub student_code: String,
    /// Full display name.
    pub full_name: String,
    /// Admission date.
    pub admission_date: String,
    /// Current class ID.
    pub current_class_id: Option<Uuid>,
    /// Current class name.
    pub current_class_name: Option<String>,
}

fn student_response(row: StudentWithUser) -> StudentResponse {
    StudentResponse {
        id: row.student.id,
        user_id: row.student.user_id,
        student_code: row.student.student_code.clone(),
        full_name: row.user.map(|u| u.full_name()).unwrap_or_default(),
        admission_date: row.student.admission_date.to_string(),
        current_class_id: row.student.current_class_id,
        current_class_name: row.current_class_name,
    }
}

fn map_student_error(e: StudentError) -> axum::response::Response {
    match e {
        StudentError::NotFound(_)
        | StudentError::UserNotFound(_)
        | StudentError::ClassNotFound(_) => {
            json_error(StatusCode::NOT_FOUND, "not_found", &e.to_string())
        }
        StudentError::DuplicateCode(_) => {
            json_error(StatusCode::CONFLICT, "conflict", &e.to_string())
        }
        StudentError::Database(err) => internal_error("Student operation failed", &err),
    }
}

/// GET /students - List students visible to the caller, paginated.
async fn list_students(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(page): Query<PageRequest>,
) -> impl IntoResponse {
    let (_, _, scope) = match load_principal(&state, auth.user_id()).await {
        Ok(loaded) => loaded,
        Err(response) => return response,
    };

    let repo = StudentRepository::new((*state.db).clone());
    match repo.list_scoped(scope, &page).await {
        Ok(rows) => {
            let response = PageResponse {
                data: rows.data.into_iter().map(student_response).collect(),
                meta: rows.meta,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => map_student_error(e),
    }
}

/// POST /students - Create a student profile (admin/management only).
async fn create_student(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateStudentRequest>,
) -> impl IntoResponse {
    let (_, principal, _) = match load_principal(&state, auth.user_id()).await {
        Ok(loaded) => loaded,
        Err(response) => return response,
    };

    if !principal.role.can_manage_records() {
        return forbidden("Only admin or management can enroll students");
    }

    let repo = StudentRepository::new((*state.db).clone());
    match repo
        .create(CreateStudentInput {
            user_id: payload.user_id,
            student_code: payload.student_code,
            admission_date: payload
                .admission_date
                .unwrap_or_else(|| chrono::Utc::now().date_naive()),
            current_class_id: payload.current_class_id,
            emergency_contact_name: payload.emergency_contact_name,
            emergency_contact_phone: payload.emergency_contact_phone,
            medical_info: payload.medical_info,
        })
        .await
    {
        Ok(student) => (StatusCode::CREATED, Json(student)).into_response(),
        Err(e) => map_student_error(e),
    }
}

/// PUT /students/{student_id}/class - Move a student to another class.
async fn assign_class(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(student_id): Path<Uuid>,
    Json(payload): Json<AssignClassRequest>,
) -> impl IntoResponse {
    let (_, principal, _) = match load_principal(&state, auth.user_id()).await {
        Ok(loaded) => loaded,
        Err(response) => return response,
    };

    if !principal.role.can_manage_records() {
        return forbidden("Only admin or management can reassign students");
    }

    let repo = StudentRepository::new((*state.db).clone());
    match repo.assign_class(student_id, payload.class_id).await {
        Ok(student) => (StatusCode::OK, Json(student)).into_response(),
        Err(e) => map_student_error(e),
    }
}
