//! Class routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser};
use crate::routes::support::{forbidden, internal_error, json_error, load_principal};
use scholaris_db::ClassRepository;
use scholaris_db::repositories::class::{ClassError, CreateClassInput};

/// Creates the class routes (requires auth middleware to be applied
/// externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/classes", get(list_classes))
        .route("/classes", post(create_class))
        .route("/classes/{class_id}", get(get_class))
        .route("/classes/{class_id}/teacher", put(assign_teacher))
        .route("/classes/{class_id}/students", get(class_students))
}

/// Request body for creating a class.
#[derive(Debug, Deserialize)]
pub struct CreateClassRequest {
    /// Display name, e.g. "Grade 10 A".
    pub name: String,
    /// Numeric grade level.
    pub grade: i32,
    /// Section letter; may be empty.
    #[serde(default)]
    pub section: String,
    /// Academic year ID.
    pub academic_year_id: Uuid,
    /// Optional class teacher.
    pub class_teacher_id: Option<Uuid>,
}

/// Request body for assigning a class teacher.
#[derive(Debug, Deserialize)]
pub struct AssignTeacherRequest {
    /// Staff profile ID.
    pub staff_id: Uuid,
}

/// Query parameters for listing classes.
#[derive(Debug, Deserialize)]
pub struct ClassesQuery {
    /// Restrict to one academic year.
    pub academic_year_id: Option<Uuid>,
}

fn map_class_error(e: ClassError) -> axum::response::Response {
    match e {
        ClassError::NotFound(_)
        | ClassError::AcademicYearNotFound(_)
        | ClassError::StaffNotFound(_) => {
            json_error(StatusCode::NOT_FOUND, "not_found", &e.to_string())
        }
        ClassError::DuplicateClass | ClassError::TeacherAlreadyAssigned => {
            json_error(StatusCode::CONFLICT, "conflict", &e.to_string())
        }
        ClassError::Database(err) => internal_error("Class operation failed", &err),
    }
}

/// GET /classes - List classes.
async fn list_classes(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ClassesQuery>,
) -> impl IntoResponse {
    if let Err(response) = load_principal(&state, auth.user_id()).await {
        return response;
    }

    let repo = ClassRepository::new((*state.db).clone());
    match repo.list(query.academic_year_id).await {
        Ok(classes) => (StatusCode::OK, Json(classes)).into_response(),
        Err(e) => map_class_error(e),
    }
}

/// POST /classes - Create a class (admin/management only).
async fn create_class(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateClassRequest>,
) -> impl IntoResponse {
    let (_, principal, _) = match load_principal(&state, auth.user_id()).await {
        Ok(loaded) => loaded,
        Err(response) => return response,
    };

    if !principal.role.can_manage_records() {
        return forbidden("Only admin or management can manage classes");
    }

    let repo = ClassRepository::new((*state.db).clone());
    match repo
        .create(CreateClassInput {
            name: payload.name,
            grade: payload.grade,
            section: payload.section,
            academic_year_id: payload.academic_year_id,
            class_teacher_id: payload.class_teacher_id,
        })
        .await
    {
        Ok(class) => (StatusCode::CREATED, Json(class)).into_response(),
        Err(e) => map_class_error(e),
    }
}

/// GET /classes/{class_id} - Get one class.
async fn get_class(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(class_id): Path<Uuid>,
) -> impl IntoResponse {
    if let Err(response) = load_principal(&state, auth.user_id()).await {
        return response;
    }

    let repo = ClassRepository::new((*state.db).clone());
    match repo.get(class_id).await {
        Ok(class) => (StatusCode::OK, Json(class)).into_response(),
        Err(e) => map_class_error(e),
    }
}

/// PUT /classes/{class_id}/teacher - Assign the class teacher.
async fn assign_teacher(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(class_id): Path<Uuid>,
    Json(payload): Json<AssignTeacherRequest>,
) -> impl IntoResponse {
    let (_, principal, _) = match load_principal(&state, auth.user_id()).await {
        Ok(loaded) => loaded,
        Err(response) => return response,
    };

    if !principal.role.can_manage_records() {
        return forbidden("Only admin or management can assign class teachers");
    }

    let repo = ClassRepository::new((*state.db).clone());
    match repo.assign_teacher(class_id, payload.staff_id).await {
        Ok(class) => (StatusCode::OK, Json(class)).into_response(),
        Err(e) => map_class_error(e),
    }
}

/// GET /classes/{class_id}/students - Students currently in the class.
async fn class_students(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(class_id): Path<Uuid>,
) -> impl IntoResponse {
    if let Err(response) = load_principal(&state, auth.user_id()).await {
        return response;
    }

    let repo = ClassRepository::new((*state.db).clone());
    match repo.students(class_id).await {
        Ok(students) => (StatusCode::OK, Json(students)).into_response(),
        Err(e) => map_class_error(e),
    }
}
