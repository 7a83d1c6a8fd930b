//! Subject routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser};
use crate::routes::support::{forbidden, internal_error, json_error, load_principal};
use scholaris_db::SubjectRepository;
use scholaris_db::repositories::subject::{CreateSubjectInput, SubjectError};

/// Creates the subject routes (requires auth middleware to be applied
/// externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/subjects", get(list_subjects))
        .route("/subjects", post(create_subject))
        .route("/subjects/{subject_id}", get(get_subject))
}

/// Request body for creating a subject.
#[derive(Debug, Deserialize)]
pub struct CreateSubjectRequest {
    /// Subject name.
    pub name: String,
    /// Unique subject code.
    pub code: String,
    /// Optional description.
    pub description: Option<String>,
}

fn map_subject_error(e: SubjectError) -> axum::response::Response {
    match e {
        SubjectError::NotFound(_) => json_error(StatusCode::NOT_FOUND, "not_found", &e.to_string()),
        SubjectError::DuplicateCode(_) => {
            json_error(StatusCode::CONFLICT, "conflict", &e.to_string())
        }
        SubjectError::Database(err) => internal_error("Subject operation failed", &err),
    }
}

/// GET /subjects - List all subjects.
async fn list_subjects(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    if let Err(response) = load_principal(&state, auth.user_id()).await {
        return response;
    }

    let repo = SubjectRepository::new((*state.db).clone());
    match repo.list().await {
        Ok(subjects) => (StatusCode::OK, Json(subjects)).into_response(),
        Err(e) => map_subject_error(e),
    }
}

/// POST /subjects - Create a subject (admin/management only).
async fn create_subject(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateSubjectRequest>,
) -> impl IntoResponse {
    let (_, principal, _) = match load_principal(&state, auth.user_id()).await {
        Ok(loaded) => loaded,
        Err(response) => return response,
    };

    if !principal.role.can_manage_records() {
        return forbidden("Only admin or management can manage subjects");
    }

    let repo = SubjectRepository::new((*state.db).clone());
    match repo
        .create(CreateSubjectInput {
            name: payload.name,
            code: payload.code,
            description: payload.description,
        })
        .await
    {
        Ok(subject) => (StatusCode::CREATED, Json(subject)).into_response(),
        Err(e) => map_subject_error(e),
    }
}

/// GET /subjects/{subject_id} - Get one subject.
async fn get_subject(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(subject_id): Path<Uuid>,
) -> impl IntoResponse {
    if let Err(response) = load_principal(&state, auth.user_id()).await {
        return response;
    }

    let repo = SubjectRepository::new((*state.db).clone());
    match repo.get(subject_id).await {
        Ok(subject) => (StatusCode::OK, Json(subject)).into_response(),
        Err(e) => map_subject_error(e),
    }
}
