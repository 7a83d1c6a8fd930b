//! Parent routes.

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
use scholaris_db::ParentRepository;
use scholaris_db::repositories::parent::{CreateParentInput, ParentError};

/// Creates the parent routes (requires auth middleware to be applied
/// externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/parents", get(list_parents))
        .route("/parents", post(create_parent))
        .route("/parents/{parent_id}/children", get(list_children))
        .route("/parents/{parent_id}/children", post(add_child))
}

/// Request body for creating a parent profile.
#[derive(Debug, Deserialize)]
pub struct CreateParentRequest {
    /// Linked user account.
    pub user_id: Uuid,
    /// Unique parent code.
    pub parent_code: String,
}

/// Request body for linking a child.
#[derive(Debug, Deserialize)]
pub struct AddChildRequest {
    /// Student profile ID.
    pub student_id: Uuid,
}

fn map_parent_error(e: ParentError) -> axum::response::Response {
    match e {
        ParentError::NotFound(_)
        | ParentError::UserNotFound(_)
        | ParentError::StudentNotFound(_) => {
            json_error(StatusCode::NOT_FOUND, "not_found", &e.to_string())
        }
        ParentError::DuplicateCode(_) => {
            json_error(StatusCode::CONFLICT, "conflict", &e.to_string())
        }
        ParentError::Database(err) => internal_error("Parent operation failed", &err),
    }
}

/// GET /parents - List parents visible to the caller.
async fn list_parents(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let (user, _, scope) = match load_principal(&state, auth.user_id()).await {
        Ok(loaded) => loaded,
        Err(response) => return response,
    };

    let repo = ParentRepository::new((*state.db).clone());
    match repo.list_scoped(scope, user.id).await {
        Ok(parents) => (StatusCode::OK, Json(parents)).into_response(),
        Err(e) => map_parent_error(e),
    }
}

/// POST /parents - Create a parent profile (admin/management only).
async fn create_parent(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateParentRequest>,
) -> impl IntoResponse {
    let (_, principal, _) = match load_principal(&state, auth.user_id()).await {
        Ok(loaded) => loaded,
        Err(response) => return response,
    };

    if !principal.role.can_manage_records() {
        return forbidden("Only admin or management can manage parents");
    }

    let repo = ParentRepository::new((*state.db).clone());
    match repo
        .create(CreateParentInput {
            user_id: payload.user_id,
            parent_code: payload.parent_code,
        })
        .await
    {
        Ok(parent) => (StatusCode::CREATED, Json(parent)).into_response(),
        Err(e) => map_parent_error(e),
    }
}

/// GET /parents/{parent_id}/children - List a parent's children.
async fn list_children(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(parent_id): Path<Uuid>,
) -> impl IntoResponse {
    let (_, principal, _) = match load_principal(&state, auth.user_id()).await {
        Ok(loaded) => loaded,
        Err(response) => return response,
    };

    // Parents may list their own children; everyone else needs the
    // management capability.
    let is_own = principal.parent_id == Some(parent_id);
    if !is_own && !principal.role.can_manage_records() {
        return forbidden("Not allowed to view this parent's children");
    }

    let repo = ParentRepository::new((*state.db).clone());
    match repo.children(parent_id).await {
        Ok(children) => (StatusCode::OK, Json(children)).into_response(),
        Err(e) => map_parent_error(e),
    }
}

/// POST /parents/{parent_id}/children - Link a child to a parent.
async fn add_child(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(parent_id): Path<Uuid>,
    Json(payload): Json<AddChildRequest>,
) -> impl IntoResponse {
    let (_, principal, _) = match load_principal(&state, auth.user_id()).await {
        Ok(loaded) => loaded,
        Err(response) => return response,
    };

    if !principal.role.can_manage_records() {
        return forbidden("Only admin or management can link children");
    }

    let repo = ParentRepository::new((*state.db).clone());
    match repo.add_child(parent_id, payload.student_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => map_parent_error(e),
    }
}
