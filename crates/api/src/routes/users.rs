//! User account routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser};
use crate::routes::support::{forbidden, internal_error, json_error, load_principal};
use scholaris_core::auth::hash_password;
use scholaris_core::visibility::Role;
use scholaris_db::UserRepository;
use scholaris_db::entities::{sea_orm_active_enums::UserRole, users};
use scholaris_db::repositories::user::{CreateUserInput, UpdateProfileInput, UserError};

/// Creates the user routes (requires auth middleware to be applied
/// externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users", post(create_user))
        .route("/users/profile", get(profile))
        .route("/users/profile", patch(update_profile))
}

/// Request body for creating a user account.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    /// Username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Plaintext password; hashed before storage.
    pub password: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Role: admin, management, staff, student, parent.
    pub role: String,
    /// Optional phone number.
    pub phone_number: Option<String>,
    /// Optional date of birth.
    pub date_of_birth: Option<chrono::NaiveDate>,
    /// Optional address.
    pub address: Option<String>,
}

/// Request body for updating one's own profile.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    /// New email.
    pub email: Option<String>,
    /// New first name.
    pub first_name: Option<String>,
    /// New last name.
    pub last_name: Option<String>,
    /// New phone number; null clears it.
    pub phone_number: Option<Option<String>>,
    /// New address; null clears it.
    pub address: Option<Option<String>>,
}

/// Response for a user account.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,
    /// Username.
    pub username: String,
    /// Email.
    pub email: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Full display name.
    pub full_name: String,
    /// Role.
    pub role: String,
    /// Phone number.
    pub phone_number: Option<String>,
    /// Address.
    pub address: Option<String>,
    /// Whether the account is active.
    pub is_active: bool,
}

fn user_response(user: users::Model) -> UserResponse {
    let full_name = user.full_name();
    UserResponse {
        id: user.id,
        username: user.username,
        email: user.email,
        first_name: user.first_name,
        last_name: user.last_name,
        full_name,
        role: Role::from(user.role).as_str().to_string(),
        phone_number: user.phone_number,
        address: user.address,
        is_active: user.is_active,
    }
}

fn map_user_error(e: UserError) -> axum::response::Response {
    match e {
        UserError::NotFound(_) => json_error(StatusCode::NOT_FOUND, "not_found", &e.to_string()),
        UserError::DuplicateUsername(_) => {
            json_error(StatusCode::CONFLICT, "conflict", &e.to_string())
        }
        UserError::Database(err) => internal_error("User operation failed", &err),
    }
}

/// GET /users - List accounts visible to the caller.
async fn list_users(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let (user, _, scope) = match load_principal(&state, auth.user_id()).await {
        Ok(loaded) => loaded,
        Err(response) => return response,
    };

    let repo = UserRepository::new((*state.db).clone());
    match repo.list_scoped(scope, user.id).await {
        Ok(rows) => {
            let response: Vec<UserResponse> = rows.into_iter().map(user_response).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => map_user_error(e),
    }
}

/// POST /users - Create a user account (admin/management only).
async fn create_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateUserRequest>,
) -> impl IntoResponse {
    let (_, principal, _) = match load_principal(&state, auth.user_id()).await {
        Ok(loaded) => loaded,
        Err(response) => return response,
    };

    if !principal.role.can_manage_records() {
        return forbidden("Only admin or management can create accounts");
    }

    let Some(role) = Role::parse(&payload.role) else {
        return json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            &format!("unrecognized role: {}", payload.role),
        );
    };

    let password_hash = match hash_password(&payload.password) {
        Ok(hash) => hash,
        Err(e) => return internal_error("Failed to hash password", &e),
    };

    let repo = UserRepository::new((*state.db).clone());
    match repo
        .create_user(CreateUserInput {
            username: payload.username,
            email: payload.email,
            password_hash,
            first_name: payload.first_name,
            last_name: payload.last_name,
            role: UserRole::from(role),
            phone_number: payload.phone_number,
            date_of_birth: payload.date_of_birth,
            address: payload.address,
        })
        .await
    {
        Ok(user) => {
            info!(user_id = %user.id, role = ?user.role, "User account created");
            (StatusCode::CREATED, Json(user_response(user))).into_response()
        }
        Err(e) => map_user_error(e),
    }
}

/// GET /users/profile - The caller's own account.
async fn profile(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let (user, _, _) = match load_principal(&state, auth.user_id()).await {
        Ok(loaded) => loaded,
        Err(response) => return response,
    };

    (StatusCode::OK, Json(user_response(user))).into_response()
}

/// PATCH /users/profile - Update the caller's own account.
async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> impl IntoResponse {
    let (user, _, _) = match load_principal(&state, auth.user_id()).await {
        Ok(loaded) => loaded,
        Err(response) => return response,
    };

    let repo = UserRepository::new((*state.db).clone());
    match repo
        .update_profile(
            user.id,
            UpdateProfileInput {
                email: payload.email,
                first_name: payload.first_name,
                last_name: payload.last_name,
                phone_number: payload.phone_number,
                address: payload.address,
            },
        )
        .await
    {
        Ok(updated) => (StatusCode::OK, Json(user_response(updated))).into_response(),
        Err(e) => map_user_error(e),
    }
}
