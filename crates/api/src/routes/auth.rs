//! Authentication routes for login and token refresh.

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post};
use tracing::{error, info};

use crate::AppState;
use crate::routes::support::{internal_error, json_error};
use scholaris_core::auth::verify_password;
use scholaris_db::UserRepository;
use scholaris_shared::auth::{LoginRequest, LoginResponse, RefreshRequest, TokenPair, UserInfo};

/// Creates the auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
}

/// POST /auth/login - Authenticate user and return tokens.
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    let user_repo = UserRepository::new((*state.db).clone());

    // Find user by username
    let user = match user_repo.find_by_username(&payload.username).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            info!(username = %payload.username, "Login attempt for non-existent user");
            return json_error(
                StatusCode::UNAUTHORIZED,
                "invalid_credentials",
                "Invalid username or password",
            );
        }
        Err(e) => return internal_error("Database error during login", &e),
    };

    // Check if user is active
    if !user.is_active {
        return json_error(
            StatusCode::UNAUTHORIZED,
            "account_disabled",
            "This account has been disabled",
        );
    }

    // Verify password
    match verify_password(&payload.password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            info!(user_id = %user.id, "Failed login attempt - invalid password");
            return json_error(
                StatusCode::UNAUTHORIZED,
                "invalid_credentials",
                "Invalid username or password",
            );
        }
        Err(e) => return internal_error("Password verification error", &e),
    }

    let role = scholaris_core::visibility::Role::from(user.role.clone());

    // Generate tokens
    let access_token = match state.jwt_service.generate_access_token(user.id, role.as_str()) {
        Ok(t) => t,
        Err(e) => return internal_error("Failed to generate access token", &e),
    };

    let refresh_token = match state
        .jwt_service
        .generate_refresh_token(user.id, role.as_str())
    {
        Ok(t) => t,
        Err(e) => return internal_error("Failed to generate refresh token", &e),
    };

    info!(user_id = %user.id, role = %role, "User logged in successfully");

    let response = LoginResponse {
        user: UserInfo {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            full_name: user.full_name(),
            role: role.as_str().to_string(),
        },
        role: role.as_str().to_string(),
        access_token,
        refresh_token,
        expires_in: state.jwt_service.access_token_expires_in(),
    };

    (StatusCode::OK, Json(response)).into_response()
}

/// POST /auth/refresh - Exchange a refresh token for a new token pair.
async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> impl IntoResponse {
    let claims = match state.jwt_service.validate_token(&payload.refresh_token) {
        Ok(claims) => claims,
        Err(e) => {
            error!(error = %e, "Refresh token validation failed");
            return json_error(
                StatusCode::UNAUTHORIZED,
                "invalid_token",
                "Invalid or expired refresh token",
            );
        }
    };

    let access_token = match state
        .jwt_service
        .generate_access_token(claims.user_id(), &claims.role)
    {
        Ok(t) => t,
        Err(e) => return internal_error("Failed to generate access token", &e),
    };

    let refresh_token = match state
        .jwt_service
        .generate_refresh_token(claims.user_id(), &claims.role)
    {
        Ok(t) => t,
        Err(e) => return internal_error("Failed to generate refresh token", &e),
    };

    let pair = TokenPair::new(
        access_token,
        refresh_token,
        state.jwt_service.access_token_expires_in(),
    );

    (StatusCode::OK, Json(pair)).into_response()
}
