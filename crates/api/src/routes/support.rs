//! Shared handler helpers: error responses and principal loading.

use axum::{Json, http::StatusCode, response::IntoResponse, response::Response};
use serde_json::json;
use tracing::error;

use crate::AppState;
use scholaris_core::visibility::{Principal, VisibilityScope};
use scholaris_db::{UserRepository, entities::users};

/// Builds a JSON error response in the standard envelope.
pub fn json_error(status: StatusCode, error: &str, message: &str) -> Response {
    (status, Json(json!({ "error": error, "message": message }))).into_response()
}

/// Standard 500 response for unexpected failures.
pub fn internal_error<E: std::fmt::Display>(context: &str, e: &E) -> Response {
    error!(error = %e, "{context}");
    json_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal_error",
        "An error occurred",
    )
}

/// Loads the caller's account and resolves their principal and scope.
///
/// The role is read from the account row, not the token, so a role
/// change takes effect without waiting for token expiry.
///
/// # Errors
///
/// Returns a ready-to-send response when the account is missing or
/// disabled, or a query fails.
pub async fn load_principal(
    state: &AppState,
    user_id: uuid::Uuid,
) -> Result<(users::Model, Principal, VisibilityScope), Response> {
    let user_repo = UserRepository::new((*state.db).clone());

    let user = match user_repo.find_by_id(user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Err(json_error(
                StatusCode::UNAUTHORIZED,
                "unknown_user",
                "Account no longer exists",
            ));
        }
        Err(e) => return Err(internal_error("Failed to load account", &e)),
    };

    if !user.is_active {
        return Err(json_error(
            StatusCode::UNAUTHORIZED,
            "account_disabled",
            "This account has been disabled",
        ));
    }

    let principal = match user_repo.resolve_principal(&user).await {
        Ok(principal) => principal,
        Err(e) => return Err(internal_error("Failed to resolve principal", &e)),
    };

    let scope = VisibilityScope::resolve(&principal);
    Ok((user, principal, scope))
}

/// 403 response for a role that may not perform the operation.
pub fn forbidden(message: &str) -> Response {
    json_error(StatusCode::FORBIDDEN, "forbidden", message)
}
