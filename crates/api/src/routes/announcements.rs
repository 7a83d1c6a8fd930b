//! Announcement routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser};
use crate::routes::support::{forbidden, internal_error, json_error, load_principal};
use scholaris_db::AnnouncementRepository;
use scholaris_db::entities::sea_orm_active_enums::AnnouncementPriority;
use scholaris_db::repositories::announcement::{AnnouncementError, CreateAnnouncementInput};

/// Creates the announcement routes (requires auth middleware to be
/// applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/announcements", get(list_announcements))
        .route("/announcements", post(create_announcement))
        .route("/announcements/{announcement_id}", delete(deactivate))
}

/// Request body for creating an announcement.
#[derive(Debug, Deserialize)]
pub struct CreateAnnouncementRequest {
    /// Title.
    pub title: String,
    /// Body content.
    pub content: String,
    /// Priority: low, medium, high, urgent.
    #[serde(default = "default_priority")]
    pub priority: String,
    /// Optional expiry timestamp (RFC 3339).
    pub expires_at: Option<chrono::DateTime<chrono::FixedOffset>>,
    /// Whether students should see it.
    #[serde(default = "default_true")]
    pub for_students: bool,
    /// Whether parents should see it.
    #[serde(default = "default_true")]
    pub for_parents: bool,
    /// Whether staff should see it.
    #[serde(default = "default_true")]
    pub for_staff: bool,
    /// Whether management should see it.
    #[serde(default = "default_true")]
    pub for_management: bool,
}

fn default_priority() -> String {
    "medium".to_string()
}

const fn default_true() -> bool {
    true
}

fn parse_priority(s: &str) -> Option<AnnouncementPriority> {
    match s.to_lowercase().as_str() {
        "low" => Some(AnnouncementPriority::Low),
        "medium" => Some(AnnouncementPriority::Medium),
        "high" => Some(AnnouncementPriority::High),
        "urgent" => Some(AnnouncementPriority::Urgent),
        _ => None,
    }
}

fn map_announcement_error(e: AnnouncementError) -> axum::response::Response {
    match e {
        AnnouncementError::NotFound(_) => {
            json_error(StatusCode::NOT_FOUND, "not_found", &e.to_string())
        }
        AnnouncementError::Database(err) => internal_error("Announcement operation failed", &err),
    }
}

/// GET /announcements - Active announcements for the caller's role.
async fn list_announcements(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let (_, principal, _) = match load_principal(&state, auth.user_id()).await {
        Ok(loaded) => loaded,
        Err(response) => return response,
    };

    let repo = AnnouncementRepository::new((*state.db).clone());
    match repo.list_for_role(principal.role).await {
        Ok(announcements) => (StatusCode::OK, Json(announcements)).into_response(),
        Err(e) => map_announcement_error(e),
    }
}

/// POST /announcements - Publish an announcement (admin/management only).
async fn create_announcement(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateAnnouncementRequest>,
) -> impl IntoResponse {
    let (user, principal, _) = match load_principal(&state, auth.user_id()).await {
        Ok(loaded) => loaded,
        Err(response) => return response,
    };

    if !principal.role.can_manage_records() {
        return forbidden("Only admin or management can publish announcements");
    }

    let Some(priority) = parse_priority(&payload.priority) else {
        return json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            &format!("unrecognized priority: {}", payload.priority),
        );
    };

    let repo = AnnouncementRepository::new((*state.db).clone());
    match repo
        .create(CreateAnnouncementInput {
            title: payload.title,
            content: payload.content,
            priority,
            created_by: user.id,
            expires_at: payload.expires_at,
            for_students: payload.for_students,
            for_parents: payload.for_parents,
            for_staff: payload.for_staff,
            for_management: payload.for_management,
        })
        .await
    {
        Ok(announcement) => (StatusCode::CREATED, Json(announcement)).into_response(),
        Err(e) => map_announcement_error(e),
    }
}

/// DELETE /announcements/{announcement_id} - Deactivate an announcement.
async fn deactivate(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(announcement_id): Path<Uuid>,
) -> impl IntoResponse {
    let (_, principal, _) = match load_principal(&state, auth.user_id()).await {
        Ok(loaded) => loaded,
        Err(response) => return response,
    };

    if !principal.role.can_manage_records() {
        return forbidden("Only admin or management can deactivate announcements");
    }

    let repo = AnnouncementRepository::new((*state.db).clone());
    match repo.deactivate(announcement_id).await {
        Ok(announcement) => (StatusCode::OK, Json(announcement)).into_response(),
        Err(e) => map_announcement_error(e),
    }
}
