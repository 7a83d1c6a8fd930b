//! Academic year routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser};
use crate::routes::support::{forbidden, internal_error, json_error, load_principal};
use scholaris_db::AcademicYearRepository;
use scholaris_db::repositories::academic_year::{AcademicYearError, CreateAcademicYearInput};

/// Creates the academic year routes (requires auth middleware to be
/// applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/academic-years", get(list_years))
        .route("/academic-years", post(create_year))
        .route("/academic-years/active", get(active_year))
        .route("/academic-years/{year_id}", get(get_year))
}

/// Request body for creating an academic year.
#[derive(Debug, Deserialize)]
pub struct CreateAcademicYearRequest {
    /// Display name, e.g. "2025-2026".
    pub name: String,
    /// First day of the year.
    pub start_date: NaiveDate,
    /// Last day of the year.
    pub end_date: NaiveDate,
    /// Whether the year is the active one.
    #[serde(default)]
    pub is_active: bool,
}

fn map_year_error(e: AcademicYearError) -> axum::response::Response {
    match e {
        AcademicYearError::NotFound(_) => {
            json_error(StatusCode::NOT_FOUND, "not_found", &e.to_string())
        }
        AcademicYearError::DuplicateName(_) => {
            json_error(StatusCode::CONFLICT, "conflict", &e.to_string())
        }
        AcademicYearError::Database(err) => internal_error("Academic year operation failed", &err),
    }
}

/// GET /academic-years - List years, most recent first.
async fn list_years(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    if let Err(response) = load_principal(&state, auth.user_id()).await {
        return response;
    }

    let repo = AcademicYearRepository::new((*state.db).clone());
    match repo.list().await {
        Ok(years) => (StatusCode::OK, Json(years)).into_response(),
        Err(e) => map_year_error(e),
    }
}

/// POST /academic-years - Create a year (admin/management only).
async fn create_year(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateAcademicYearRequest>,
) -> impl IntoResponse {
    let (_, principal, _) = match load_principal(&state, auth.user_id()).await {
        Ok(loaded) => loaded,
        Err(response) => return response,
    };

    if !principal.role.can_manage_records() {
        return forbidden("Only admin or management can manage academic years");
    }

    if payload.end_date <= payload.start_date {
        return json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "end_date must be after start_date",
        );
    }

    let repo = AcademicYearRepository::new((*state.db).clone());
    match repo
        .create(CreateAcademicYearInput {
            name: payload.name,
            start_date: payload.start_date,
            end_date: payload.end_date,
            is_active: payload.is_active,
        })
        .await
    {
        Ok(year) => (StatusCode::CREATED, Json(year)).into_response(),
        Err(e) => map_year_error(e),
    }
}

/// GET /academic-years/active - The currently active year, if any.
async fn active_year(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    if let Err(response) = load_principal(&state, auth.user_id()).await {
        return response;
    }

    let repo = AcademicYearRepository::new((*state.db).clone());
    match repo.find_active().await {
        Ok(Some(year)) => (StatusCode::OK, Json(year)).into_response(),
        Ok(None) => json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            "No academic year is currently active",
        ),
        Err(e) => map_year_error(e),
    }
}

/// GET /academic-years/{year_id} - Get one year.
async fn get_year(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(year_id): Path<Uuid>,
) -> impl IntoResponse {
    if let Err(response) = load_principal(&state, auth.user_id()).await {
        return response;
    }

    let repo = AcademicYearRepository::new((*state.db).clone());
    match repo.get(year_id).await {
        Ok(year) => (StatusCode::OK, Json(year)).into_response(),
        Err(e) => map_year_error(e),
    }
}
