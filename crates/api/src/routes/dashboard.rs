//! Dashboard routes for per-role statistics.

use axum::{
    Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get,
};
use serde_json::json;

use crate::{AppState, middleware::AuthUser};
use crate::routes::support::{internal_error, json_error, load_principal};
use scholaris_core::visibility::Role;
use scholaris_db::DashboardRepository;
use scholaris_db::repositories::dashboard::DashboardError;

/// Creates the dashboard routes (requires auth middleware to be applied
/// externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/dashboard/stats", get(stats))
}

fn map_dashboard_error(e: DashboardError) -> axum::response::Response {
    match e {
        DashboardError::StudentProfileNotFound(_)
        | DashboardError::StaffProfileNotFound(_)
        | DashboardError::ParentProfileNotFound(_) => {
            json_error(StatusCode::NOT_FOUND, "profile_not_found", &e.to_string())
        }
        DashboardError::Database(err) => internal_error("Dashboard query failed", &err),
    }
}

/// GET /dashboard/stats - Aggregate counts shaped by the caller's role.
async fn stats(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let (user, principal, _) = match load_principal(&state, auth.user_id()).await {
        Ok(loaded) => loaded,
        Err(response) => return response,
    };

    let repo = DashboardRepository::new((*state.db).clone());

    match principal.role {
        Role::Admin | Role::Management => match repo.management_stats().await {
            Ok(s) => (
                StatusCode::OK,
                Json(json!({
                    "total_students": s.total_students,
                    "total_staff": s.total_staff,
                    "total_parents": s.total_parents,
                    "total_classes": s.total_classes,
                    "total_subjects": s.total_subjects,
                    "pending_fee_payments": s.pending_fee_payments,
                })),
            )
                .into_response(),
            Err(e) => map_dashboard_error(e),
        },
        Role::Staff => match repo.staff_stats(user.id).await {
            Ok(s) => (
                StatusCode::OK,
                Json(json!({
                    "assigned_classes": s.assigned_classes,
                    "assigned_subjects": s.assigned_subjects,
                    "students_count": s.students_count,
                })),
            )
                .into_response(),
            Err(e) => map_dashboard_error(e),
        },
        Role::Student => match repo.student_stats(user.id).await {
            Ok(s) => (
                StatusCode::OK,
                Json(json!({
                    "current_class": s.current_class,
                    "total_results": s.total_results,
                    "pending_fees": s.pending_fees,
                })),
            )
                .into_response(),
            Err(e) => map_dashboard_error(e),
        },
        Role::Parent => match repo.parent_stats(user.id).await {
            Ok(s) => (
                StatusCode::OK,
                Json(json!({
                    "children_count": s.children_count,
                    "total_pending_fees": s.total_pending_fees,
                })),
            )
                .into_response(),
            Err(e) => map_dashboard_error(e),
        },
    }
}
