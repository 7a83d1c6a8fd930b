//! API route definitions.

use axum::{Router, middleware};

use crate::{AppState, middleware::auth::auth_middleware};

pub mod academic_years;
pub mod announcements;
pub mod attendance;
pub mod auth;
pub mod classes;
pub mod dashboard;
pub mod fees;
pub mod health;
pub mod parents;
pub mod results;
pub mod staff;
pub mod students;
pub mod subjects;
pub mod support;
pub mod users;

/// Creates the API router with protected routes that need state for middleware.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    // Protected routes that require authentication
    let protected_routes = Router::new()
        .merge(users::routes())
        .merge(academic_years::routes())
        .merge(classes::routes())
        .merge(subjects::routes())
        .merge(students::routes())
        .merge(staff::routes())
        .merge(parents::routes())
        .merge(results::routes())
        .merge(fees::routes())
        .merge(announcements::routes())
        .merge(attendance::routes())
        .merge(dashboard::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Combine public and protected routes
    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(protected_routes)
}
