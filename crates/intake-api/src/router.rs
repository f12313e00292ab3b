//! Route definitions for the Intake HTTP API.
//!
//! All routes are mounted under `/api`. Admin routes live under
//! `/api/admin` and authenticate through the `AdminUser` extractor.

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::handlers;
use crate::state::AppState;

/// Build the API router and attach the state.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(submission_routes())
        .merge(admin_routes())
        .merge(health_routes());

    Router::new().nest("/api", api_routes).with_state(state)
}

/// End-user submission
fn submission_routes() -> Router<AppState> {
    Router::new().route("/uploads", post(handlers::submission::submit_upload))
}

/// Moderation, directory picker, settings
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/uploads", get(handlers::uploads::list_uploads))
        .route("/admin/uploads/{id}", get(handlers::uploads::get_upload))
        .route(
            "/admin/uploads/{id}/approval",
            put(handlers::uploads::set_approval),
        )
        .route(
            "/admin/directories",
            get(handlers::directories::list_directories),
        )
        .route(
            "/admin/settings",
            get(handlers::settings::get_settings).put(handlers::settings::update_settings),
        )
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
