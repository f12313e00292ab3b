//! # intake-api
//!
//! HTTP API layer for Intake built on Axum.
//!
//! Provides the submission endpoint, the admin moderation, catalog, and
//! settings endpoints, request extractors, DTOs, middleware (CORS and
//! request logging), and the mapping from `AppError` to HTTP responses.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use error::{ApiError, ApiResult};
pub use state::AppState;
