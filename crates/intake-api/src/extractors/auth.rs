//! Caller identity extractors.
//!
//! End-user authentication belongs to the host application, which forwards
//! the identity in `X-Intake-User`. Admin routes additionally require the
//! configured bearer credential.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use intake_core::error::AppError;
use intake_core::traits::SubmissionGuard;
use intake_service::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the host-authenticated user.
pub const USER_HEADER: &str = "x-intake-user";

/// Context for any caller.
#[derive(Debug, Clone)]
pub struct Caller(pub RequestContext);

/// Context for a caller holding the admin credential.
#[derive(Debug, Clone)]
pub struct AdminUser(pub RequestContext);

impl std::ops::Deref for Caller {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::ops::Deref for AdminUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

fn context_from(parts: &Parts) -> RequestContext {
    let header = |name: &str| {
        parts
            .headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(String::from)
    };

    let ip_address = header("x-forwarded-for")
        .and_then(|v| v.split(',').next().map(|ip| ip.trim().to_string()));

    RequestContext::new(header(USER_HEADER), ip_address)
}

impl<S: Send + Sync> FromRequestParts<S> for Caller {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Caller(context_from(parts)))
    }
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or_else(|| AppError::authorization("Missing admin credential"))?;

        let ctx = context_from(parts);
        if !state.admin_guard.verify(token.trim()) {
            tracing::warn!(ip = ?ctx.ip_address, "Rejected admin credential");
            return Err(AppError::authorization("Invalid admin credential").into());
        }

        Ok(AdminUser(ctx))
    }
}
