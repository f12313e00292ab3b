//! Submission token and admin credential configuration.

use serde::{Deserialize, Serialize};

/// Authorization settings.
///
/// Session management lives in the host application; Intake only verifies
/// the opaque submission token embedded in the upload form and the bearer
/// credential presented on admin routes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Expected value of the form's submission authorization token.
    #[serde(default)]
    pub submission_token: String,
    /// Bearer token required on `/api/admin/*` routes.
    #[serde(default)]
    pub admin_token: String,
}
