//! Request context carrying who is acting and from where.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Context for the current request.
///
/// Authentication happens in the host application; the API layer copies
/// whatever identity it was handed into this struct so services can
/// attribute and log their actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// Identity of the acting user, if known.
    pub user: Option<String>,
    /// IP address of the request origin.
    pub ip_address: Option<String>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user: Option<String>, ip_address: Option<String>) -> Self {
        Self {
            user: user.filter(|u| !u.trim().is_empty()),
            ip_address,
            request_time: Utc::now(),
        }
    }

    /// Context with no identity attached.
    pub fn anonymous() -> Self {
        Self::new(None, None)
    }

    /// Name used in log lines.
    pub fn actor(&self) -> &str {
        self.user.as_deref().unwrap_or("anonymous")
    }
}
