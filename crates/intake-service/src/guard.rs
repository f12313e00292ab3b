//! Shared-secret submission guard.

use tracing::warn;

use intake_core::traits::SubmissionGuard;

/// Accepts a submission when the presented token equals the configured secret.
#[derive(Clone)]
pub struct SharedSecretGuard {
    expected: String,
}

impl std::fmt::Debug for SharedSecretGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedSecretGuard").finish_non_exhaustive()
    }
}

impl SharedSecretGuard {
    /// Create a guard. An empty secret rejects every submission.
    pub fn new(expected: impl Into<String>) -> Self {
        let expected = expected.into();
        if expected.is_empty() {
            warn!("No submission token configured; all submissions will be rejected");
        }
        Self { expected }
    }
}

impl SubmissionGuard for SharedSecretGuard {
    fn verify(&self, token: &str) -> bool {
        !self.expected.is_empty() && constant_time_eq(self.expected.as_bytes(), token.as_bytes())
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
