//! Submission authorization seam.

/// Verifies the opaque authorization token carried by an upload form.
///
/// Token issuance belongs to the host application; Intake only asks
/// whether a presented token is acceptable for the current context.
pub trait SubmissionGuard: Send + Sync + std::fmt::Debug + 'static {
    /// Return `true` if the token authorizes a submission.
    fn verify(&self, token: &str) -> bool;
}
