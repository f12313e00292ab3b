//! # intake-service
//!
//! Business logic for Intake. Each service receives its collaborators
//! (repositories, storage provider, trusted root, guard) at construction
//! time as `Arc` handles and reads settings at call time.

pub mod catalog;
pub mod context;
pub mod guard;
pub mod moderation;
pub mod sanitize;
pub mod settings;
pub mod submission;

pub use catalog::DirectoryCatalog;
pub use context::RequestContext;
pub use guard::SharedSecretGuard;
pub use moderation::{ModerationOutcome, ModerationService, UploadView};
pub use settings::SettingsService;
pub use submission::{
    FilePayload, SubmissionError, SubmissionReceipt, SubmissionRequest, SubmissionService,
};

#[cfg(test)]
mod test_support;
