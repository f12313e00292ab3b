//! Core traits defined in `intake-core` and implemented by other crates.

pub mod guard;
pub mod storage;

pub use guard::SubmissionGuard;
pub use storage::StorageProvider;
