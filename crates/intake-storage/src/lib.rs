//! # intake-storage
//!
//! Filesystem side of Intake: the [`TrustedRoot`] every path is confined
//! to, the local storage provider used for staging and relocation, and
//! the recursive directory walk behind the target directory picker.

pub mod catalog;
pub mod confine;
pub mod local;

pub use catalog::list_directories;
pub use confine::TrustedRoot;
pub use local::LocalStorageProvider;
