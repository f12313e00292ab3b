//! # intake-core
//!
//! Core crate for Intake. Contains the unified error system, configuration
//! schemas, pagination types, and the traits implemented by the storage
//! and service crates.
//!
//! This crate has **no** internal dependencies on other Intake crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
