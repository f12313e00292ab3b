//! # intake-database
//!
//! Record store for Intake: PostgreSQL connection management, migrations,
//! the repository traits the services depend on, and their PostgreSQL and
//! in-memory implementations.

pub mod connection;
mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::{SettingsRepository, UploadRepository};
