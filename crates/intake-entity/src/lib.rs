//! # intake-entity
//!
//! Domain entity models for Intake. Persisted entities derive
//! `sqlx::FromRow`; everything derives `Serialize`/`Deserialize`.

pub mod catalog;
pub mod settings;
pub mod upload;
