//! HTTP request handlers.

pub mod directories;
pub mod health;
pub mod settings;
pub mod submission;
pub mod uploads;
