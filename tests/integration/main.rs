//! Integration tests driving the HTTP API against in-memory repositories
//! and a temporary trusted root.

mod helpers;
mod moderation_test;
mod settings_test;
mod submission_test;
