//! Settings entities.

pub mod model;

pub use model::{Settings, TARGET_BASE_DIRECTORY_KEY};
