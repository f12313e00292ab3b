//! Upload record entities.

pub mod model;
pub mod status;

pub use model::{CreateUpload, UploadRecord};
pub use status::UploadStatus;
