//! Convenience result type alias for Intake.

use crate::error::AppError;

/// A specialized `Result` type for Intake operations.
pub type AppResult<T> = Result<T, AppError>;
