//! Unified Result Types

use crate::utils::AppError;

/// Application-level Result type
///
/// Used by services and commands
pub type AppResult<T> = Result<T, AppError>;
