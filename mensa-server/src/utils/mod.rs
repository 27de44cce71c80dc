//! Utilities - shared helpers and types
//!
//! - [`AppError`] - application error (from shared::error)
//! - [`AppResult`] - service result alias
//! - logging and input validation

pub mod error;
pub mod logger;
pub mod result;
pub mod validation;

pub use error::{AppError, ErrorCode};
pub use result::AppResult;
