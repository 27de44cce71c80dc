//! Error handling
//!
//! The application error type lives in `shared::error`; this module adds the
//! conversion from repository errors.
//!
//! | RepoError  | ErrorCode        |
//! |------------|------------------|
//! | NotFound   | NotFound         |
//! | Duplicate  | AlreadyExists    |
//! | Validation | ValidationFailed |
//! | Database   | DatabaseError    |

pub use shared::error::{AppError, ErrorCode};

use crate::db::repository::RepoError;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Database(msg) => {
                tracing::error!(target: "database", error = %msg, "Database error occurred");
                AppError::database(msg)
            }
        }
    }
}
