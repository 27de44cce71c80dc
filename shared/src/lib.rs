//! Shared types for the Mensa workspace
//!
//! Domain models, the unified error type and small utilities used by the
//! discount engine, the store and every front end.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorCode};
pub use serde::{Deserialize, Serialize};
