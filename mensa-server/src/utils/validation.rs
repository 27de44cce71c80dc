//! Input validation helpers
//!
//! Limits match the admin form for discount groups.

use crate::utils::{AppError, ErrorCode};

// ── Text length limits ──────────────────────────────────────────────

/// Discount group names
pub const MAX_GROUP_NAME_LEN: usize = 50;

/// Discount group descriptions
pub const MAX_DESCRIPTION_LEN: usize = 500;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-blank and within the length limit.
///
/// Length is counted in characters, so "Schüler" is 7 long.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")).with_detail("field", field));
    }
    let len = value.chars().count();
    if len > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({len} chars, max {max_len})"
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Validate a discount percentage: finite and within [0, 100]
pub fn validate_percentage(value: f64, field: &str) -> Result<(), AppError> {
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(AppError::with_message(
            ErrorCode::DiscountPercentageOutOfRange,
            format!("{field} must be between 0 and 100, got {value}"),
        )
        .with_detail("field", field));
    }
    Ok(())
}
