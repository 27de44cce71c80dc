//! Data models
//!
//! Shared between the discount engine, the store and any front end.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.

pub mod account_type;
pub mod discount;
pub mod discount_group;

// Re-exports
pub use account_type::*;
pub use discount::*;
pub use discount_group::*;
