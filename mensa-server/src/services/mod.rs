//! Services - business logic on top of the repositories
//!
//! - [`DiscountGroupService`] - validated discount group management

pub mod discount_group_service;

pub use discount_group_service::DiscountGroupService;
