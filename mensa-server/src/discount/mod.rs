//! Discount Module
//!
//! Group-based discount pricing for cart and checkout views.
//! The engine owns the group cache; the management service invalidates it.

pub mod cache;
mod calculator;
pub mod clock;
mod engine;
mod fallback;
mod source;

pub use cache::{DEFAULT_CACHE_TTL, DiscountGroupCache};
pub use calculator::*;
pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::*;
pub use fallback::fallback_discount_groups;
pub use source::DiscountGroupSource;
