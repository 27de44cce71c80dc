//! Discount Group Models

use serde::{Deserialize, Serialize};

/// Discount group entity (Rabattgruppe)
///
/// `discount_percentage` is on the whole-number scale: `15.0` means 15 %.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DiscountGroup {
    pub id: String,
    pub name: String,
    pub description: String,
    pub discount_percentage: f64,
    pub created_at: i64,
    pub updated_at: i64,
}

impl DiscountGroup {
    /// Case-insensitive name comparison used for every group lookup
    pub fn name_matches(&self, name: &str) -> bool {
        !name.is_empty() && self.name.to_lowercase() == name.to_lowercase()
    }
}

/// Create discount group payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscountGroupCreate {
    pub name: String,
    pub description: String,
    pub discount_percentage: f64,
}

/// Update discount group payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscountGroupUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub discount_percentage: Option<f64>,
}

impl DiscountGroupUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.discount_percentage.is_none()
    }
}
