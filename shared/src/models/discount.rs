//! Discount Calculation Model

use serde::{Deserialize, Serialize};

/// Group name reported when the caller supplied no group at all
pub const UNKNOWN_GROUP_NAME: &str = "Unbekannt";

/// Where the percentage of a calculation came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountResolution {
    /// Group found in data loaded from the store (fresh or cached)
    Live,
    /// Group found in the static fallback table because the store failed
    Fallback,
    /// No group matched; full price is charged
    NotFound,
}

/// Discount breakdown for one subtotal
///
/// Never persisted; recomputed for every render. Amounts are unrounded,
/// display code rounds to the currency's precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountCalculation {
    pub original_price: f64,
    /// Whole-number scale (15.0 = 15 %)
    pub discount_percentage: f64,
    pub discount_amount: f64,
    pub final_price: f64,
    pub group_name: String,
    pub resolution: DiscountResolution,
}

impl DiscountCalculation {
    /// Full-price result for a group that could not be resolved
    pub fn not_found(original_price: f64, group_name: &str) -> Self {
        let group_name = if group_name.is_empty() {
            UNKNOWN_GROUP_NAME.to_string()
        } else {
            group_name.to_string()
        };
        Self {
            original_price,
            discount_percentage: 0.0,
            discount_amount: 0.0,
            final_price: original_price,
            group_name,
            resolution: DiscountResolution::NotFound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_echoes_group_name() {
        let calc = DiscountCalculation::not_found(100.0, "NonexistentGroup");
        assert_eq!(calc.original_price, 100.0);
        assert_eq!(calc.discount_percentage, 0.0);
        assert_eq!(calc.discount_amount, 0.0);
        assert_eq!(calc.final_price, 100.0);
        assert_eq!(calc.group_name, "NonexistentGroup");
        assert_eq!(calc.resolution, DiscountResolution::NotFound);
    }

    #[test]
    fn test_not_found_with_empty_name_uses_placeholder() {
        let calc = DiscountCalculation::not_found(12.5, "");
        assert_eq!(calc.group_name, UNKNOWN_GROUP_NAME);
        assert_eq!(calc.final_price, 12.5);
    }

    #[test]
    fn test_resolution_serializes_snake_case() {
        let json = serde_json::to_string(&DiscountResolution::NotFound).unwrap();
        assert_eq!(json, "\"not_found\"");
    }
}
