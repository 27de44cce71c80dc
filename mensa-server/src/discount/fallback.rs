//! Static discount groups served while the store is unreachable

use shared::models::{AccountType, DiscountGroup};

fn fallback_group(id: &str, account_type: AccountType, description: &str, pct: f64) -> DiscountGroup {
    DiscountGroup {
        id: id.to_string(),
        name: account_type.group_name().to_string(),
        description: description.to_string(),
        discount_percentage: pct,
        created_at: 0,
        updated_at: 0,
    }
}

/// The three default groups, one per legacy account type
pub fn fallback_discount_groups() -> Vec<DiscountGroup> {
    vec![
        fallback_group(
            "fallback-student",
            AccountType::Student,
            "Rabatt für Schülerinnen und Schüler",
            15.0,
        ),
        fallback_group(
            "fallback-teacher",
            AccountType::Teacher,
            "Rabatt für Lehrkräfte",
            10.0,
        ),
        fallback_group(
            "fallback-external",
            AccountType::External,
            "Keine Rabatte für externe Besucher",
            0.0,
        ),
    ]
}
