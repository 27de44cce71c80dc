//! Discount arithmetic
//!
//! Carried out in `Decimal` and converted back to `f64` unrounded;
//! display code rounds to cents. Subtotals beyond `Decimal`'s range are
//! computed in `f64` instead.

use rust_decimal::prelude::*;
use shared::models::{DiscountCalculation, DiscountGroup, DiscountResolution};

/// Convert back to f64 without rounding
fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_else(|| {
        tracing::error!(value = %value, "Decimal not representable as f64, defaulting to zero");
        0.0
    })
}

/// Negative or non-finite subtotals are caller bugs; price them as zero
pub fn sanitize_price(original_price: f64) -> f64 {
    if original_price.is_finite() && original_price >= 0.0 {
        original_price
    } else {
        tracing::warn!(original_price, "Invalid subtotal for discount calculation, using 0");
        0.0
    }
}

/// Keep a stored percentage within [0, 100] for the arithmetic
fn clamp_percentage(pct: f64) -> f64 {
    if !pct.is_finite() {
        tracing::warn!(pct, "Non-finite discount percentage, using 0");
        return 0.0;
    }
    if !(0.0..=100.0).contains(&pct) {
        tracing::warn!(pct, "Discount percentage outside [0, 100], clamping");
    }
    pct.clamp(0.0, 100.0)
}

/// Apply a resolved group's percentage to a subtotal
pub fn apply_group_discount(
    original_price: f64,
    group: &DiscountGroup,
    resolution: DiscountResolution,
) -> DiscountCalculation {
    let original_price = sanitize_price(original_price);
    let pct = clamp_percentage(group.discount_percentage);

    let (discount_amount, final_price) =
        decimal_discount(original_price, pct).unwrap_or_else(|| {
            tracing::debug!(original_price, pct, "Subtotal outside Decimal range, computing in f64");
            let discount_amount = original_price * (pct / 100.0);
            (discount_amount, original_price - discount_amount)
        });

    DiscountCalculation {
        original_price,
        discount_percentage: pct,
        discount_amount,
        final_price,
        group_name: group.name.clone(),
        resolution,
    }
}

/// `None` when any step leaves `Decimal`'s range
fn decimal_discount(original_price: f64, pct: f64) -> Option<(f64, f64)> {
    let price = Decimal::from_f64(original_price)?;
    let pct = Decimal::from_f64(pct)?;
    let discount_amount = price.checked_mul(pct)?.checked_div(Decimal::ONE_HUNDRED)?;
    let final_price = price.checked_sub(discount_amount)?;
    Some((to_f64(discount_amount), to_f64(final_price)))
}
