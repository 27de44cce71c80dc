//! `mensa price ...`

use std::io::Write;

use shared::models::{DiscountCalculation, DiscountResolution};

use super::{AppContext, money};

/// What to price the amount for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriceTarget {
    AccountType(String),
    Group(String),
}

pub async fn run(
    ctx: &AppContext,
    amount: f64,
    target: PriceTarget,
    json: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let calc = match &target {
        PriceTarget::AccountType(tag) => {
            ctx.engine()
                .calculate_discount_by_account_type(amount, tag)
                .await
        }
        PriceTarget::Group(name) => {
            ctx.engine()
                .calculate_discount_by_group_name(amount, name)
                .await
        }
    };

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&calc)?)?;
    } else {
        render(&calc, out)?;
    }
    Ok(())
}

fn render(calc: &DiscountCalculation, out: &mut impl Write) -> anyhow::Result<()> {
    writeln!(out, "Zwischensumme: {}", money(calc.original_price))?;
    writeln!(
        out,
        "Rabatt:        -{} ({}, {}%)",
        money(calc.discount_amount),
        calc.group_name,
        calc.discount_percentage
    )?;
    writeln!(out, "Gesamt:        {}", money(calc.final_price))?;
    let note = match calc.resolution {
        DiscountResolution::Live => "group from store",
        DiscountResolution::Fallback => "store unavailable, built-in default group used",
        DiscountResolution::NotFound => "no matching group, full price",
    };
    writeln!(out, "({note})")?;
    Ok(())
}
