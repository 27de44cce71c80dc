//! `mensa groups ...`

use std::io::Write;

use anyhow::Context;
use shared::models::{DiscountGroup, DiscountGroupCreate, DiscountGroupUpdate};

use super::AppContext;
use crate::discount::GroupOrigin;

/// Print the groups the engine would price with, marking fallback data
pub async fn list(ctx: &AppContext, json: bool, out: &mut impl Write) -> anyhow::Result<()> {
    let loaded = ctx.engine().load_discount_groups().await;
    let fallback = loaded.origin == GroupOrigin::Fallback;

    if json {
        let body = serde_json::json!({
            "fallback": fallback,
            "groups": loaded.groups.as_ref(),
        });
        writeln!(out, "{}", serde_json::to_string_pretty(&body)?)?;
        return Ok(());
    }

    if fallback {
        writeln!(out, "Store unavailable, showing built-in default groups")?;
    }
    if loaded.groups.is_empty() {
        writeln!(out, "No discount groups")?;
        return Ok(());
    }
    writeln!(out, "{:<36}  {:<20}  {:>7}  DESCRIPTION", "ID", "NAME", "RABATT")?;
    for group in loaded.groups.iter() {
        writeln!(
            out,
            "{:<36}  {:<20}  {:>6}%  {}",
            group.id, group.name, group.discount_percentage, group.description
        )?;
    }
    Ok(())
}

pub async fn create(
    ctx: &AppContext,
    data: DiscountGroupCreate,
    json: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let group = ctx
        .service
        .create(data)
        .await
        .context("Failed to create discount group")?;
    print_group("Created", &group, json, out)
}

pub async fn update(
    ctx: &AppContext,
    id: &str,
    data: DiscountGroupUpdate,
    json: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    if data.is_empty() {
        anyhow::bail!("Nothing to update, pass --name, --description or --percentage");
    }
    let group = ctx
        .service
        .update(id, data)
        .await
        .with_context(|| format!("Failed to update discount group {id}"))?;
    print_group("Updated", &group, json, out)
}

pub async fn delete(ctx: &AppContext, id: &str, json: bool, out: &mut impl Write) -> anyhow::Result<()> {
    ctx.service
        .delete(id)
        .await
        .with_context(|| format!("Failed to delete discount group {id}"))?;
    if json {
        writeln!(out, "{}", serde_json::json!({ "deleted": id }))?;
    } else {
        writeln!(out, "Deleted {id}")?;
    }
    Ok(())
}

fn print_group(verb: &str, group: &DiscountGroup, json: bool, out: &mut impl Write) -> anyhow::Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(group)?)?;
    } else {
        writeln!(
            out,
            "{verb} {} ({}): {}%",
            group.name, group.id, group.discount_percentage
        )?;
    }
    Ok(())
}
