use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use mensa_server::cli::{Cli, Command, GroupsAction};
use mensa_server::commands::price::PriceTarget;
use mensa_server::commands::{AppContext, groups, price};
use shared::models::{DiscountGroupCreate, DiscountGroupUpdate};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = mensa_server::setup_environment().context("Failed to set up environment")?;
    if let Some(database) = cli.database {
        config.database_path = Some(database);
    }

    let ctx = AppContext::open(&config).await.with_context(|| {
        format!(
            "Failed to open database {}",
            config.database_path().display()
        )
    })?;

    let mut out = std::io::stdout();
    match cli.command {
        Command::Groups { action } => match action {
            GroupsAction::List => groups::list(&ctx, cli.json, &mut out).await?,
            GroupsAction::Create {
                name,
                description,
                percentage,
            } => {
                let data = DiscountGroupCreate {
                    name,
                    description,
                    discount_percentage: percentage,
                };
                groups::create(&ctx, data, cli.json, &mut out).await?
            }
            GroupsAction::Update {
                id,
                name,
                description,
                percentage,
            } => {
                let data = DiscountGroupUpdate {
                    name,
                    description,
                    discount_percentage: percentage,
                };
                groups::update(&ctx, &id, data, cli.json, &mut out).await?
            }
            GroupsAction::Delete { id } => groups::delete(&ctx, &id, cli.json, &mut out).await?,
        },
        Command::Price(args) => {
            let target = match (args.account_type, args.group) {
                (Some(tag), _) => PriceTarget::AccountType(tag),
                (None, Some(name)) => PriceTarget::Group(name),
                (None, None) => anyhow::bail!("Pass --account-type or --group"),
            };
            price::run(&ctx, args.amount, target, cli.json, &mut out).await?
        }
    }
    Ok(())
}
