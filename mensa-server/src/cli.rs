use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "mensa")]
#[command(about = "Discount groups and discounted prices for the school cafeteria")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// SQLite database file (overrides DATABASE_PATH)
    #[arg(long, global = true)]
    pub database: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage discount groups
    Groups {
        #[command(subcommand)]
        action: GroupsAction,
    },

    /// Price a subtotal for an account type or a discount group
    Price(PriceArgs),
}

#[derive(Subcommand, Debug)]
pub enum GroupsAction {
    /// List discount groups as the engine sees them
    List,

    /// Create a discount group
    Create {
        #[arg(long)]
        name: String,

        #[arg(long)]
        description: String,

        /// Whole-number percentage, 15 means 15 %
        #[arg(long)]
        percentage: f64,
    },

    /// Update a discount group; omitted fields stay unchanged
    Update {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        percentage: Option<f64>,
    },

    /// Delete a discount group
    Delete { id: String },
}

#[derive(Args, Debug)]
pub struct PriceArgs {
    /// Subtotal before discount
    #[arg(allow_negative_numbers = true)]
    pub amount: f64,

    /// Legacy account type tag: Student, Teacher or External
    #[arg(long, conflicts_with = "group", required_unless_present = "group")]
    pub account_type: Option<String>,

    /// Discount group name, matched ignoring case
    #[arg(long, required_unless_present = "account_type")]
    pub group: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_price_by_account_type() {
        let cli = Cli::parse_from(["mensa", "price", "200", "--account-type", "Student"]);
        match cli.command {
            Command::Price(args) => {
                assert_eq!(args.amount, 200.0);
                assert_eq!(args.account_type.as_deref(), Some("Student"));
                assert!(args.group.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_price_requires_exactly_one_target() {
        assert!(Cli::try_parse_from(["mensa", "price", "10"]).is_err());
        assert!(
            Cli::try_parse_from([
                "mensa", "price", "10", "--account-type", "Student", "--group", "Lehrer"
            ])
            .is_err()
        );
    }

    #[test]
    fn test_parse_groups_update() {
        let cli = Cli::parse_from(["mensa", "--json", "groups", "update", "abc", "--percentage", "12.5"]);
        assert!(cli.json);
        match cli.command {
            Command::Groups {
                action: GroupsAction::Update { id, name, percentage, .. },
            } => {
                assert_eq!(id, "abc");
                assert!(name.is_none());
                assert_eq!(percentage, Some(12.5));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
