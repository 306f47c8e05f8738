//! Command-line definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Wedding cost estimates, ceremony dates, and budget health.
#[derive(Debug, Parser)]
#[command(name = "mandap", version, about)]
pub struct Cli {
    /// Extra configuration file layered over `config/` and under the environment
    #[arg(short, long, global = true, env = "MANDAP_CONFIG")]
    pub config: Option<String>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Estimate costs for a venue, vendor tier, and guest count
    Estimate(EstimateArgs),

    /// Derive ceremony dates from the wedding date
    Schedule(ScheduleArgs),

    /// Summarize spending against a budget
    Budget(BudgetArgs),
}

/// Shared pricing context flags.
#[derive(Debug, Clone, Args)]
pub struct ContextArgs {
    /// Venue class (home, community_hall, hotel_ballroom)
    #[arg(long, default_value = "community_hall")]
    pub venue: String,

    /// Vendor tier (budget, standard, premium)
    #[arg(long, default_value = "standard")]
    pub tier: String,

    /// Expected guest count
    #[arg(long, default_value_t = 150)]
    pub guests: u32,

    /// City used for the regional factor
    #[arg(long)]
    pub city: Option<String>,
}

/// Arguments for `mandap estimate`.
#[derive(Debug, Args)]
pub struct EstimateArgs {
    #[command(flatten)]
    pub context: ContextArgs,

    /// Base low cost; refines a single range instead of the catalog
    #[arg(long, requires = "base_high")]
    pub base_low: Option<String>,

    /// Base high cost
    #[arg(long, requires = "base_low")]
    pub base_high: Option<String>,

    /// Only estimate these catalog categories (repeatable)
    #[arg(long = "only", conflicts_with = "base_low")]
    pub only: Vec<String>,
}

/// Arguments for `mandap schedule`.
#[derive(Debug, Args)]
pub struct ScheduleArgs {
    /// Wedding date (YYYY-MM-DD)
    #[arg(long)]
    pub date: String,

    /// Tradition whose ceremonies to schedule
    #[arg(long, conflicts_with = "ceremony", required_unless_present = "ceremony")]
    pub tradition: Option<String>,

    /// Ceremony id to schedule (repeatable)
    #[arg(long)]
    pub ceremony: Vec<String>,

    /// Group by timing instead of listing by date
    #[arg(long)]
    pub grouped: bool,
}

/// Arguments for `mandap budget`.
#[derive(Debug, Args)]
pub struct BudgetArgs {
    /// JSON file with `total_budget`, `categories`, and an optional `context`
    #[arg(short, long)]
    pub input: PathBuf,

    /// Override the file's total budget
    #[arg(long)]
    pub total: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_estimate_defaults() {
        let cli = Cli::try_parse_from(["mandap", "estimate"]).unwrap();
        let Commands::Estimate(args) = cli.command else {
            panic!("expected estimate");
        };
        assert_eq!(args.context.venue, "community_hall");
        assert_eq!(args.context.tier, "standard");
        assert_eq!(args.context.guests, 150);
        assert!(args.base_low.is_none());
    }

    #[test]
    fn test_base_bounds_must_come_together() {
        assert!(Cli::try_parse_from(["mandap", "estimate", "--base-low", "1000"]).is_err());
    }

    #[test]
    fn test_schedule_requires_tradition_or_ceremony() {
        assert!(Cli::try_parse_from(["mandap", "schedule", "--date", "2025-06-20"]).is_err());
        assert!(
            Cli::try_parse_from([
                "mandap",
                "schedule",
                "--date",
                "2025-06-20",
                "--tradition",
                "sikh",
                "--ceremony",
                "walima",
            ])
            .is_err()
        );
    }

    #[test]
    fn test_schedule_repeated_ceremonies() {
        let cli = Cli::try_parse_from([
            "mandap",
            "schedule",
            "--date",
            "2025-06-20",
            "--ceremony",
            "nikah",
            "--ceremony",
            "walima",
            "--grouped",
        ])
        .unwrap();
        let Commands::Schedule(args) = cli.command else {
            panic!("expected schedule");
        };
        assert_eq!(args.ceremony, vec!["nikah", "walima"]);
        assert!(args.grouped);
    }
}
