//! Command-line argument definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Workload reports for pet and house sitters.
///
/// Reads calendar events exported by your calendar sync, works out which
/// entries are billable visits, and summarises how heavy each day and week is.
#[derive(Debug, Parser)]
#[command(name = "wl", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Events file (JSON array or JSON Lines); `-` reads stdin.
    /// Defaults to `events_path` from the config.
    #[arg(short, long, global = true)]
    pub events: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show how each event was classified.
    Classify {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show the workload for one day.
    Day {
        /// Day to report (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Leave out the travel estimate.
        #[arg(long)]
        no_travel: bool,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show seven days of workload.
    Week {
        /// First day (YYYY-MM-DD). Defaults to Monday of this week.
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Compare a week with the week before it.
    Compare {
        /// First day of the week to compare (YYYY-MM-DD).
        /// Defaults to Monday of this week.
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Compare the last N days with the N days before them.
    Period {
        /// Length of each period in days.
        #[arg(long, default_value_t = 7, value_parser = clap::value_parser!(u32).range(1..=366))]
        days: u32,

        /// Last day of the current period (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        end: Option<NaiveDate>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_day_with_date() {
        let cli = Cli::try_parse_from(["wl", "--events", "cal.json", "day", "--date", "2025-03-10"])
            .unwrap();
        assert_eq!(cli.events, Some(PathBuf::from("cal.json")));
        match cli.command {
            Some(Commands::Day {
                date, no_travel, ..
            }) => {
                assert_eq!(date, NaiveDate::from_ymd_opt(2025, 3, 10));
                assert!(!no_travel);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn period_days_must_be_positive() {
        assert!(Cli::try_parse_from(["wl", "period", "--days", "0"]).is_err());
        let cli = Cli::try_parse_from(["wl", "period"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Period { days: 7, .. })));
    }

    #[test]
    fn rejects_malformed_date() {
        assert!(Cli::try_parse_from(["wl", "week", "--start", "next monday"]).is_err());
    }
}
