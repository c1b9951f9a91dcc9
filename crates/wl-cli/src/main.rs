use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use wl_cli::commands::{classify, compare, day, period, util, week};
use wl_cli::{Cli, Commands, Config, source};
use wl_core::ClassifiedEvent;

/// Load config and read classified events from `--events` or the configured path.
fn load_classified(cli: &Cli) -> Result<(Vec<ClassifiedEvent>, Config)> {
    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let path: &Path = cli.events.as_deref().unwrap_or(&config.events_path);
    let events = source::load_events(path)?;
    Ok((wl_core::classify_all(&events), config))
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so JSON on stdout stays parseable
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let Some(command) = &cli.command else {
        // No subcommand, show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let (events, config) = load_classified(&cli)?;
    let analyzer = &config.analyzer;
    let mut out = std::io::stdout().lock();

    match command {
        Commands::Classify { json } => classify::run(&mut out, &events, *json)?,
        Commands::Day {
            date,
            no_travel,
            json,
        } => {
            let analyzer = if *no_travel {
                analyzer.with_travel(false)
            } else {
                analyzer.clone()
            };
            day::run(&mut out, &events, date.unwrap_or_else(today), &analyzer, *json)?;
        }
        Commands::Week { start, json } => {
            let start = start.unwrap_or_else(|| util::monday_of(today()));
            week::run(&mut out, &events, start, analyzer, *json)?;
        }
        Commands::Compare { date, json } => {
            let start = date.unwrap_or_else(|| util::monday_of(today()));
            compare::run(&mut out, &events, start, analyzer, *json)?;
        }
        Commands::Period { days, end, json } => {
            let end = end.unwrap_or_else(today);
            period::run(&mut out, &events, end, *days, analyzer, *json)?;
        }
    }

    out.flush()?;
    Ok(())
}
