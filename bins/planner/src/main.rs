//! Mandap Planner
//!
//! Command-line entry point for cost estimates, ceremony schedules, and
//! budget summaries. Reports are written to stdout as JSON; logs go to stderr.

mod cli;
mod commands;

use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use mandap_shared::{AppConfig, AppError, LogConfig};

use crate::cli::{Cli, Commands};
use crate::commands::Planner;

fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let (code, exit) = err
                .downcast_ref::<AppError>()
                .map_or(("INTERNAL_ERROR", 1), |app| (app.error_code(), app.exit_code()));
            tracing::error!(code, "{err:#}");
            eprintln!("error[{code}]: {err:#}");
            ExitCode::from(u8::try_from(exit).unwrap_or(1))
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = AppConfig::load_from(cli.config.as_deref()).map_err(AppError::from)?;
    init_tracing(&config.log);

    let planner = Planner::from_config(&config)?;

    match &cli.command {
        Commands::Estimate(args) => emit(&planner.estimate(args)?, cli.pretty),
        Commands::Schedule(args) => emit(&planner.schedule(args)?, cli.pretty),
        Commands::Budget(args) => emit(&planner.budget(args)?, cli.pretty),
    }
}

/// Initializes the global subscriber; `RUST_LOG` wins over the configured filter.
fn init_tracing(log: &LogConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| log.filter.as_str().into());
    let registry = tracing_subscriber::registry().with(filter);

    if log.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn emit<T: Serialize>(report: &T, pretty: bool) -> anyhow::Result<()> {
    println!("{}", render(report, pretty)?);
    Ok(())
}

fn render<T: Serialize>(report: &T, pretty: bool) -> Result<String, AppError> {
    let json = if pretty {
        serde_json::to_string_pretty(report)
    } else {
        serde_json::to_string(report)
    };
    json.map_err(|e| AppError::Internal(format!("cannot serialize report: {e}")))
}
