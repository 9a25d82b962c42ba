//! Solvency CLI - stress testing and risk classification for collateralized
//! borrowing positions.
//!
//! # Usage
//!
//! ```bash
//! # Full report to disk, then its narrative
//! solvency report strategy.yaml --output reports/latest.json
//! solvency explain reports/latest.json
//!
//! # Individual analyses
//! solvency stress strategy.yaml
//! solvency surface strategy.yaml --format csv
//! solvency heatmap strategy.yaml
//! solvency score strategy.yaml --format minimal
//!
//! # Comparisons
//! solvency compare protocols strategy.yaml
//! ```

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};
use output::{print_error, Output};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let out = Output::new(cli.format, cli.quiet);

    let result = match cli.command {
        Commands::Report(args) => commands::report::execute(args, &out),
        Commands::Stress(args) => commands::stress::execute(args, &out),
        Commands::Surface(args) => commands::surface::execute(args, &out),
        Commands::Heatmap(args) => commands::heatmap::execute(args, &out),
        Commands::Score(args) => commands::score::execute(args, &out),
        Commands::Compare(args) => commands::compare::execute(args, &out),
        Commands::Explain(args) => commands::explain::execute(args, &out),
        Commands::Validate(args) => commands::validate::execute(args, &out),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so table, JSON and CSV output stay clean on stdout.
fn init_tracing(verbose: u8, quiet: bool) {
    let default_level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}
