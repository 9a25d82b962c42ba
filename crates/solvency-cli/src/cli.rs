//! CLI argument definitions.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use crate::commands::{CompareArgs, ExplainArgs, ReportArgs, StrategyArgs};

/// Solvency - stress testing and risk classification for collateralized borrowing
#[derive(Parser)]
#[command(name = "solvency")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Assemble the full risk report
    Report(ReportArgs),

    /// Base report and direct price shocks
    Stress(StrategyArgs),

    /// Classified scenario grid and zone distribution
    Surface(StrategyArgs),

    /// Zone heatmap per volatility regime
    Heatmap(StrategyArgs),

    /// Risk score and its inputs
    Score(StrategyArgs),

    /// Compare governance shocks, protocols or borrowing strategies
    Compare(CompareArgs),

    /// Explain a previously written report
    Explain(ExplainArgs),

    /// Check a strategy document for problems
    Validate(StrategyArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the headline value)
    Minimal,
}
