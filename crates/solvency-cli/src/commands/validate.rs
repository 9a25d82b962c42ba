//! Validate command implementation.

use anyhow::{Context, Result};
use serde::Serialize;
use tabled::Tabled;

use solvency_config::{StrategyFile, Validate};

use crate::cli::OutputFormat;
use crate::commands::StrategyArgs;
use crate::error::CliError;
use crate::output::{print_error, Output};

#[derive(Debug, Serialize, Tabled)]
struct ProblemRow {
    #[tabled(rename = "Field")]
    field: String,
    #[tabled(rename = "Problem")]
    message: String,
}

/// Execute the validate command.
pub fn execute(args: StrategyArgs, out: &Output) -> Result<()> {
    let strategy = StrategyFile::from_path(&args.strategy)
        .with_context(|| format!("cannot load strategy '{}'", args.strategy.display()))?;
    let problems = strategy.validate();

    if problems.is_empty() {
        out.success(&format!("{} is valid", args.strategy.display()));
        return Ok(());
    }

    if out.format == OutputFormat::Table {
        for problem in &problems {
            print_error(&problem.to_string());
        }
    } else {
        let rows: Vec<ProblemRow> = problems
            .iter()
            .map(|p| ProblemRow {
                field: p.field.clone(),
                message: p.message.clone(),
            })
            .collect();
        out.rows(&rows)?;
    }

    Err(CliError::InvalidStrategy(problems.len()).into())
}
