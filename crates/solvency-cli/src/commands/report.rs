//! Report command implementation.
//!
//! Assembles every analysis and writes or prints the JSON report.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

use solvency_report::assemble_report;

use crate::commands::load_strategy;
use crate::error::{CliError, CliResult};
use crate::output::{print_json, Output};

/// Arguments for the report command.
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Strategy document (.yaml, .yml, .toml or .json)
    pub strategy: PathBuf,

    /// Write the report to this .json file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute the report command.
pub fn execute(args: ReportArgs, out: &Output) -> Result<()> {
    if let Some(ref path) = args.output {
        check_output_path(path)?;
    }

    let strategy = load_strategy(&args.strategy)?;
    let report = assemble_report(&strategy)?;

    match args.output {
        Some(path) => {
            report.write_json(&path)?;
            out.success(&format!(
                "Report written to {} (risk level {}, score {:.2})",
                path.display(),
                report.base.risk_level,
                report.risk_score
            ));
        }
        None => print_json(&report)?,
    }
    Ok(())
}

fn check_output_path(path: &Path) -> CliResult<()> {
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    if is_json {
        Ok(())
    } else {
        Err(CliError::UnsupportedOutput {
            path: path.to_path_buf(),
        })
    }
}
