//! Explain command implementation.
//!
//! Reads a report written by `solvency report --output` and prints its
//! narrative.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::Tabled;

use solvency_report::{explain, RiskReport};

use crate::cli::OutputFormat;
use crate::output::{print_json, Output};

/// Arguments for the explain command.
#[derive(Args, Debug)]
pub struct ExplainArgs {
    /// Report previously written as JSON
    pub report: PathBuf,
}

#[derive(Debug, Serialize, Tabled)]
struct SectionRow {
    #[tabled(rename = "Section")]
    section: String,
    #[tabled(rename = "Explanation")]
    text: String,
}

/// Execute the explain command.
pub fn execute(args: ExplainArgs, out: &Output) -> Result<()> {
    let report = RiskReport::read_json(&args.report)
        .with_context(|| format!("cannot read report '{}'", args.report.display()))?;
    let explanation = explain(&report);

    match out.format {
        OutputFormat::Json => print_json(&explanation),
        OutputFormat::Table => {
            for (title, text) in explanation.sections() {
                println!("\n{}", title.bold());
                println!("{text}");
            }
            Ok(())
        }
        OutputFormat::Csv | OutputFormat::Minimal => {
            let rows: Vec<SectionRow> = explanation
                .sections()
                .iter()
                .map(|(title, text)| SectionRow {
                    section: (*title).to_string(),
                    text: (*text).to_string(),
                })
                .collect();
            out.rows(&rows)
        }
    }
}
