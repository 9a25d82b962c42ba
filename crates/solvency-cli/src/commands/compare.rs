//! Compare command implementation.
//!
//! Re-runs the scenario grid under governance shocks, protocol presets or
//! borrowing strategies and prints one zone distribution per variant.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};
use serde::Serialize;
use tabled::Tabled;

use solvency_risk::{
    governance_stress, multi_protocol, strategy_comparison, RiskZone, SurfaceSummary,
};

use crate::cli::OutputFormat;
use crate::commands::{load_strategy, model_inputs};
use crate::output::{print_json, Output};

/// Which comparison to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ComparisonKind {
    /// Tightened liquidation thresholds
    Governance,
    /// Protocol threshold presets
    Protocols,
    /// Scaled borrowed amounts
    Strategies,
}

/// Arguments for the compare command.
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Comparison to run
    #[arg(value_enum)]
    pub kind: ComparisonKind,

    /// Strategy document (.yaml, .yml, .toml or .json)
    pub strategy: PathBuf,
}

/// One variant's zone distribution.
#[derive(Debug, Serialize, Tabled)]
struct VariantRow {
    #[tabled(rename = "Variant")]
    variant: String,
    #[tabled(rename = "Parameter")]
    parameter: f64,
    #[tabled(rename = "Scenarios")]
    total_scenarios: usize,
    #[tabled(rename = "SAFE %")]
    safe_pct: f64,
    #[tabled(rename = "WARNING %")]
    warning_pct: f64,
    #[tabled(rename = "LIQUIDATED %")]
    liquidated_pct: f64,
}

impl VariantRow {
    fn new(variant: &str, parameter: f64, summary: &SurfaceSummary) -> Self {
        Self {
            variant: variant.to_string(),
            parameter,
            total_scenarios: summary.total_scenarios,
            safe_pct: summary.pct(RiskZone::Safe),
            warning_pct: summary.pct(RiskZone::Warning),
            liquidated_pct: summary.pct(RiskZone::Liquidated),
        }
    }
}

/// Execute the compare command.
pub fn execute(args: CompareArgs, out: &Output) -> Result<()> {
    let strategy = load_strategy(&args.strategy)?;
    let (position, rule) = model_inputs(&strategy)?;
    let axes = &strategy.stress_config().axes;
    let exec = strategy.execution();

    let (title, rows) = match args.kind {
        ComparisonKind::Governance => {
            let outcomes =
                governance_stress(&position, &strategy.governance_shocks(), axes, &exec)?;
            if out.format == OutputFormat::Json {
                return print_json(&outcomes);
            }
            let rows = outcomes
                .iter()
                .map(|o| {
                    VariantRow::new(
                        &o.governance_scenario,
                        o.liquidation_threshold,
                        &o.risk_summary,
                    )
                })
                .collect::<Vec<_>>();
            ("Governance Stress (liquidation threshold)", rows)
        }
        ComparisonKind::Protocols => {
            let outcomes = multi_protocol(&position, &strategy.protocol_presets(), axes, &exec)?;
            if out.format == OutputFormat::Json {
                return print_json(&outcomes);
            }
            let rows = outcomes
                .iter()
                .map(|o| VariantRow::new(&o.protocol, o.liquidation_threshold, &o.summary))
                .collect::<Vec<_>>();
            ("Protocol Comparison (liquidation threshold)", rows)
        }
        ComparisonKind::Strategies => {
            let outcomes = strategy_comparison(
                &position,
                rule.liquidation_threshold(),
                &strategy.strategy_variants(),
                axes,
                &exec,
            )?;
            if out.format == OutputFormat::Json {
                return print_json(&outcomes);
            }
            let rows = outcomes
                .iter()
                .map(|o| VariantRow::new(&o.strategy, o.borrow_multiplier, &o.risk_summary))
                .collect::<Vec<_>>();
            ("Strategy Comparison (borrow multiplier)", rows)
        }
    };

    out.header(title);
    out.rows(&rows)
}
