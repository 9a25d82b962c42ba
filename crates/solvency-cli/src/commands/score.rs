//! Score command implementation.

use anyhow::Result;
use serde::Serialize;
use tabled::Tabled;

use solvency_risk::ScoreInputs;
use solvency_stress::{leverage_sensitivity, run_price_shocks};

use crate::cli::OutputFormat;
use crate::commands::{load_strategy, model_inputs, StrategyArgs};
use crate::output::{print_json, KeyValue, Output};

#[derive(Debug, Serialize, Tabled)]
struct ScoreRow {
    #[tabled(rename = "Score")]
    risk_score: f64,
    #[tabled(rename = "Margin %")]
    liquidation_margin_pct: f64,
    #[tabled(rename = "Survival")]
    stress_survival_ratio: f64,
    #[tabled(rename = "Leverage Penalty")]
    leverage_sensitivity_pct: f64,
}

/// Execute the score command.
pub fn execute(args: StrategyArgs, out: &Output) -> Result<()> {
    let strategy = load_strategy(&args.strategy)?;
    let (position, rule) = model_inputs(&strategy)?;
    let stress = strategy.stress_config();

    let shocks = run_price_shocks(&position, &rule, &stress.axes.price_shocks)?;
    let leverage = leverage_sensitivity(&position, &rule, &stress.leverage_levels)?;
    let score =
        ScoreInputs::from_runs(strategy.liquidation_margin_pct(), &shocks, &leverage)?.score();

    match out.format {
        OutputFormat::Minimal => {
            println!("{}", score.score);
            Ok(())
        }
        OutputFormat::Json => print_json(&score),
        OutputFormat::Csv => out.rows(&[ScoreRow {
            risk_score: score.score,
            liquidation_margin_pct: score.inputs.liquidation_margin_pct,
            stress_survival_ratio: score.inputs.stress_survival_ratio,
            leverage_sensitivity_pct: score.inputs.leverage_sensitivity_pct,
        }]),
        OutputFormat::Table => {
            out.header("Risk Score");
            out.rows(&[
                KeyValue::new("Risk Score", format!("{:.2}", score.score)),
                KeyValue::from_pct("Liquidation Margin", score.inputs.liquidation_margin_pct),
                KeyValue::new(
                    "Stress Survival Ratio",
                    format!("{:.2}", score.inputs.stress_survival_ratio),
                ),
                KeyValue::from_pct("Leverage Penalty", score.inputs.leverage_sensitivity_pct),
            ])
        }
    }
}
