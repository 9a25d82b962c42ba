//! Stress command implementation.
//!
//! Prints the base report followed by the direct price shock runs.

use anyhow::Result;
use serde::Serialize;
use tabled::Tabled;

use solvency_core::PriceDropOutcome;
use solvency_report::{base_report, BaseReport, RiskLevel};
use solvency_stress::run_price_shocks;

use crate::cli::OutputFormat;
use crate::commands::{load_strategy, model_inputs, StrategyArgs};
use crate::output::{format_pct, print_json, KeyValue, Output};

/// One price shock run.
#[derive(Debug, Serialize, Tabled)]
struct ShockRow {
    #[tabled(rename = "Drop")]
    price_drop_pct: f64,
    #[tabled(rename = "New Price")]
    new_price: f64,
    #[tabled(rename = "Collateral Value")]
    new_collateral_value: f64,
    #[tabled(rename = "LTV %")]
    ltv_pct: f64,
    #[tabled(rename = "Liquidated")]
    liquidated: bool,
}

impl From<&PriceDropOutcome> for ShockRow {
    fn from(o: &PriceDropOutcome) -> Self {
        Self {
            price_drop_pct: o.price_drop_pct,
            new_price: o.new_price,
            new_collateral_value: o.new_collateral_value,
            ltv_pct: o.ltv_pct,
            liquidated: o.liquidated,
        }
    }
}

#[derive(Serialize)]
struct StressView<'a> {
    base: &'a BaseReport,
    price_shocks: &'a [PriceDropOutcome],
}

/// Execute the stress command.
pub fn execute(args: StrategyArgs, out: &Output) -> Result<()> {
    let strategy = load_strategy(&args.strategy)?;
    let (position, rule) = model_inputs(&strategy)?;
    let stress = strategy.stress_config();

    let base = base_report(&position, &rule, &stress.base_report_drops)?;
    let shocks = run_price_shocks(&position, &rule, &stress.axes.price_shocks)?;
    if base.risk_level == RiskLevel::High {
        out.warning("position liquidates below a 30% price drop");
    }

    if out.format == OutputFormat::Json {
        return print_json(&StressView {
            base: &base,
            price_shocks: &shocks,
        });
    }

    if out.format == OutputFormat::Table {
        out.header("Base Report");
        let drop = base
            .liquidation_price_drop_pct
            .map_or_else(|| "none".to_string(), format_pct);
        let summary = vec![
            KeyValue::new("Protocol", base.protocol.as_deref().unwrap_or("-")),
            KeyValue::from_pct("Current LTV", base.current_ltv_pct),
            KeyValue::from_pct("Liquidation Threshold", base.liquidation_threshold_pct),
            KeyValue::new("Liquidation Drop", drop),
            KeyValue::new("Risk Level", base.risk_level.to_string()),
        ];
        out.rows(&summary)?;
        out.header("Price Shocks");
    }

    let rows: Vec<ShockRow> = shocks.iter().map(ShockRow::from).collect();
    out.rows(&rows)
}
