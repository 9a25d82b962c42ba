//! Surface command implementation.
//!
//! Prints the classified scenario grid and its zone distribution.

use anyhow::Result;
use serde::Serialize;
use tabled::Tabled;

use solvency_risk::{aggregate, ClassifiedScenario, RiskZone};
use solvency_stress::generate_grid;

use crate::cli::OutputFormat;
use crate::commands::{load_strategy, model_inputs, StrategyArgs};
use crate::output::{format_pct, print_json, zone_label, Output};

/// One classified scenario, flattened for tables and CSV.
#[derive(Debug, Serialize, Tabled)]
struct ScenarioRow {
    #[tabled(rename = "Shock")]
    price_shock_pct: f64,
    #[tabled(rename = "Borrow x")]
    borrow_multiplier: f64,
    #[tabled(rename = "Regime")]
    volatility_regime: String,
    #[tabled(rename = "Effective Drop")]
    effective_drop_pct: f64,
    #[tabled(rename = "LTV %")]
    ltv_pct: f64,
    #[tabled(rename = "Liquidated")]
    liquidated: bool,
    #[tabled(rename = "Zone")]
    risk_zone: String,
}

impl ScenarioRow {
    fn new(s: &ClassifiedScenario, coloured: bool) -> Self {
        let r = &s.scenario;
        Self {
            price_shock_pct: r.price_shock_pct,
            borrow_multiplier: r.borrow_multiplier,
            volatility_regime: r.volatility_regime.clone(),
            effective_drop_pct: r.effective_drop_pct,
            ltv_pct: r.ltv_pct,
            liquidated: r.liquidated,
            risk_zone: if coloured {
                zone_label(s.risk_zone)
            } else {
                s.risk_zone.label().to_string()
            },
        }
    }
}

/// Zone share of the grid.
#[derive(Debug, Serialize, Tabled)]
struct ZoneRow {
    #[tabled(rename = "Zone")]
    zone: String,
    #[tabled(rename = "Count")]
    count: usize,
    #[tabled(rename = "Share")]
    pct: String,
}

/// Execute the surface command.
pub fn execute(args: StrategyArgs, out: &Output) -> Result<()> {
    let strategy = load_strategy(&args.strategy)?;
    let (position, rule) = model_inputs(&strategy)?;

    let grid = generate_grid(
        &position,
        &rule,
        &strategy.stress_config().axes,
        &strategy.execution(),
    )?;
    let surface = aggregate(grid, rule.liquidation_threshold())?;
    let summary = &surface.summary;

    match out.format {
        OutputFormat::Json => print_json(&surface),
        OutputFormat::Minimal => {
            println!(
                "SAFE {:.2} WARNING {:.2} LIQUIDATED {:.2}",
                summary.pct(RiskZone::Safe),
                summary.pct(RiskZone::Warning),
                summary.pct(RiskZone::Liquidated)
            );
            Ok(())
        }
        OutputFormat::Csv => {
            let rows: Vec<ScenarioRow> = surface
                .enriched_matrix
                .iter()
                .map(|s| ScenarioRow::new(s, false))
                .collect();
            out.rows(&rows)
        }
        OutputFormat::Table => {
            out.header("Risk Surface");
            let rows: Vec<ScenarioRow> = surface
                .enriched_matrix
                .iter()
                .map(|s| ScenarioRow::new(s, true))
                .collect();
            out.rows(&rows)?;

            out.header(&format!(
                "Zone Distribution ({} scenarios)",
                summary.total_scenarios
            ));
            let zones: Vec<ZoneRow> = RiskZone::ALL
                .iter()
                .map(|&zone| ZoneRow {
                    zone: zone_label(zone),
                    count: summary.count(zone),
                    pct: format_pct(summary.pct(zone)),
                })
                .collect();
            out.rows(&zones)
        }
    }
}
