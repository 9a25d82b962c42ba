//! Heatmap command implementation.
//!
//! One zone grid per volatility regime: price shocks down, borrow
//! multipliers across.

use anyhow::Result;
use serde::Serialize;
use tabled::Tabled;

use solvency_report::{zone_pivot, ZonePivot};
use solvency_risk::aggregate;
use solvency_stress::generate_grid;

use crate::cli::OutputFormat;
use crate::commands::{load_strategy, model_inputs, StrategyArgs};
use crate::output::{print_grid, print_json, zone_label, Output};

/// One pivot cell in long form.
#[derive(Debug, Serialize, Tabled)]
struct CellRow {
    #[tabled(rename = "Regime")]
    volatility_regime: String,
    #[tabled(rename = "Shock")]
    price_shock_pct: f64,
    #[tabled(rename = "Borrow x")]
    borrow_multiplier: f64,
    #[tabled(rename = "Zone")]
    risk_zone: String,
}

fn cell_rows(pivot: &ZonePivot) -> Vec<CellRow> {
    let mut rows = Vec::new();
    for (r, &shock) in pivot.price_shocks.iter().enumerate() {
        for (c, &multiplier) in pivot.borrow_multipliers.iter().enumerate() {
            if let Some(zone) = pivot.zone(r, c) {
                rows.push(CellRow {
                    volatility_regime: pivot.volatility_regime.clone(),
                    price_shock_pct: shock,
                    borrow_multiplier: multiplier,
                    risk_zone: zone.label().to_string(),
                });
            }
        }
    }
    rows
}

/// Execute the heatmap command.
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
    let pivots = zone_pivot(&surface);

    match out.format {
        OutputFormat::Json => print_json(&pivots),
        OutputFormat::Csv | OutputFormat::Minimal => {
            let rows: Vec<CellRow> = pivots.iter().flat_map(cell_rows).collect();
            out.rows(&rows)
        }
        OutputFormat::Table => {
            for pivot in &pivots {
                out.header(&format!("Volatility regime: {}", pivot.volatility_regime));
                let columns: Vec<String> = pivot
                    .borrow_multipliers
                    .iter()
                    .map(|m| format!("{m}x"))
                    .collect();
                let rows = pivot
                    .price_shocks
                    .iter()
                    .enumerate()
                    .map(|(r, shock)| {
                        let cells = (0..columns.len())
                            .map(|c| pivot.zone(r, c).map_or_else(|| "-".to_string(), zone_label))
                            .collect();
                        (format!("{shock}%"), cells)
                    })
                    .collect();
                print_grid("shock \\ borrow", &columns, rows);
            }
            Ok(())
        }
    }
}
