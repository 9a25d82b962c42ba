//! Full report assembly and persistence.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use solvency_config::StrategyFile;
use solvency_core::{PriceDropOutcome, Position, ProtocolRule, SolvencyError};
use solvency_risk::{aggregate, RiskSurface, ScoreInputs};
use solvency_stress::{
    generate_grid, leverage_sensitivity, regime_matrix, run_price_shocks,
    volatility_regime_stress, ExecutionConfig, LeverageOutcome, MacroRegimeOutcome,
    ScenarioRecord, StressConfig, VolatilityOutcome,
};

use crate::base::{base_report, BaseReport};
use crate::error::{ReportError, ReportResult};

/// Every analysis for one position, in run order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReport {
    /// When the report was assembled.
    pub generated_at: DateTime<Utc>,
    /// Version of the engine that produced it.
    pub version: String,
    /// Base report.
    pub base: BaseReport,
    /// Price shock runs.
    pub price_shocks: Vec<PriceDropOutcome>,
    /// Leverage sensitivity.
    pub leverage_sensitivity: Vec<LeverageOutcome>,
    /// Macro regime matrix.
    pub regimes: Vec<MacroRegimeOutcome>,
    /// Volatility regime stress.
    pub volatility_regimes: Vec<VolatilityOutcome>,
    /// Raw scenario grid.
    pub scenario_matrix: Vec<ScenarioRecord>,
    /// Classified grid and zone distribution.
    pub risk_surface: RiskSurface,
    /// Score in `[0, 100]`.
    pub risk_score: f64,
    /// Inputs behind `risk_score`.
    pub score_inputs: ScoreInputs,
}

impl RiskReport {
    /// Writes the report as pretty-printed JSON, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Io`] or [`ReportError::Serialization`].
    pub fn write_json(&self, path: impl AsRef<Path>) -> ReportResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ReportError::io(parent, e))?;
        }

        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|e| ReportError::io(path, e))?;

        info!(path = %path.display(), "wrote risk report");
        Ok(())
    }

    /// Reads a report previously written with [`RiskReport::write_json`].
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Io`] or [`ReportError::Serialization`].
    pub fn read_json(path: impl AsRef<Path>) -> ReportResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ReportError::io(path, e))?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Assembles the full report for a strategy document.
///
/// # Errors
///
/// Returns [`ReportError::Config`] if the position or rule cannot be built,
/// and [`ReportError::Solvency`] if any analysis fails.
pub fn assemble_report(strategy: &StrategyFile) -> ReportResult<RiskReport> {
    let position = strategy.position()?;
    let rule = strategy.protocol_rule()?;

    assemble_report_with(
        &position,
        &rule,
        strategy.stress_config(),
        strategy.liquidation_margin_pct(),
        &strategy.execution(),
    )
}

/// Assembles the full report from explicit inputs.
///
/// # Errors
///
/// Returns [`SolvencyError::EmptyScenarioSet`] (wrapped) if the price shock
/// or leverage list is empty, [`SolvencyError::InvalidInput`] for an invalid
/// stress programme, and any evaluator error otherwise.
pub fn assemble_report_with(
    position: &Position,
    rule: &ProtocolRule,
    stress: &StressConfig,
    liquidation_margin_pct: f64,
    exec: &ExecutionConfig,
) -> ReportResult<RiskReport> {
    if stress.axes.price_shocks.is_empty() {
        return Err(SolvencyError::empty_scenarios("price shocks").into());
    }
    if stress.leverage_levels.is_empty() {
        return Err(SolvencyError::empty_scenarios("leverage sensitivity").into());
    }
    stress.validate()?;

    let base = base_report(position, rule, &stress.base_report_drops)?;
    let price_shocks = run_price_shocks(position, rule, &stress.axes.price_shocks)?;
    let leverage = leverage_sensitivity(position, rule, &stress.leverage_levels)?;
    let regimes = regime_matrix(position, rule, &stress.macro_regimes)?;
    let volatility_regimes = volatility_regime_stress(
        position,
        rule,
        &stress.axes.volatility_regimes,
        stress.volatility_base_drop,
        stress.axes.max_drop_cap,
    )?;
    let scenario_matrix = generate_grid(position, rule, &stress.axes, exec)?;
    let risk_surface = aggregate(scenario_matrix.clone(), rule.liquidation_threshold())?;

    let score = ScoreInputs::from_runs(liquidation_margin_pct, &price_shocks, &leverage)?.score();
    if score.score <= 0.0 {
        warn!(inputs = ?score.inputs, "risk score floored at zero");
    }

    info!(
        risk_level = %base.risk_level,
        risk_score = score.score,
        scenarios = risk_surface.summary.total_scenarios,
        "assembled risk report"
    );

    Ok(RiskReport {
        generated_at: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        base,
        price_shocks,
        leverage_sensitivity: leverage,
        regimes,
        volatility_regimes,
        scenario_matrix,
        risk_surface,
        risk_score: score.score,
        score_inputs: score.inputs,
    })
}
