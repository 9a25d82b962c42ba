//! Regime-based stress: macro drop assumptions and volatility multipliers.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use solvency_core::ltv::{evaluate_ltv, is_liquidated, simulate_position_drop};
use solvency_core::math::{round_dp, to_pct};
use solvency_core::{Position, ProtocolRule, SolvencyResult};

use crate::config::{MacroRegime, VolatilityRegime};
use crate::grid::effective_drop;

/// Outcome of one macro regime assumption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroRegimeOutcome {
    /// Regime name.
    pub regime: String,
    /// Assumed drop as a percentage.
    pub assumed_drop_pct: f64,
    /// LTV after the drop as a percentage (2 dp).
    pub ltv_pct: f64,
    /// Whether the unrounded LTV exceeds the threshold.
    pub liquidated: bool,
}

/// Outcome of one volatility regime applied to the base drop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolatilityOutcome {
    /// Regime name.
    pub regime: String,
    /// Regime multiplier.
    pub volatility_multiplier: f64,
    /// Capped effective drop as a percentage (2 dp).
    pub effective_price_drop_pct: f64,
    /// LTV after the drop as a percentage (2 dp).
    pub ltv_pct: f64,
    /// Whether the unrounded LTV exceeds the threshold.
    pub liquidated: bool,
}

/// Evaluates each macro regime's assumed drop.
pub fn regime_matrix(
    position: &Position,
    rule: &ProtocolRule,
    regimes: &[MacroRegime],
) -> SolvencyResult<Vec<MacroRegimeOutcome>> {
    regimes
        .iter()
        .map(|regime| {
            let new_price = position.collateral_price() * (1.0 - regime.drop);
            let ltv = evaluate_ltv(
                position.collateral_amount(),
                new_price,
                position.borrowed_amount(),
            )?;
            Ok(MacroRegimeOutcome {
                regime: regime.name.clone(),
                assumed_drop_pct: to_pct(regime.drop),
                ltv_pct: round_dp(to_pct(ltv), 2),
                liquidated: is_liquidated(ltv, rule.liquidation_threshold()),
            })
        })
        .collect()
}

/// Scales `base_drop` by each regime multiplier, caps it, and simulates it.
pub fn volatility_regime_stress(
    position: &Position,
    rule: &ProtocolRule,
    regimes: &[VolatilityRegime],
    base_drop: f64,
    cap: f64,
) -> SolvencyResult<Vec<VolatilityOutcome>> {
    let results = regimes
        .iter()
        .map(|regime| {
            let drop = effective_drop(base_drop, regime.multiplier, cap);
            let outcome = simulate_position_drop(position, rule, drop)?;
            Ok(VolatilityOutcome {
                regime: regime.name.clone(),
                volatility_multiplier: regime.multiplier,
                effective_price_drop_pct: round_dp(to_pct(drop), 2),
                ltv_pct: outcome.ltv_pct,
                liquidated: outcome.liquidated,
            })
        })
        .collect::<SolvencyResult<Vec<_>>>()?;

    if !results.is_empty() && results.iter().all(|r| r.liquidated) {
        warn!(
            base_drop,
            "position liquidates under every volatility regime"
        );
    }
    debug!(regimes = results.len(), "ran volatility regime stress");
    Ok(results)
}
