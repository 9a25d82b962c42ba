//! Base risk report: current LTV and the first liquidating price drop.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use solvency_core::math::round_dp;
use solvency_core::{PriceDropOutcome, Position, ProtocolRule, SolvencyResult};
use solvency_stress::{first_liquidation, run_price_shocks};

/// First liquidating drop (in percent) at or above which risk is `MEDIUM`.
pub const MEDIUM_RISK_DROP_PCT: f64 = 30.0;

/// Coarse risk level from the first liquidating drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    /// No tested drop liquidates.
    Low,
    /// Liquidation needs a drop of at least 30%.
    Medium,
    /// Liquidation under a drop below 30%.
    High,
}

impl RiskLevel {
    /// Level implied by the first liquidating drop, if any.
    #[must_use]
    pub fn from_liquidation_drop(drop_pct: Option<f64>) -> Self {
        match drop_pct {
            None => Self::Low,
            Some(pct) if pct >= MEDIUM_RISK_DROP_PCT => Self::Medium,
            Some(_) => Self::High,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        })
    }
}

/// Snapshot of the position before and under a few price drops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseReport {
    /// Protocol name, if the rule carries one.
    pub protocol: Option<String>,
    /// LTV at the current price (2 dp).
    pub current_ltv_pct: f64,
    /// Liquidation threshold as a percentage.
    pub liquidation_threshold_pct: f64,
    /// Drop at which liquidation first occurs.
    pub liquidation_price_drop_pct: Option<f64>,
    /// Coarse risk level.
    pub risk_level: RiskLevel,
    /// One outcome per probed drop, in order.
    pub stress_test_results: Vec<PriceDropOutcome>,
}

/// Builds the base report over `drops`.
///
/// # Errors
///
/// Propagates [`solvency_core::SolvencyError::DivisionDomain`] from a drop
/// of 100% or more.
pub fn base_report(
    position: &Position,
    rule: &ProtocolRule,
    drops: &[f64],
) -> SolvencyResult<BaseReport> {
    let current_ltv = position.current_ltv()?;
    let results = run_price_shocks(position, rule, drops)?;
    let liquidation_price_drop_pct = first_liquidation(&results).map(|r| r.price_drop_pct);
    let risk_level = RiskLevel::from_liquidation_drop(liquidation_price_drop_pct);

    debug!(%risk_level, ?liquidation_price_drop_pct, "built base report");

    Ok(BaseReport {
        protocol: rule.name().map(str::to_string),
        current_ltv_pct: round_dp(current_ltv * 100.0, 2),
        liquidation_threshold_pct: rule.threshold_pct(),
        liquidation_price_drop_pct,
        risk_level,
        stress_test_results: results,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const DROPS: [f64; 4] = [0.10, 0.20, 0.30, 0.40];

    #[test]
    fn test_reference_position_is_high_risk() {
        let position = Position::new(1.0, 30_000.0, 21_000.0).unwrap();
        let rule = ProtocolRule::new(0.80).unwrap().named("aave_v3");

        let report = base_report(&position, &rule, &DROPS).unwrap();
        assert_eq!(report.protocol.as_deref(), Some("aave_v3"));
        assert_relative_eq!(report.current_ltv_pct, 70.0);
        assert_relative_eq!(report.liquidation_threshold_pct, 80.0);
        assert_eq!(report.liquidation_price_drop_pct, Some(20.0));
        assert_eq!(report.risk_level, RiskLevel::High);
        assert_eq!(report.stress_test_results.len(), 4);
    }

    #[test]
    fn test_risk_levels() {
        let rule = ProtocolRule::new(0.80).unwrap();

        // 50% LTV: 30% drop gives 71.43, 40% gives 83.33
        let medium = Position::new(1.0, 30_000.0, 15_000.0).unwrap();
        let report = base_report(&medium, &rule, &DROPS).unwrap();
        assert_eq!(report.liquidation_price_drop_pct, Some(40.0));
        assert_eq!(report.risk_level, RiskLevel::Medium);

        let low = Position::new(1.0, 30_000.0, 3_000.0).unwrap();
        let report = base_report(&low, &rule, &DROPS).unwrap();
        assert_eq!(report.liquidation_price_drop_pct, None);
        assert_eq!(report.risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_level_cutoff() {
        assert_eq!(RiskLevel::from_liquidation_drop(Some(30.0)), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_liquidation_drop(Some(29.9)), RiskLevel::High);
        assert_eq!(serde_json::to_string(&RiskLevel::Low).unwrap(), "\"LOW\"");
    }
}
