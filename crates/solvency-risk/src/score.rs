//! Scalar risk score.
//!
//! ```text
//! score = 100
//!       − max(0, 30 − liquidation_margin_pct)
//!       − (1 − stress_survival_ratio) × 40
//!       − leverage_sensitivity_pct × 0.3
//! ```
//!
//! clamped to `[0, 100]` and rounded to 2 dp. The weights are fixed; the
//! inputs come from separate analyses.

use serde::{Deserialize, Serialize};

use solvency_core::math::round_dp;
use solvency_core::{PriceDropOutcome, SolvencyError, SolvencyResult};
use solvency_stress::LeverageOutcome;

/// Margin at or above which no margin penalty applies.
pub const MARGIN_CEILING_PCT: f64 = 30.0;

/// Points lost when no stress scenario survives.
pub const SURVIVAL_WEIGHT: f64 = 40.0;

/// Points lost per percentage point of leverage sensitivity.
pub const LEVERAGE_WEIGHT: f64 = 0.3;

/// Margin assumed when none is configured.
pub const DEFAULT_LIQUIDATION_MARGIN_PCT: f64 = 30.0;

/// Computes the bounded risk score.
///
/// The result always lies in `[0, 100]`; a NaN input scores 0.
///
/// # Example
///
/// ```
/// use solvency_risk::compute_risk_score;
///
/// assert_eq!(compute_risk_score(30.0, 1.0, 0.0), 100.0);
/// assert_eq!(compute_risk_score(0.0, 0.0, 0.0), 30.0);
/// ```
#[must_use]
pub fn compute_risk_score(
    liquidation_margin_pct: f64,
    stress_survival_ratio: f64,
    leverage_sensitivity_pct: f64,
) -> f64 {
    // `max` would swallow a NaN margin
    if liquidation_margin_pct.is_nan() {
        return 0.0;
    }
    let score = 100.0
        - (MARGIN_CEILING_PCT - liquidation_margin_pct).max(0.0)
        - (1.0 - stress_survival_ratio) * SURVIVAL_WEIGHT
        - leverage_sensitivity_pct * LEVERAGE_WEIGHT;

    if score.is_nan() {
        return 0.0;
    }
    round_dp(score.clamp(0.0, 100.0), 2)
}

/// Fraction of price shock runs that did not liquidate.
///
/// # Errors
///
/// Returns [`SolvencyError::EmptyScenarioSet`] for an empty slice.
pub fn stress_survival_ratio(outcomes: &[PriceDropOutcome]) -> SolvencyResult<f64> {
    if outcomes.is_empty() {
        return Err(SolvencyError::empty_scenarios("stress survival ratio"));
    }
    let survived = outcomes.iter().filter(|o| !o.liquidated).count();
    Ok(survived as f64 / outcomes.len() as f64)
}

/// Absolute safety buffer of the highest leverage level tested.
///
/// # Errors
///
/// Returns [`SolvencyError::EmptyScenarioSet`] for an empty slice.
pub fn leverage_penalty(outcomes: &[LeverageOutcome]) -> SolvencyResult<f64> {
    outcomes
        .last()
        .map(|o| o.safety_buffer_pct.abs())
        .ok_or_else(|| SolvencyError::empty_scenarios("leverage sensitivity penalty"))
}

/// The three score inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreInputs {
    /// Assumed distance to liquidation, in percentage points.
    pub liquidation_margin_pct: f64,
    /// Share of price shocks survived, in `[0, 1]`.
    pub stress_survival_ratio: f64,
    /// Leverage sensitivity penalty, in percentage points.
    pub leverage_sensitivity_pct: f64,
}

impl ScoreInputs {
    /// Derives inputs from price shock and leverage runs.
    ///
    /// # Errors
    ///
    /// Returns [`SolvencyError::EmptyScenarioSet`] if either run is empty.
    pub fn from_runs(
        liquidation_margin_pct: f64,
        price_shocks: &[PriceDropOutcome],
        leverage: &[LeverageOutcome],
    ) -> SolvencyResult<Self> {
        Ok(Self {
            liquidation_margin_pct,
            stress_survival_ratio: stress_survival_ratio(price_shocks)?,
            leverage_sensitivity_pct: leverage_penalty(leverage)?,
        })
    }

    /// Scores these inputs.
    #[must_use]
    pub fn score(self) -> RiskScore {
        RiskScore {
            score: compute_risk_score(
                self.liquidation_margin_pct,
                self.stress_survival_ratio,
                self.leverage_sensitivity_pct,
            ),
            inputs: self,
        }
    }
}

/// A computed score with the inputs that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskScore {
    /// Score in `[0, 100]`, higher is safer.
    pub score: f64,
    /// Inputs used.
    pub inputs: ScoreInputs,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn shock(liquidated: bool) -> PriceDropOutcome {
        PriceDropOutcome {
            price_drop_pct: 10.0,
            new_price: 90.0,
            new_collateral_value: 90.0,
            ltv_pct: if liquidated { 90.0 } else { 50.0 },
            liquidated,
        }
    }

    #[test]
    fn test_score_bounds() {
        assert_relative_eq!(compute_risk_score(30.0, 1.0, 0.0), 100.0);
        assert_relative_eq!(compute_risk_score(0.0, 0.0, 0.0), 30.0);
        assert_relative_eq!(compute_risk_score(0.0, 0.0, 500.0), 0.0);
        assert_relative_eq!(compute_risk_score(80.0, 1.5, 0.0), 100.0);
    }

    #[test]
    fn test_non_finite_inputs_stay_in_range() {
        assert_eq!(compute_risk_score(f64::NAN, 1.0, 0.0), 0.0);
        assert_eq!(compute_risk_score(30.0, f64::NAN, 0.0), 0.0);
        assert_eq!(compute_risk_score(30.0, 1.0, f64::INFINITY), 0.0);
        assert_eq!(compute_risk_score(30.0, 1.0, f64::NAN), 0.0);
        assert_eq!(compute_risk_score(f64::INFINITY, 1.0, 0.0), 100.0);
        assert_eq!(compute_risk_score(f64::NEG_INFINITY, 1.0, f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn test_partial_penalties() {
        // 100 - 10 - 20 - 3
        assert_relative_eq!(compute_risk_score(20.0, 0.5, 10.0), 67.0);
        // 100 - 0 - 32 - 12.999
        assert_relative_eq!(compute_risk_score(30.0, 0.2, 43.33), 55.0);
    }

    #[test]
    fn test_survival_ratio() {
        let outcomes = [shock(false), shock(true), shock(true), shock(true), shock(true)];
        assert_relative_eq!(stress_survival_ratio(&outcomes).unwrap(), 0.2);
        assert!(stress_survival_ratio(&[]).is_err());
    }

    #[test]
    fn test_leverage_penalty_uses_last_level() {
        let levels = [
            LeverageOutcome {
                borrowed: 7_000.0,
                ltv_pct: 46.67,
                safety_buffer_pct: 23.33,
                liquidated: false,
            },
            LeverageOutcome {
                borrowed: 11_000.0,
                ltv_pct: 73.33,
                safety_buffer_pct: -3.33,
                liquidated: true,
            },
        ];
        assert_relative_eq!(leverage_penalty(&levels).unwrap(), 3.33);
        assert!(leverage_penalty(&[]).is_err());
    }

    #[test]
    fn test_inputs_from_runs() {
        let levels = [LeverageOutcome {
            borrowed: 11_000.0,
            ltv_pct: 36.67,
            safety_buffer_pct: 43.33,
            liquidated: false,
        }];
        let shocks = [shock(false), shock(true), shock(true), shock(true), shock(true)];

        let score = ScoreInputs::from_runs(30.0, &shocks, &levels).unwrap().score();
        assert_relative_eq!(score.score, 55.0);
        assert_relative_eq!(score.inputs.leverage_sensitivity_pct, 43.33);
    }
}
