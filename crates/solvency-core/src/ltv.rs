//! Loan-to-value evaluation.
//!
//! The evaluator is the single place that decides liquidation. Every
//! analysis in the workspace (price shocks, the scenario grid, leverage
//! sensitivity, regime stress) funnels through [`evaluate_ltv`] and
//! [`is_liquidated`] so the strict-inequality boundary stays consistent.
//!
//! # Example
//!
//! ```
//! use solvency_core::ltv::simulate_price_drop;
//!
//! let outcome = simulate_price_drop(1.0, 30_000.0, 21_000.0, 0.80, 0.10).unwrap();
//! assert_eq!(outcome.new_price, 27_000.0);
//! assert_eq!(outcome.ltv_pct, 77.78);
//! assert!(!outcome.liquidated);
//! ```

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{SolvencyError, SolvencyResult};
use crate::math::{round_dp, to_pct};
use crate::types::{Position, ProtocolRule};

/// Result of a single price-drop simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceDropOutcome {
    /// Applied drop as a percentage (10.0 for a 10% decline).
    pub price_drop_pct: f64,
    /// Collateral price after the drop (2 dp).
    pub new_price: f64,
    /// Collateral value after the drop (2 dp).
    pub new_collateral_value: f64,
    /// LTV after the drop as a percentage (2 dp).
    pub ltv_pct: f64,
    /// Whether the unrounded LTV exceeds the liquidation threshold.
    pub liquidated: bool,
}

/// Computes LTV as `borrowed / (collateral_amount × price)`.
///
/// # Errors
///
/// Returns [`SolvencyError::DivisionDomain`] when the collateral value is
/// not strictly positive. Validated positions cannot trigger this, but a
/// drop of 100% or more pushes the shocked price to zero or below.
pub fn evaluate_ltv(collateral_amount: f64, price: f64, borrowed: f64) -> SolvencyResult<f64> {
    let collateral_value = collateral_amount * price;
    // NaN fails this check as well
    if !(collateral_value > 0.0) {
        return Err(SolvencyError::division_domain(
            "LTV collateral value",
            collateral_value,
        ));
    }
    Ok(borrowed / collateral_value)
}

/// Liquidation rule: strictly greater than the threshold.
///
/// An LTV exactly equal to the threshold survives.
#[inline]
#[must_use]
pub fn is_liquidated(ltv: f64, liquidation_threshold: f64) -> bool {
    ltv > liquidation_threshold
}

/// Simulates a fractional collateral price decline.
///
/// `drop_pct` is a ratio (0.10 for 10%). It is not clamped: a drop of 1.0 or
/// more surfaces as a [`SolvencyError::DivisionDomain`] from the LTV step.
pub fn simulate_price_drop(
    collateral_amount: f64,
    price: f64,
    borrowed: f64,
    liquidation_threshold: f64,
    drop_pct: f64,
) -> SolvencyResult<PriceDropOutcome> {
    let new_price = price * (1.0 - drop_pct);
    let new_collateral_value = collateral_amount * new_price;
    let ltv = evaluate_ltv(collateral_amount, new_price, borrowed)?;
    let liquidated = is_liquidated(ltv, liquidation_threshold);

    trace!(drop_pct, ltv, liquidated, "simulated price drop");

    Ok(PriceDropOutcome {
        price_drop_pct: to_pct(drop_pct),
        new_price: round_dp(new_price, 2),
        new_collateral_value: round_dp(new_collateral_value, 2),
        ltv_pct: round_dp(to_pct(ltv), 2),
        liquidated,
    })
}

/// [`simulate_price_drop`] for a validated position and rule.
pub fn simulate_position_drop(
    position: &Position,
    rule: &ProtocolRule,
    drop_pct: f64,
) -> SolvencyResult<PriceDropOutcome> {
    simulate_price_drop(
        position.collateral_amount(),
        position.collateral_price(),
        position.borrowed_amount(),
        rule.liquidation_threshold(),
        drop_pct,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_evaluate_ltv() {
        assert_relative_eq!(evaluate_ltv(1.0, 30_000.0, 21_000.0).unwrap(), 0.7);
        assert_relative_eq!(evaluate_ltv(2.0, 1_500.0, 1_500.0).unwrap(), 0.5);
    }

    #[test]
    fn test_evaluate_ltv_domain() {
        assert!(matches!(
            evaluate_ltv(1.0, 0.0, 10.0),
            Err(SolvencyError::DivisionDomain { .. })
        ));
        assert!(matches!(
            evaluate_ltv(1.0, -5.0, 10.0),
            Err(SolvencyError::DivisionDomain { .. })
        ));
        assert!(evaluate_ltv(f64::NAN, 1.0, 10.0).is_err());
    }

    #[test]
    fn test_reference_drops() {
        let ten = simulate_price_drop(1.0, 30_000.0, 21_000.0, 0.80, 0.10).unwrap();
        assert_relative_eq!(ten.new_price, 27_000.0);
        assert_relative_eq!(ten.new_collateral_value, 27_000.0);
        assert_relative_eq!(ten.ltv_pct, 77.78);
        assert!(!ten.liquidated);

        let twenty = simulate_price_drop(1.0, 30_000.0, 21_000.0, 0.80, 0.20).unwrap();
        assert_relative_eq!(twenty.new_price, 24_000.0);
        assert_relative_eq!(twenty.ltv_pct, 87.5);
        assert!(twenty.liquidated);
    }

    #[test]
    fn test_threshold_equality_is_not_liquidated() {
        // 24_000 / 30_000 == 0.8 exactly
        let at_threshold = simulate_price_drop(1.0, 30_000.0, 24_000.0, 0.80, 0.0).unwrap();
        assert_relative_eq!(at_threshold.ltv_pct, 80.0);
        assert!(!at_threshold.liquidated);
        assert!(!is_liquidated(0.8, 0.8));
        assert!(is_liquidated(0.800_000_1, 0.8));
    }

    #[test]
    fn test_total_drop_fails() {
        for drop in [1.0, 1.25] {
            assert!(matches!(
                simulate_price_drop(1.0, 30_000.0, 21_000.0, 0.80, drop),
                Err(SolvencyError::DivisionDomain { .. })
            ));
        }
    }

    #[test]
    fn test_position_drop() {
        let position = Position::new(1.0, 30_000.0, 21_000.0).unwrap();
        let rule = ProtocolRule::new(0.8).unwrap();
        let outcome = simulate_position_drop(&position, &rule, 0.3).unwrap();
        assert_relative_eq!(outcome.price_drop_pct, 30.0);
        assert_relative_eq!(outcome.ltv_pct, 100.0);
        assert!(outcome.liquidated);
    }
}
