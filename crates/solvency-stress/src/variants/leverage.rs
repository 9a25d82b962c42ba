//! Leverage sensitivity.
//!
//! Holds collateral value fixed at the current price and varies only the
//! borrowed amount.

use serde::{Deserialize, Serialize};
use tracing::debug;

use solvency_core::ltv::is_liquidated;
use solvency_core::math::{round_dp, to_pct};
use solvency_core::{Position, ProtocolRule, SolvencyResult};

use crate::config::LeverageLevels;

/// LTV and remaining buffer at one borrowed level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeverageOutcome {
    /// Borrowed amount tested (2 dp).
    pub borrowed: f64,
    /// LTV at the current price as a percentage (2 dp).
    pub ltv_pct: f64,
    /// Threshold minus LTV, in percentage points (2 dp). Negative once
    /// past the threshold.
    pub safety_buffer_pct: f64,
    /// Whether the unrounded LTV exceeds the threshold.
    pub liquidated: bool,
}

/// Evaluates LTV and safety buffer at each leverage level.
///
/// # Errors
///
/// Returns [`solvency_core::SolvencyError::InvalidInput`] if a level
/// resolves to a negative borrowed amount.
pub fn leverage_sensitivity(
    position: &Position,
    rule: &ProtocolRule,
    levels: &LeverageLevels,
) -> SolvencyResult<Vec<LeverageOutcome>> {
    let threshold = rule.liquidation_threshold();

    let results = levels
        .borrowed_amounts(position.borrowed_amount())
        .into_iter()
        .map(|borrowed| {
            let variant = position.with_borrowed(borrowed)?;
            let ltv = variant.current_ltv()?;
            Ok(LeverageOutcome {
                borrowed: round_dp(borrowed, 2),
                ltv_pct: round_dp(to_pct(ltv), 2),
                safety_buffer_pct: round_dp(to_pct(threshold - ltv), 2),
                liquidated: is_liquidated(ltv, threshold),
            })
        })
        .collect::<SolvencyResult<Vec<_>>>()?;

    debug!(levels = results.len(), "ran leverage sensitivity");
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_reference_levels() {
        // collateral value 15_000
        let position = Position::new(5.0, 3_000.0, 9_000.0).unwrap();
        let rule = ProtocolRule::new(0.70).unwrap();

        let results =
            leverage_sensitivity(&position, &rule, &LeverageLevels::default()).unwrap();
        assert_eq!(results.len(), 5);

        assert_relative_eq!(results[0].borrowed, 7_000.0);
        assert_relative_eq!(results[0].ltv_pct, 46.67);
        assert_relative_eq!(results[0].safety_buffer_pct, 23.33);
        assert!(!results[0].liquidated);

        // 11_000 / 15_000 = 73.33%
        assert_relative_eq!(results[4].ltv_pct, 73.33);
        assert_relative_eq!(results[4].safety_buffer_pct, -3.33);
        assert!(results[4].liquidated);
    }

    #[test]
    fn test_relative_levels() {
        let position = Position::new(1.0, 30_000.0, 21_000.0).unwrap();
        let rule = ProtocolRule::new(0.80).unwrap();

        let results = leverage_sensitivity(
            &position,
            &rule,
            &LeverageLevels::Relative(vec![0.7, 0.8, 1.0, 1.1]),
        )
        .unwrap();

        assert_relative_eq!(results[0].borrowed, 14_700.0);
        assert_relative_eq!(results[0].ltv_pct, 49.0);
        assert_relative_eq!(results[2].safety_buffer_pct, 10.0);
        assert_relative_eq!(results[3].ltv_pct, 77.0);
    }

    #[test]
    fn test_negative_level_rejected() {
        let position = Position::new(1.0, 100.0, 10.0).unwrap();
        let rule = ProtocolRule::new(0.80).unwrap();
        let err = leverage_sensitivity(&position, &rule, &LeverageLevels::Absolute(vec![-1.0]))
            .unwrap_err();
        assert_eq!(err.field(), Some("borrowed_amount"));
    }
}
