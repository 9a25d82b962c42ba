//! Scenario grid generation.
//!
//! Enumerates the Cartesian product of price shocks, borrow multipliers and
//! volatility regimes. For every triple:
//!
//! ```text
//! effective_drop = min(price_shock × vol_mult, max_drop_cap)
//! borrowed       = base_borrowed × borrow_mult
//! ltv            = borrowed / (collateral_amount × price × (1 − effective_drop))
//! ```
//!
//! The cap keeps the shocked price strictly positive, so a validated
//! position never leaves the LTV domain inside the grid.

use serde::{Deserialize, Serialize};
use tracing::debug;

use solvency_core::ltv::{evaluate_ltv, is_liquidated};
use solvency_core::math::{round_dp, to_pct};
use solvency_core::{Position, ProtocolRule, SolvencyResult};

use crate::config::{ExecutionConfig, ScenarioAxes, VolatilityRegime};
use crate::parallel::maybe_parallel_map;

/// One evaluated point of the stress grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioRecord {
    /// Raw price shock as a percentage (1 dp).
    pub price_shock_pct: f64,
    /// Multiplier applied to the borrowed amount.
    pub borrow_multiplier: f64,
    /// Volatility regime name.
    pub volatility_regime: String,
    /// Volatility regime multiplier.
    pub volatility_multiplier: f64,
    /// Capped, regime-scaled drop as a percentage (1 dp).
    pub effective_drop_pct: f64,
    /// Resulting LTV as a percentage (2 dp).
    pub ltv_pct: f64,
    /// Whether the unrounded LTV exceeds the liquidation threshold.
    pub liquidated: bool,
}

/// Applies a volatility multiplier to a shock and caps the result.
#[inline]
#[must_use]
pub fn effective_drop(price_shock: f64, vol_multiplier: f64, cap: f64) -> f64 {
    (price_shock * vol_multiplier).min(cap)
}

/// Generates the full scenario grid for a position and rule.
///
/// Output size is `|price_shocks| × |borrow_multipliers| × |regimes|`, in
/// price-shock-outer, borrow-middle, regime-inner order. Evaluation may run
/// in parallel (see [`ExecutionConfig`]); ordering is unaffected.
///
/// # Errors
///
/// Propagates the first [`solvency_core::SolvencyError`] raised by any
/// scenario; no partial grid is returned.
pub fn generate_grid(
    position: &Position,
    rule: &ProtocolRule,
    axes: &ScenarioAxes,
    exec: &ExecutionConfig,
) -> SolvencyResult<Vec<ScenarioRecord>> {
    let points = enumerate_points(axes);

    let records = maybe_parallel_map(&points, exec, |point| {
        evaluate_point(position, rule, axes.max_drop_cap, point)
    })
    .into_iter()
    .collect::<SolvencyResult<Vec<_>>>()?;

    let capped = points
        .iter()
        .filter(|p| p.price_shock * p.regime.multiplier > axes.max_drop_cap)
        .count();
    debug!(
        scenarios = records.len(),
        capped,
        liquidated = records.iter().filter(|r| r.liquidated).count(),
        threshold = rule.liquidation_threshold(),
        "generated scenario grid"
    );

    Ok(records)
}

/// One unevaluated grid coordinate.
struct GridPoint<'a> {
    price_shock: f64,
    borrow_multiplier: f64,
    regime: &'a VolatilityRegime,
}

fn enumerate_points(axes: &ScenarioAxes) -> Vec<GridPoint<'_>> {
    let mut points = Vec::with_capacity(axes.scenario_count());
    for &price_shock in &axes.price_shocks {
        for &borrow_multiplier in &axes.borrow_multipliers {
            for regime in &axes.volatility_regimes {
                points.push(GridPoint {
                    price_shock,
                    borrow_multiplier,
                    regime,
                });
            }
        }
    }
    points
}

fn evaluate_point(
    position: &Position,
    rule: &ProtocolRule,
    cap: f64,
    point: &GridPoint<'_>,
) -> SolvencyResult<ScenarioRecord> {
    let borrowed = position.borrowed_amount() * point.borrow_multiplier;
    let drop = effective_drop(point.price_shock, point.regime.multiplier, cap);

    let new_price = position.collateral_price() * (1.0 - drop);
    let ltv = evaluate_ltv(position.collateral_amount(), new_price, borrowed)?;

    Ok(ScenarioRecord {
        price_shock_pct: round_dp(to_pct(point.price_shock), 1),
        borrow_multiplier: point.borrow_multiplier,
        volatility_regime: point.regime.name.clone(),
        volatility_multiplier: point.regime.multiplier,
        effective_drop_pct: round_dp(to_pct(drop), 1),
        ltv_pct: round_dp(to_pct(ltv), 2),
        liquidated: is_liquidated(ltv, rule.liquidation_threshold()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn reference() -> (Position, ProtocolRule) {
        (
            Position::new(1.0, 30_000.0, 21_000.0).unwrap(),
            ProtocolRule::new(0.80).unwrap(),
        )
    }

    #[test]
    fn test_effective_drop_cap() {
        assert_relative_eq!(effective_drop(0.5, 2.0, 0.95), 0.95);
        assert_relative_eq!(effective_drop(0.2, 1.5, 0.95), 0.3, epsilon = 1e-12);
    }

    #[test]
    fn test_reference_grid_size_and_order() {
        let (position, rule) = reference();
        let grid = generate_grid(
            &position,
            &rule,
            &ScenarioAxes::reference(),
            &ExecutionConfig::sequential(),
        )
        .unwrap();

        assert_eq!(grid.len(), 60);

        // regime is the fastest-moving axis, price shock the slowest
        assert_eq!(grid[0].volatility_regime, "calm");
        assert_eq!(grid[1].volatility_regime, "normal");
        assert_eq!(grid[3].volatility_regime, "crisis");
        assert_relative_eq!(grid[0].borrow_multiplier, 0.8);
        assert_relative_eq!(grid[4].borrow_multiplier, 1.0);
        assert_relative_eq!(grid[11].price_shock_pct, 10.0);
        assert_relative_eq!(grid[12].price_shock_pct, 20.0);
        assert_relative_eq!(grid[59].price_shock_pct, 50.0);
    }

    #[test]
    fn test_crisis_cap_applied() {
        let (position, rule) = reference();
        let grid = generate_grid(
            &position,
            &rule,
            &ScenarioAxes::reference(),
            &ExecutionConfig::sequential(),
        )
        .unwrap();

        let last = grid.last().unwrap();
        assert_eq!(last.volatility_regime, "crisis");
        assert_relative_eq!(last.price_shock_pct, 50.0);
        assert_relative_eq!(last.effective_drop_pct, 95.0);
        // 25_200 / (30_000 × 0.05)
        assert_relative_eq!(last.ltv_pct, 1680.0);
        assert!(last.liquidated);
    }

    #[test]
    fn test_normal_regime_matches_simple_drop() {
        let (position, rule) = reference();
        let axes = ScenarioAxes::empty()
            .with_price_shocks(vec![0.1])
            .with_borrow_multipliers(vec![1.0])
            .with_regime("normal", 1.0);

        let grid = generate_grid(&position, &rule, &axes, &ExecutionConfig::sequential()).unwrap();
        assert_eq!(grid.len(), 1);
        assert_relative_eq!(grid[0].effective_drop_pct, 10.0);
        assert_relative_eq!(grid[0].ltv_pct, 77.78);
        assert!(!grid[0].liquidated);
    }

    #[test]
    fn test_empty_axis_yields_empty_grid() {
        let (position, rule) = reference();
        let axes = ScenarioAxes::reference().with_borrow_multipliers(vec![]);
        let grid = generate_grid(&position, &rule, &axes, &ExecutionConfig::default()).unwrap();
        assert!(grid.is_empty());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let (position, rule) = reference();
        let axes = ScenarioAxes::reference()
            .with_price_shocks((1..=40).map(|i| f64::from(i) / 50.0).collect());

        let sequential =
            generate_grid(&position, &rule, &axes, &ExecutionConfig::sequential()).unwrap();
        let parallel = generate_grid(
            &position,
            &rule,
            &axes,
            &ExecutionConfig::default().with_threshold(0),
        )
        .unwrap();

        assert_eq!(sequential.len(), 480);
        assert_eq!(sequential, parallel);
    }
}
