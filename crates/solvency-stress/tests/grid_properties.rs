//! Property-based tests for the scenario grid.
//!
//! These tests verify invariants that should hold for any injected axes:
//! - Grid size equals the product of the axis lengths
//! - Iteration order follows axis declaration order
//! - Effective drops never exceed the cap

use proptest::prelude::*;

use solvency_core::{Position, ProtocolRule};
use solvency_stress::{generate_grid, ExecutionConfig, ScenarioAxes, VolatilityRegime};

fn axes_strategy() -> impl Strategy<Value = ScenarioAxes> {
    (
        prop::collection::vec(0.0f64..0.99, 1..8),
        prop::collection::vec(0.0f64..3.0, 1..5),
        prop::collection::vec(0.1f64..4.0, 1..5),
    )
        .prop_map(|(shocks, mults, vols)| {
            let regimes = vols
                .into_iter()
                .enumerate()
                .map(|(i, m)| VolatilityRegime::new(format!("r{i}"), m))
                .collect();
            ScenarioAxes::empty()
                .with_price_shocks(shocks)
                .with_borrow_multipliers(mults)
                .with_regimes(regimes)
        })
}

proptest! {
    #[test]
    fn property_grid_size_is_axis_product(axes in axes_strategy()) {
        let position = Position::new(2.0, 1_500.0, 2_000.0).unwrap();
        let rule = ProtocolRule::new(0.75).unwrap();

        let grid = generate_grid(&position, &rule, &axes, &ExecutionConfig::sequential()).unwrap();
        prop_assert_eq!(grid.len(), axes.scenario_count());
    }

    #[test]
    fn property_order_follows_declaration(axes in axes_strategy()) {
        let position = Position::new(2.0, 1_500.0, 2_000.0).unwrap();
        let rule = ProtocolRule::new(0.75).unwrap();
        let grid = generate_grid(&position, &rule, &axes, &ExecutionConfig::default()).unwrap();

        let n_mult = axes.borrow_multipliers.len();
        let n_regime = axes.volatility_regimes.len();

        for (idx, record) in grid.iter().enumerate() {
            let regime = &axes.volatility_regimes[idx % n_regime];
            let mult = axes.borrow_multipliers[(idx / n_regime) % n_mult];
            prop_assert_eq!(&record.volatility_regime, &regime.name);
            prop_assert_eq!(record.borrow_multiplier, mult);
        }
    }

    #[test]
    fn property_effective_drop_capped(axes in axes_strategy()) {
        let position = Position::new(1.0, 30_000.0, 21_000.0).unwrap();
        let rule = ProtocolRule::new(0.8).unwrap();
        let grid = generate_grid(&position, &rule, &axes, &ExecutionConfig::sequential()).unwrap();

        for record in &grid {
            prop_assert!(record.effective_drop_pct <= 95.0);
            prop_assert!(record.ltv_pct.is_finite());
        }
    }
}

#[test]
fn test_reference_grid_is_reproducible() {
    let position = Position::new(1.0, 30_000.0, 21_000.0).unwrap();
    let rule = ProtocolRule::new(0.80).unwrap();
    let axes = ScenarioAxes::reference();

    let first = generate_grid(&position, &rule, &axes, &ExecutionConfig::default()).unwrap();
    let second = generate_grid(&position, &rule, &axes, &ExecutionConfig::default()).unwrap();
    assert_eq!(first, second);

    let crisis_half: Vec<_> = first
        .iter()
        .filter(|r| r.volatility_regime == "crisis" && r.price_shock_pct == 50.0)
        .collect();
    assert_eq!(crisis_half.len(), 3);
    assert!(crisis_half.iter().all(|r| r.effective_drop_pct == 95.0));
}
