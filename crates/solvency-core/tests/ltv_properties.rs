//! Property-based tests for the LTV evaluator.
//!
//! These tests verify properties that must hold for every valid position:
//! - LTV rises with borrowed amount
//! - LTV falls as collateral price rises
//! - Liquidation flips exactly above the threshold

use proptest::prelude::*;
use solvency_core::prelude::*;

proptest! {
    #[test]
    fn property_ltv_increases_with_borrowed(
        amount in 0.01f64..1_000.0,
        price in 1.0f64..100_000.0,
        borrowed in 0.0f64..1_000_000.0,
        extra in 0.01f64..100_000.0,
    ) {
        let low = evaluate_ltv(amount, price, borrowed).unwrap();
        let high = evaluate_ltv(amount, price, borrowed + extra).unwrap();
        prop_assert!(high > low);
    }

    #[test]
    fn property_ltv_decreases_with_price(
        amount in 0.01f64..1_000.0,
        price in 1.0f64..100_000.0,
        borrowed in 1.0f64..1_000_000.0,
        bump in 0.01f64..10_000.0,
    ) {
        let cheap = evaluate_ltv(amount, price, borrowed).unwrap();
        let dear = evaluate_ltv(amount, price + bump, borrowed).unwrap();
        prop_assert!(dear < cheap);
    }

    #[test]
    fn property_deeper_drop_never_improves_ltv(
        borrowed in 1.0f64..29_000.0,
        drop in 0.0f64..0.9,
        deeper in 0.001f64..0.09,
    ) {
        let shallow = simulate_price_drop(1.0, 30_000.0, borrowed, 0.8, drop).unwrap();
        let deep = simulate_price_drop(1.0, 30_000.0, borrowed, 0.8, drop + deeper).unwrap();
        prop_assert!(deep.ltv_pct >= shallow.ltv_pct);
        prop_assert!(deep.liquidated || !shallow.liquidated);
    }

    #[test]
    fn property_valid_positions_have_defined_ltv(
        amount in 0.0001f64..1_000.0,
        price in 0.0001f64..100_000.0,
        borrowed in 0.0f64..1_000_000.0,
    ) {
        let position = Position::new(amount, price, borrowed).unwrap();
        let ltv = position.current_ltv().unwrap();
        prop_assert!(ltv >= 0.0);
        prop_assert!(ltv.is_finite());
    }
}

#[test]
fn test_boundary_convention() {
    // ltv == threshold exactly: 40_000 / 50_000 == 0.8
    let position = Position::new(2.0, 25_000.0, 40_000.0).unwrap();
    let rule = ProtocolRule::new(0.8).unwrap();

    let outcome = simulate_position_drop(&position, &rule, 0.0).unwrap();
    assert_eq!(outcome.ltv_pct, 80.0);
    assert!(!outcome.liquidated);
}
