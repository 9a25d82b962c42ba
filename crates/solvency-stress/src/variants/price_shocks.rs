//! Direct price shock runs.

use tracing::debug;

use solvency_core::ltv::{simulate_position_drop, PriceDropOutcome};
use solvency_core::{Position, ProtocolRule, SolvencyResult};

/// Runs [`simulate_position_drop`] once per drop, in order.
///
/// # Example
///
/// ```
/// use solvency_core::{Position, ProtocolRule};
/// use solvency_stress::run_price_shocks;
///
/// let position = Position::new(1.0, 30_000.0, 21_000.0).unwrap();
/// let rule = ProtocolRule::new(0.80).unwrap();
///
/// let results = run_price_shocks(&position, &rule, &[0.1, 0.2]).unwrap();
/// assert!(!results[0].liquidated);
/// assert!(results[1].liquidated);
/// ```
pub fn run_price_shocks(
    position: &Position,
    rule: &ProtocolRule,
    drops: &[f64],
) -> SolvencyResult<Vec<PriceDropOutcome>> {
    let results = drops
        .iter()
        .map(|&drop| simulate_position_drop(position, rule, drop))
        .collect::<SolvencyResult<Vec<_>>>()?;

    debug!(
        shocks = results.len(),
        liquidated = results.iter().filter(|r| r.liquidated).count(),
        "ran price shocks"
    );
    Ok(results)
}

/// First outcome that liquidates, if any.
#[must_use]
pub fn first_liquidation(results: &[PriceDropOutcome]) -> Option<&PriceDropOutcome> {
    results.iter().find(|r| r.liquidated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use solvency_core::SolvencyError;

    #[test]
    fn test_reference_shocks() {
        let position = Position::new(1.0, 30_000.0, 21_000.0).unwrap();
        let rule = ProtocolRule::new(0.80).unwrap();

        let results =
            run_price_shocks(&position, &rule, &[0.10, 0.20, 0.30, 0.40, 0.50]).unwrap();
        assert_eq!(results.len(), 5);

        let first = first_liquidation(&results).unwrap();
        assert_relative_eq!(first.price_drop_pct, 20.0);
        assert_relative_eq!(results[4].ltv_pct, 140.0);
    }

    #[test]
    fn test_no_liquidation() {
        let position = Position::new(10.0, 3_000.0, 1_000.0).unwrap();
        let rule = ProtocolRule::new(0.80).unwrap();
        let results = run_price_shocks(&position, &rule, &[0.1, 0.5]).unwrap();
        assert!(first_liquidation(&results).is_none());
    }

    #[test]
    fn test_full_drop_aborts_run() {
        let position = Position::new(1.0, 30_000.0, 21_000.0).unwrap();
        let rule = ProtocolRule::new(0.80).unwrap();
        let err = run_price_shocks(&position, &rule, &[0.1, 1.0, 0.2]).unwrap_err();
        assert!(matches!(err, SolvencyError::DivisionDomain { .. }));
    }
}
