//! Zone pivots: a tabular heatmap of the risk surface.
//!
//! One pivot per volatility regime, with price shocks as rows and borrow
//! multipliers as columns. Axis values keep their first-appearance order,
//! which for a generated grid is the declared axis order.

use serde::{Deserialize, Serialize};

use solvency_risk::{ClassifiedScenario, RiskSurface, RiskZone};

/// Zones of one volatility regime laid out by shock and multiplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZonePivot {
    /// Regime name.
    pub volatility_regime: String,
    /// Row labels (price shock, percent).
    pub price_shocks: Vec<f64>,
    /// Column labels (borrow multiplier).
    pub borrow_multipliers: Vec<f64>,
    /// `cells[row][col]`; `None` where the surface has no such scenario.
    pub cells: Vec<Vec<Option<RiskZone>>>,
}

impl ZonePivot {
    /// Zone at a row and column, if present.
    #[must_use]
    pub fn zone(&self, row: usize, col: usize) -> Option<RiskZone> {
        self.cells.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    /// Number of cells in `zone`.
    #[must_use]
    pub fn count(&self, zone: RiskZone) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| **cell == Some(zone))
            .count()
    }
}

/// Pivots a risk surface into one table per volatility regime.
#[must_use]
pub fn zone_pivot(surface: &RiskSurface) -> Vec<ZonePivot> {
    let mut regimes: Vec<&str> = Vec::new();
    for s in &surface.enriched_matrix {
        let name = s.scenario.volatility_regime.as_str();
        if !regimes.contains(&name) {
            regimes.push(name);
        }
    }

    regimes
        .into_iter()
        .map(|regime| {
            let rows: Vec<&ClassifiedScenario> = surface
                .enriched_matrix
                .iter()
                .filter(|s| s.scenario.volatility_regime == regime)
                .collect();
            pivot_regime(regime, &rows)
        })
        .collect()
}

fn pivot_regime(regime: &str, scenarios: &[&ClassifiedScenario]) -> ZonePivot {
    let mut price_shocks = Vec::new();
    let mut borrow_multipliers = Vec::new();
    for s in scenarios {
        push_unique(&mut price_shocks, s.scenario.price_shock_pct);
        push_unique(&mut borrow_multipliers, s.scenario.borrow_multiplier);
    }

    let mut cells = vec![vec![None; borrow_multipliers.len()]; price_shocks.len()];
    for s in scenarios {
        let row = price_shocks.iter().position(|&v| v == s.scenario.price_shock_pct);
        let col = borrow_multipliers
            .iter()
            .position(|&v| v == s.scenario.borrow_multiplier);
        if let (Some(row), Some(col)) = (row, col) {
            cells[row][col] = Some(s.risk_zone);
        }
    }

    ZonePivot {
        volatility_regime: regime.to_string(),
        price_shocks,
        borrow_multipliers,
        cells,
    }
}

fn push_unique(values: &mut Vec<f64>, value: f64) {
    if !values.contains(&value) {
        values.push(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solvency_core::{Position, ProtocolRule};
    use solvency_risk::aggregate;
    use solvency_stress::{generate_grid, ExecutionConfig, ScenarioAxes};

    fn reference_surface() -> RiskSurface {
        let position = Position::new(1.0, 30_000.0, 21_000.0).unwrap();
        let rule = ProtocolRule::new(0.80).unwrap();
        let grid = generate_grid(
            &position,
            &rule,
            &ScenarioAxes::reference(),
            &ExecutionConfig::sequential(),
        )
        .unwrap();
        aggregate(grid, 0.80).unwrap()
    }

    #[test]
    fn test_reference_pivots() {
        let surface = reference_surface();
        let pivots = zone_pivot(&surface);

        let names: Vec<_> = pivots.iter().map(|p| p.volatility_regime.as_str()).collect();
        assert_eq!(names, ["calm", "normal", "turbulent", "crisis"]);

        let normal = &pivots[1];
        assert_eq!(normal.price_shocks, vec![10.0, 20.0, 30.0, 40.0, 50.0]);
        assert_eq!(normal.borrow_multipliers, vec![0.8, 1.0, 1.2]);

        // 10% shock, base borrow: 77.78%
        assert_eq!(normal.zone(0, 1), Some(RiskZone::Warning));
        // 50% shock, 1.2x borrow
        assert_eq!(normal.zone(4, 2), Some(RiskZone::Liquidated));
        assert_eq!(normal.zone(9, 9), None);

        let total: usize = pivots
            .iter()
            .map(|p| RiskZone::ALL.iter().map(|&z| p.count(z)).sum::<usize>())
            .sum();
        assert_eq!(total, 60);
    }

    #[test]
    fn test_crisis_fully_liquidated_at_high_shocks() {
        let pivots = zone_pivot(&reference_surface());
        let crisis = &pivots[3];
        for col in 0..3 {
            assert_eq!(crisis.zone(4, col), Some(RiskZone::Liquidated));
        }
    }
}
