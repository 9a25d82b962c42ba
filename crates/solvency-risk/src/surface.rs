//! Risk surface aggregation.
//!
//! Classifies every grid scenario and summarises the zone distribution.
//! Enrichment produces new [`ClassifiedScenario`] values in input order; the
//! serialized shape is the original record with a `risk_zone` field added.

use serde::{Deserialize, Serialize};
use tracing::info;

use solvency_core::math::{round_dp, to_pct};
use solvency_core::{SolvencyError, SolvencyResult};
use solvency_stress::ScenarioRecord;

use crate::zone::{classify_zone, RiskZone};

// =============================================================================
// TYPES
// =============================================================================

/// A scenario record with its risk zone attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedScenario {
    /// The evaluated grid point.
    #[serde(flatten)]
    pub scenario: ScenarioRecord,
    /// Zone derived from the record's LTV.
    pub risk_zone: RiskZone,
}

/// Count and share of scenarios in one zone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneStats {
    /// Number of scenarios.
    pub count: usize,
    /// Share of all scenarios as a percentage (2 dp).
    pub pct: f64,
}

/// Per-zone statistics, keyed by upper-case zone label when serialized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneDistribution {
    /// Safe scenarios.
    #[serde(rename = "SAFE")]
    pub safe: ZoneStats,
    /// Warning scenarios.
    #[serde(rename = "WARNING")]
    pub warning: ZoneStats,
    /// Liquidated scenarios.
    #[serde(rename = "LIQUIDATED")]
    pub liquidated: ZoneStats,
}

impl ZoneDistribution {
    /// Statistics for one zone.
    #[must_use]
    pub fn get(&self, zone: RiskZone) -> &ZoneStats {
        match zone {
            RiskZone::Safe => &self.safe,
            RiskZone::Warning => &self.warning,
            RiskZone::Liquidated => &self.liquidated,
        }
    }

    fn get_mut(&mut self, zone: RiskZone) -> &mut ZoneStats {
        match zone {
            RiskZone::Safe => &mut self.safe,
            RiskZone::Warning => &mut self.warning,
            RiskZone::Liquidated => &mut self.liquidated,
        }
    }

    /// Zones with their statistics, safest first.
    pub fn iter(&self) -> impl Iterator<Item = (RiskZone, &ZoneStats)> + '_ {
        RiskZone::ALL.into_iter().map(move |zone| (zone, self.get(zone)))
    }

    /// Sum of the zone counts.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.iter().map(|(_, stats)| stats.count).sum()
    }

    /// Sum of the rounded zone percentages.
    #[must_use]
    pub fn total_pct(&self) -> f64 {
        self.iter().map(|(_, stats)| stats.pct).sum()
    }
}

/// Summary statistics of a risk surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSummary {
    /// Number of scenarios aggregated.
    pub total_scenarios: usize,
    /// Per-zone counts and percentages.
    pub zone_distribution: ZoneDistribution,
}

impl SurfaceSummary {
    /// Share of scenarios in `zone`, as a percentage.
    #[must_use]
    pub fn pct(&self, zone: RiskZone) -> f64 {
        self.zone_distribution.get(zone).pct
    }

    /// Number of scenarios in `zone`.
    #[must_use]
    pub fn count(&self, zone: RiskZone) -> usize {
        self.zone_distribution.get(zone).count
    }
}

/// Classified scenarios plus their summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskSurface {
    /// Scenarios in grid order, each with its zone.
    pub enriched_matrix: Vec<ClassifiedScenario>,
    /// Zone distribution over all scenarios.
    pub summary: SurfaceSummary,
}

// =============================================================================
// AGGREGATION
// =============================================================================

/// Classifies every scenario and computes the zone distribution.
///
/// `liquidation_threshold` is the fractional threshold (e.g. `0.80`); it is
/// converted to a percentage once. Percentages are rounded per zone and not
/// re-normalised, so their sum may differ from 100 by a few hundredths.
///
/// # Errors
///
/// Returns [`SolvencyError::EmptyScenarioSet`] if `scenarios` is empty.
pub fn aggregate(
    scenarios: Vec<ScenarioRecord>,
    liquidation_threshold: f64,
) -> SolvencyResult<RiskSurface> {
    if scenarios.is_empty() {
        return Err(SolvencyError::empty_scenarios("risk surface aggregation"));
    }

    let threshold_pct = zone_threshold_pct(liquidation_threshold);
    let enriched_matrix: Vec<ClassifiedScenario> = scenarios
        .into_iter()
        .map(|scenario| ClassifiedScenario {
            risk_zone: classify_zone(scenario.ltv_pct, threshold_pct),
            scenario,
        })
        .collect();

    let summary = build_summary(enriched_matrix.iter().map(|s| s.risk_zone));
    log_summary(&summary, threshold_pct);

    Ok(RiskSurface {
        enriched_matrix,
        summary,
    })
}

/// Computes only the zone distribution, without keeping enriched records.
///
/// # Errors
///
/// Returns [`SolvencyError::EmptyScenarioSet`] if `scenarios` is empty.
pub fn summarize(
    scenarios: &[ScenarioRecord],
    liquidation_threshold: f64,
) -> SolvencyResult<SurfaceSummary> {
    if scenarios.is_empty() {
        return Err(SolvencyError::empty_scenarios("risk surface summary"));
    }

    let threshold_pct = zone_threshold_pct(liquidation_threshold);
    let summary = build_summary(
        scenarios
            .iter()
            .map(|s| classify_zone(s.ltv_pct, threshold_pct)),
    );
    log_summary(&summary, threshold_pct);
    Ok(summary)
}

/// Same 2 dp grid as `ltv_pct`, so an LTV equal to the threshold has a zero
/// buffer.
fn zone_threshold_pct(liquidation_threshold: f64) -> f64 {
    round_dp(to_pct(liquidation_threshold), 2)
}

/// Callers guarantee at least one zone.
fn build_summary(zones: impl Iterator<Item = RiskZone>) -> SurfaceSummary {
    let mut distribution = ZoneDistribution::default();
    let mut total = 0usize;
    for zone in zones {
        distribution.get_mut(zone).count += 1;
        total += 1;
    }

    for zone in RiskZone::ALL {
        let stats = distribution.get_mut(zone);
        stats.pct = round_dp(stats.count as f64 / total as f64 * 100.0, 2);
    }

    SurfaceSummary {
        total_scenarios: total,
        zone_distribution: distribution,
    }
}

fn log_summary(summary: &SurfaceSummary, threshold_pct: f64) {
    info!(
        total = summary.total_scenarios,
        safe = summary.count(RiskZone::Safe),
        warning = summary.count(RiskZone::Warning),
        liquidated = summary.count(RiskZone::Liquidated),
        threshold_pct,
        "aggregated risk surface"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn record(ltv_pct: f64) -> ScenarioRecord {
        ScenarioRecord {
            price_shock_pct: 10.0,
            borrow_multiplier: 1.0,
            volatility_regime: "normal".into(),
            volatility_multiplier: 1.0,
            effective_drop_pct: 10.0,
            ltv_pct,
            liquidated: ltv_pct > 80.0,
        }
    }

    #[test]
    fn test_empty_rejected() {
        let err = aggregate(Vec::new(), 0.8).unwrap_err();
        assert!(matches!(err, SolvencyError::EmptyScenarioSet { .. }));
        assert!(summarize(&[], 0.8).is_err());
    }

    #[test]
    fn test_counts_and_order() {
        let records = vec![record(50.0), record(90.0), record(75.0), record(80.0)];
        let surface = aggregate(records.clone(), 0.8).unwrap();

        let zones: Vec<_> = surface.enriched_matrix.iter().map(|s| s.risk_zone).collect();
        assert_eq!(
            zones,
            [
                RiskZone::Safe,
                RiskZone::Liquidated,
                RiskZone::Warning,
                RiskZone::Warning
            ]
        );
        for (enriched, original) in surface.enriched_matrix.iter().zip(&records) {
            assert_eq!(&enriched.scenario, original);
        }

        let summary = surface.summary;
        assert_eq!(summary.total_scenarios, 4);
        assert_eq!(summary.count(RiskZone::Warning), 2);
        assert_relative_eq!(summary.pct(RiskZone::Warning), 50.0);
        assert_relative_eq!(summary.pct(RiskZone::Safe), 25.0);
        assert_eq!(summarize(&records, 0.8).unwrap(), summary);
    }

    #[test]
    fn test_rounding_slack() {
        let records = vec![record(50.0), record(75.0), record(90.0)];
        let summary = aggregate(records, 0.8).unwrap().summary;

        assert_relative_eq!(summary.pct(RiskZone::Safe), 33.33);
        assert_eq!(summary.zone_distribution.total_count(), 3);
        assert!((summary.zone_distribution.total_pct() - 100.0).abs() <= 0.03);
    }

    #[test]
    fn test_serialized_shape() {
        let surface = aggregate(vec![record(50.0)], 0.8).unwrap();
        let json = serde_json::to_value(&surface).unwrap();

        assert_eq!(json["summary"]["total_scenarios"], 1);
        assert_eq!(json["summary"]["zone_distribution"]["SAFE"]["count"], 1);
        assert_eq!(json["enriched_matrix"][0]["risk_zone"], "SAFE");
        assert_eq!(json["enriched_matrix"][0]["volatility_regime"], "normal");
    }
}
