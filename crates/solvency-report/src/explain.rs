//! Plain-language explanation of a risk report.

use serde::{Deserialize, Serialize};

use solvency_core::PriceDropOutcome;
use solvency_risk::{RiskZone, SurfaceSummary};
use solvency_stress::{first_liquidation, VolatilityOutcome};

use crate::assemble::RiskReport;
use crate::base::BaseReport;

/// Narrative sections, in reading order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Explanation {
    /// Current LTV against the threshold.
    pub base_risk: String,
    /// First liquidating price shock.
    pub price_risk: String,
    /// First liquidating volatility regime.
    pub volatility_risk: String,
    /// Zone distribution over the grid.
    pub risk_surface: String,
    /// Main driver of liquidation risk.
    pub dominant_risk_driver: String,
}

impl Explanation {
    /// `(title, text)` pairs in reading order.
    #[must_use]
    pub fn sections(&self) -> [(&'static str, &str); 5] {
        [
            ("BASE RISK", self.base_risk.as_str()),
            ("PRICE RISK", self.price_risk.as_str()),
            ("VOLATILITY RISK", self.volatility_risk.as_str()),
            ("RISK SURFACE", self.risk_surface.as_str()),
            ("DOMINANT RISK DRIVER", self.dominant_risk_driver.as_str()),
        ]
    }
}

/// Builds the explanation for a report.
#[must_use]
pub fn explain(report: &RiskReport) -> Explanation {
    Explanation {
        base_risk: explain_base(&report.base),
        price_risk: explain_price(&report.price_shocks),
        volatility_risk: explain_volatility(&report.volatility_regimes),
        risk_surface: explain_surface(&report.risk_surface.summary),
        dominant_risk_driver: explain_dominant(),
    }
}

fn explain_base(base: &BaseReport) -> String {
    let headroom = base.liquidation_threshold_pct - base.current_ltv_pct;
    let state = if headroom >= 0.0 {
        "The position is solvent today but exposed to collateral price declines."
    } else {
        "The position is already beyond its liquidation threshold."
    };
    format!(
        "The position currently has a loan-to-value (LTV) of {:.2}% against a liquidation \
         threshold of {:.2}%. {state}",
        base.current_ltv_pct, base.liquidation_threshold_pct
    )
}

fn explain_price(shocks: &[PriceDropOutcome]) -> String {
    match first_liquidation(shocks) {
        Some(first) => format!(
            "Liquidation first occurs at roughly a {:.1}% price drop, which leaves a \
             relatively narrow safety margin.",
            first.price_drop_pct
        ),
        None => "None of the tested price shocks liquidates the position, showing strong \
                 resilience to direct price declines."
            .to_string(),
    }
}

fn explain_volatility(regimes: &[VolatilityOutcome]) -> String {
    match regimes.iter().find(|r| r.liquidated) {
        Some(first) => format!(
            "Under the '{}' volatility regime the position liquidates at an effective price \
             drop of about {:.2}%. Volatility materially amplifies liquidation risk.",
            first.regime, first.effective_price_drop_pct
        ),
        None => "The position stays solvent in every tested volatility regime, so it has \
                 limited sensitivity to market turbulence."
            .to_string(),
    }
}

fn explain_surface(summary: &SurfaceSummary) -> String {
    format!(
        "Of {} simulated scenarios, {:.2}% are SAFE, {:.2}% fall in the WARNING zone and \
         {:.2}% end in liquidation. The split shows how much of the stress space is tail risk.",
        summary.total_scenarios,
        summary.pct(RiskZone::Safe),
        summary.pct(RiskZone::Warning),
        summary.pct(RiskZone::Liquidated),
    )
}

fn explain_dominant() -> String {
    "The dominant risk driver is the interaction of leverage with market volatility. \
     Moderate price declines are survivable in calm markets, but elevated volatility erodes \
     the safety buffer quickly and leads to liquidation."
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use solvency_core::{Position, ProtocolRule};
    use solvency_stress::{ExecutionConfig, StressConfig};

    use crate::assemble::assemble_report_with;

    fn report(borrowed: f64) -> RiskReport {
        assemble_report_with(
            &Position::new(1.0, 30_000.0, borrowed).unwrap(),
            &ProtocolRule::new(0.80).unwrap(),
            &StressConfig::default(),
            30.0,
            &ExecutionConfig::sequential(),
        )
        .unwrap()
    }

    #[test]
    fn test_reference_narrative() {
        let explanation = explain(&report(21_000.0));

        assert!(explanation.base_risk.contains("70.00%"));
        assert!(explanation.base_risk.contains("80.00%"));
        assert!(explanation.price_risk.contains("20.0% price drop"));
        assert!(explanation.volatility_risk.contains("'calm'"));
        assert!(explanation.risk_surface.starts_with("Of 60 simulated scenarios"));

        let titles: Vec<_> = explanation.sections().iter().map(|(t, _)| *t).collect();
        assert_eq!(
            titles,
            [
                "BASE RISK",
                "PRICE RISK",
                "VOLATILITY RISK",
                "RISK SURFACE",
                "DOMINANT RISK DRIVER"
            ]
        );
    }

    #[test]
    fn test_resilient_narrative() {
        let explanation = explain(&report(1_000.0));
        assert!(explanation.price_risk.starts_with("None of the tested price shocks"));
        assert!(explanation.volatility_risk.contains("stays solvent"));
    }
}
