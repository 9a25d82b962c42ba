//! Risk zone classification.
//!
//! A scenario's zone is derived from the buffer between the liquidation
//! threshold and the scenario LTV, both in percentage points:
//!
//! | Buffer            | Zone         |
//! |-------------------|--------------|
//! | `>= 10`           | `SAFE`       |
//! | `0 <= b < 10`     | `WARNING`    |
//! | `< 0`             | `LIQUIDATED` |
//!
//! Ties resolve to the safer tier. An LTV exactly at the threshold is
//! `WARNING`, consistent with the strict `>` liquidation rule.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Minimum buffer, in percentage points, for a scenario to count as safe.
pub const SAFE_BUFFER_PCT: f64 = 10.0;

/// Risk tier of an evaluated scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskZone {
    /// At least [`SAFE_BUFFER_PCT`] below the threshold.
    Safe,
    /// At or below the threshold, within the safe buffer.
    Warning,
    /// Above the threshold.
    Liquidated,
}

impl RiskZone {
    /// All zones, safest first.
    pub const ALL: [RiskZone; 3] = [RiskZone::Safe, RiskZone::Warning, RiskZone::Liquidated];

    /// Upper-case label used in reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            RiskZone::Safe => "SAFE",
            RiskZone::Warning => "WARNING",
            RiskZone::Liquidated => "LIQUIDATED",
        }
    }
}

impl fmt::Display for RiskZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classifies an LTV against a liquidation threshold, both as percentages.
///
/// # Example
///
/// ```
/// use solvency_risk::{classify_zone, RiskZone};
///
/// assert_eq!(classify_zone(70.0, 80.0), RiskZone::Safe);
/// assert_eq!(classify_zone(80.0, 80.0), RiskZone::Warning);
/// assert_eq!(classify_zone(80.01, 80.0), RiskZone::Liquidated);
/// ```
#[must_use]
pub fn classify_zone(ltv_pct: f64, liquidation_threshold_pct: f64) -> RiskZone {
    let buffer = liquidation_threshold_pct - ltv_pct;

    if buffer >= SAFE_BUFFER_PCT {
        RiskZone::Safe
    } else if buffer >= 0.0 {
        RiskZone::Warning
    } else {
        RiskZone::Liquidated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        assert_eq!(classify_zone(70.0, 80.0), RiskZone::Safe);
        assert_eq!(classify_zone(70.01, 80.0), RiskZone::Warning);
        assert_eq!(classify_zone(80.0, 80.0), RiskZone::Warning);
        assert_eq!(classify_zone(80.01, 80.0), RiskZone::Liquidated);
    }

    #[test]
    fn test_reference_points() {
        // 10% and 20% drops on the reference position
        assert_eq!(classify_zone(77.78, 80.0), RiskZone::Warning);
        assert_eq!(classify_zone(87.5, 80.0), RiskZone::Liquidated);
        assert_eq!(classify_zone(0.0, 80.0), RiskZone::Safe);
    }

    #[test]
    fn test_serde_labels() {
        let json = serde_json::to_string(&RiskZone::Liquidated).unwrap();
        assert_eq!(json, "\"LIQUIDATED\"");

        let zone: RiskZone = serde_json::from_str("\"WARNING\"").unwrap();
        assert_eq!(zone, RiskZone::Warning);
        assert_eq!(zone.to_string(), "WARNING");
    }
}
