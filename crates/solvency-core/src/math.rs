//! Presentation rounding helpers.
//!
//! Outcomes are rounded only when they are reported. Comparisons that decide
//! liquidation always run on unrounded values.

/// Rounds `value` to `places` decimal places (half away from zero).
#[must_use]
pub fn round_dp(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Converts a ratio (0.8) into a percentage (80.0).
#[inline]
#[must_use]
pub fn to_pct(ratio: f64) -> f64 {
    ratio * 100.0
}
