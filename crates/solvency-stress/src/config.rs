//! Stress configuration.
//!
//! Axis sets are plain values passed into the generators, so a caller can
//! swap any axis without touching generator logic. Reference sets mirror the
//! standard stress programme:
//!
//! | Axis               | Reference values                               |
//! |--------------------|------------------------------------------------|
//! | price shocks       | 10%, 20%, 30%, 40%, 50%                        |
//! | borrow multipliers | 0.8, 1.0, 1.2                                  |
//! | volatility regimes | calm 0.7, normal 1.0, turbulent 1.5, crisis 2.0 |
//! | drop cap           | 95%                                            |

use serde::{Deserialize, Serialize};

use solvency_core::{SolvencyError, SolvencyResult};

/// Upper bound on any derived (effective) price drop.
pub const MAX_DROP_CAP: f64 = 0.95;

/// Reference price shocks, as ratios.
pub const REFERENCE_PRICE_SHOCKS: [f64; 5] = [0.10, 0.20, 0.30, 0.40, 0.50];

/// Reference borrow multipliers.
pub const REFERENCE_BORROW_MULTIPLIERS: [f64; 3] = [0.8, 1.0, 1.2];

/// Drops used by the base risk report.
pub const REFERENCE_BASE_REPORT_DROPS: [f64; 4] = [0.10, 0.20, 0.30, 0.40];

/// Base drop that volatility regimes scale.
pub const REFERENCE_VOLATILITY_BASE_DROP: f64 = 0.20;

/// Reference absolute borrowed levels for leverage sensitivity.
pub const REFERENCE_LEVERAGE_LEVELS: [f64; 5] = [7_000.0, 8_000.0, 9_000.0, 10_000.0, 11_000.0];

// =============================================================================
// AXIS VALUES
// =============================================================================

/// A named volatility regime scaling a price shock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolatilityRegime {
    /// Regime name (e.g. "crisis").
    pub name: String,
    /// Multiplier applied to the raw price shock.
    pub multiplier: f64,
}

impl VolatilityRegime {
    /// Creates a new regime.
    #[must_use]
    pub fn new(name: impl Into<String>, multiplier: f64) -> Self {
        Self {
            name: name.into(),
            multiplier,
        }
    }

    /// Reference regimes in registration order.
    #[must_use]
    pub fn standard() -> Vec<Self> {
        vec![
            Self::new("calm", 0.7),
            Self::new("normal", 1.0),
            Self::new("turbulent", 1.5),
            Self::new("crisis", 2.0),
        ]
    }
}

/// A named macro drop assumption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroRegime {
    /// Regime name (e.g. "medium").
    pub name: String,
    /// Assumed price drop, as a ratio.
    pub drop: f64,
}

impl MacroRegime {
    /// Creates a new macro regime.
    #[must_use]
    pub fn new(name: impl Into<String>, drop: f64) -> Self {
        Self {
            name: name.into(),
            drop,
        }
    }

    /// Reference low / medium / high assumptions.
    #[must_use]
    pub fn standard() -> Vec<Self> {
        vec![
            Self::new("low", 0.15),
            Self::new("medium", 0.30),
            Self::new("high", 0.50),
        ]
    }
}

/// Borrowed amounts tested by the leverage sensitivity analysis.
///
/// On the wire this is a map with exactly one of `absolute` or `relative`:
///
/// ```yaml
/// leverage_levels:
///   relative: [0.7, 0.8, 1.0, 1.1]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LeverageLevelsFields", into = "LeverageLevelsFields")]
pub enum LeverageLevels {
    /// Fixed borrowed amounts in quote currency.
    Absolute(Vec<f64>),
    /// Multipliers applied to the position's borrowed amount.
    Relative(Vec<f64>),
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct LeverageLevelsFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    absolute: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    relative: Option<Vec<f64>>,
}

impl TryFrom<LeverageLevelsFields> for LeverageLevels {
    type Error = SolvencyError;

    fn try_from(fields: LeverageLevelsFields) -> Result<Self, Self::Error> {
        match (fields.absolute, fields.relative) {
            (Some(levels), None) => Ok(Self::Absolute(levels)),
            (None, Some(multipliers)) => Ok(Self::Relative(multipliers)),
            _ => Err(SolvencyError::invalid_input(
                "leverage_levels",
                "expected exactly one of 'absolute' or 'relative'",
            )),
        }
    }
}

impl From<LeverageLevels> for LeverageLevelsFields {
    fn from(levels: LeverageLevels) -> Self {
        match levels {
            LeverageLevels::Absolute(v) => Self {
                absolute: Some(v),
                relative: None,
            },
            LeverageLevels::Relative(v) => Self {
                absolute: None,
                relative: Some(v),
            },
        }
    }
}

impl Default for LeverageLevels {
    fn default() -> Self {
        Self::Absolute(REFERENCE_LEVERAGE_LEVELS.to_vec())
    }
}

impl LeverageLevels {
    /// Number of levels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values().len()
    }

    /// Returns true if there are no levels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values().is_empty()
    }

    /// Raw level values.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        match self {
            Self::Absolute(v) | Self::Relative(v) => v,
        }
    }

    /// Resolves each level to a borrowed amount.
    #[must_use]
    pub fn borrowed_amounts(&self, base_borrowed: f64) -> Vec<f64> {
        match self {
            Self::Absolute(levels) => levels.clone(),
            Self::Relative(multipliers) => {
                multipliers.iter().map(|m| base_borrowed * m).collect()
            }
        }
    }
}

// =============================================================================
// SCENARIO AXES
// =============================================================================

/// The three independent axes of the scenario grid.
///
/// Iteration order is declaration order: price shock outer, borrow
/// multiplier middle, volatility regime inner (in registration order).
///
/// # Example
///
/// ```
/// use solvency_stress::ScenarioAxes;
///
/// let axes = ScenarioAxes::empty()
///     .with_price_shocks(vec![0.1, 0.3])
///     .with_borrow_multipliers(vec![1.0])
///     .with_regime("normal", 1.0)
///     .with_regime("crisis", 2.0);
///
/// assert_eq!(axes.scenario_count(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioAxes {
    /// Fractional price declines.
    pub price_shocks: Vec<f64>,
    /// Multipliers on the borrowed amount.
    pub borrow_multipliers: Vec<f64>,
    /// Volatility regimes, in registration order.
    pub volatility_regimes: Vec<VolatilityRegime>,
    /// Cap on the effective (regime-scaled) drop.
    pub max_drop_cap: f64,
}

impl Default for ScenarioAxes {
    fn default() -> Self {
        Self::reference()
    }
}

impl ScenarioAxes {
    /// Reference axis sets (5 × 3 × 4 = 60 scenarios).
    #[must_use]
    pub fn reference() -> Self {
        Self {
            price_shocks: REFERENCE_PRICE_SHOCKS.to_vec(),
            borrow_multipliers: REFERENCE_BORROW_MULTIPLIERS.to_vec(),
            volatility_regimes: VolatilityRegime::standard(),
            max_drop_cap: MAX_DROP_CAP,
        }
    }

    /// Axes with no values, for building up from scratch.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            price_shocks: Vec::new(),
            borrow_multipliers: Vec::new(),
            volatility_regimes: Vec::new(),
            max_drop_cap: MAX_DROP_CAP,
        }
    }

    /// Replaces the price shock axis.
    #[must_use]
    pub fn with_price_shocks(mut self, shocks: Vec<f64>) -> Self {
        self.price_shocks = shocks;
        self
    }

    /// Replaces the borrow multiplier axis.
    #[must_use]
    pub fn with_borrow_multipliers(mut self, multipliers: Vec<f64>) -> Self {
        self.borrow_multipliers = multipliers;
        self
    }

    /// Replaces the volatility regime axis.
    #[must_use]
    pub fn with_regimes(mut self, regimes: Vec<VolatilityRegime>) -> Self {
        self.volatility_regimes = regimes;
        self
    }

    /// Registers one more volatility regime after the existing ones.
    #[must_use]
    pub fn with_regime(mut self, name: impl Into<String>, multiplier: f64) -> Self {
        self.volatility_regimes
            .push(VolatilityRegime::new(name, multiplier));
        self
    }

    /// Sets the effective drop cap.
    #[must_use]
    pub fn with_max_drop_cap(mut self, cap: f64) -> Self {
        self.max_drop_cap = cap;
        self
    }

    /// Size of the Cartesian product.
    #[must_use]
    pub fn scenario_count(&self) -> usize {
        self.price_shocks.len() * self.borrow_multipliers.len() * self.volatility_regimes.len()
    }

    /// Collects every problem with these axes.
    #[must_use]
    pub fn check(&self) -> Vec<SolvencyError> {
        let mut errors = Vec::new();

        if self.price_shocks.is_empty() {
            errors.push(SolvencyError::invalid_input("price_shocks", "axis is empty"));
        }
        for (i, shock) in self.price_shocks.iter().enumerate() {
            check_drop(&mut errors, format!("price_shocks[{i}]"), *shock);
        }

        if self.borrow_multipliers.is_empty() {
            errors.push(SolvencyError::invalid_input(
                "borrow_multipliers",
                "axis is empty",
            ));
        }
        for (i, m) in self.borrow_multipliers.iter().enumerate() {
            if !m.is_finite() || *m < 0.0 {
                errors.push(SolvencyError::invalid_input(
                    format!("borrow_multipliers[{i}]"),
                    format!("must be finite and non-negative, got {m}"),
                ));
            }
        }

        if self.volatility_regimes.is_empty() {
            errors.push(SolvencyError::invalid_input(
                "volatility_regimes",
                "axis is empty",
            ));
        }
        for (i, regime) in self.volatility_regimes.iter().enumerate() {
            if !(regime.multiplier.is_finite() && regime.multiplier > 0.0) {
                errors.push(SolvencyError::invalid_input(
                    format!("volatility_regimes[{i}].multiplier"),
                    format!("must be finite and positive, got {}", regime.multiplier),
                ));
            }
            if self.volatility_regimes[..i]
                .iter()
                .any(|r| r.name == regime.name)
            {
                errors.push(SolvencyError::invalid_input(
                    format!("volatility_regimes[{i}].name"),
                    format!("duplicate regime '{}'", regime.name),
                ));
            }
        }

        if !(self.max_drop_cap > 0.0 && self.max_drop_cap < 1.0) {
            errors.push(SolvencyError::invalid_input(
                "max_drop_cap",
                format!("must lie strictly between 0 and 1, got {}", self.max_drop_cap),
            ));
        }

        errors
    }

    /// Validates the axes, failing on the first problem.
    pub fn validate(&self) -> SolvencyResult<()> {
        first_error(self.check())
    }
}

// =============================================================================
// STRESS CONFIG
// =============================================================================

/// Full stress programme: grid axes plus the single-axis variant inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StressConfig {
    /// Grid axes (price shocks double as the price shock run).
    #[serde(flatten)]
    pub axes: ScenarioAxes,
    /// Drops probed by the base risk report.
    pub base_report_drops: Vec<f64>,
    /// Base drop scaled by each volatility regime.
    pub volatility_base_drop: f64,
    /// Levels for leverage sensitivity.
    pub leverage_levels: LeverageLevels,
    /// Macro regime drop assumptions.
    pub macro_regimes: Vec<MacroRegime>,
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            axes: ScenarioAxes::reference(),
            base_report_drops: REFERENCE_BASE_REPORT_DROPS.to_vec(),
            volatility_base_drop: REFERENCE_VOLATILITY_BASE_DROP,
            leverage_levels: LeverageLevels::default(),
            macro_regimes: MacroRegime::standard(),
        }
    }
}

impl StressConfig {
    /// Creates the reference stress programme.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the grid axes.
    #[must_use]
    pub fn with_axes(mut self, axes: ScenarioAxes) -> Self {
        self.axes = axes;
        self
    }

    /// Replaces the base report drops.
    #[must_use]
    pub fn with_base_report_drops(mut self, drops: Vec<f64>) -> Self {
        self.base_report_drops = drops;
        self
    }

    /// Sets the volatility stress base drop.
    #[must_use]
    pub fn with_volatility_base_drop(mut self, drop: f64) -> Self {
        self.volatility_base_drop = drop;
        self
    }

    /// Replaces the leverage levels.
    #[must_use]
    pub fn with_leverage_levels(mut self, levels: LeverageLevels) -> Self {
        self.leverage_levels = levels;
        self
    }

    /// Replaces the macro regimes.
    #[must_use]
    pub fn with_macro_regimes(mut self, regimes: Vec<MacroRegime>) -> Self {
        self.macro_regimes = regimes;
        self
    }

    /// Collects every problem with this programme.
    #[must_use]
    pub fn check(&self) -> Vec<SolvencyError> {
        let mut errors = self.axes.check();

        for (i, drop) in self.base_report_drops.iter().enumerate() {
            check_drop(&mut errors, format!("base_report_drops[{i}]"), *drop);
        }
        check_drop(
            &mut errors,
            "volatility_base_drop".to_string(),
            self.volatility_base_drop,
        );

        if self.leverage_levels.is_empty() {
            errors.push(SolvencyError::invalid_input(
                "leverage_levels",
                "no levels given",
            ));
        }
        for (i, level) in self.leverage_levels.values().iter().enumerate() {
            if !level.is_finite() || *level < 0.0 {
                errors.push(SolvencyError::invalid_input(
                    format!("leverage_levels[{i}]"),
                    format!("must be finite and non-negative, got {level}"),
                ));
            }
        }

        for (i, regime) in self.macro_regimes.iter().enumerate() {
            check_drop(&mut errors, format!("macro_regimes[{i}].drop"), regime.drop);
        }

        errors
    }

    /// Validates the programme, failing on the first problem.
    pub fn validate(&self) -> SolvencyResult<()> {
        first_error(self.check())
    }
}

// =============================================================================
// EXECUTION
// =============================================================================

/// Controls how scenario evaluation is scheduled.
///
/// Parallel evaluation has no observable effect on results; the grid is
/// always assembled in declared axis order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionConfig {
    /// Enable parallel processing (requires the `parallel` feature).
    pub parallel: bool,

    /// Minimum scenario count to trigger parallel processing.
    /// Below this threshold, sequential is faster due to thread overhead.
    pub parallel_threshold: usize,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            parallel_threshold: 256,
        }
    }
}

impl ExecutionConfig {
    /// Creates a config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config that always evaluates sequentially.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Sets whether to use parallel processing.
    #[must_use]
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Sets the threshold for parallel processing.
    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Returns true if `len` items should be processed in parallel.
    #[must_use]
    pub fn should_parallelize(&self, len: usize) -> bool {
        self.parallel && len > self.parallel_threshold
    }
}

fn check_drop(errors: &mut Vec<SolvencyError>, field: String, drop: f64) {
    if !(drop.is_finite() && (0.0..1.0).contains(&drop)) {
        errors.push(SolvencyError::invalid_input(
            field,
            format!("drop must lie in [0, 1), got {drop}"),
        ));
    }
}

fn first_error(errors: Vec<SolvencyError>) -> SolvencyResult<()> {
    match errors.into_iter().next() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
