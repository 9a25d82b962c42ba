//! CLI command implementations.

pub mod compare;
pub mod explain;
pub mod heatmap;
pub mod report;
pub mod score;
pub mod stress;
pub mod surface;
pub mod validate;

pub use compare::CompareArgs;
pub use explain::ExplainArgs;
pub use report::ReportArgs;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use solvency_config::{StrategyFile, Validate};
use solvency_core::{Position, ProtocolRule};

/// Arguments for commands that take only a strategy document.
#[derive(Args, Debug)]
pub struct StrategyArgs {
    /// Strategy document (.yaml, .yml, .toml or .json)
    pub strategy: PathBuf,
}

/// Loads a strategy document and fails on any validation problem.
pub fn load_strategy(path: &Path) -> Result<StrategyFile> {
    let strategy = StrategyFile::from_path(path)
        .with_context(|| format!("cannot load strategy '{}'", path.display()))?;
    strategy.validate_or_error()?;
    debug!(path = %path.display(), "strategy validated");
    Ok(strategy)
}

/// Builds the position and rule of a validated strategy.
pub fn model_inputs(strategy: &StrategyFile) -> Result<(Position, ProtocolRule)> {
    Ok((strategy.position()?, strategy.protocol_rule()?))
}
