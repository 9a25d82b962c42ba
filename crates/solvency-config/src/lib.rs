//! # Solvency Config
//!
//! Loads and validates strategy documents.
//!
//! - **Formats**: YAML, TOML and JSON, chosen by file extension
//! - **Defaults**: every optional section falls back to the reference
//!   stress programme and preset catalogues
//! - **Validation**: [`Validate`] collects every problem in one pass
//!
//! ## Example
//!
//! ```
//! use solvency_config::{DocumentFormat, StrategyFile, Validate};
//!
//! let doc = StrategyFile::from_str(
//!     r#"{
//!         "position": {
//!             "collateral_amount": 1.0,
//!             "collateral_price": 30000,
//!             "borrowed_amount": 21000
//!         },
//!         "protocol": {"liquidation_threshold": 0.8}
//!     }"#,
//!     DocumentFormat::Json,
//! )
//! .unwrap();
//!
//! assert!(doc.is_valid());
//! assert_eq!(doc.stress_config().axes.scenario_count(), 60);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod format;
pub mod strategy;

pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
pub use format::DocumentFormat;
pub use strategy::{
    ComparisonSection, MarketSection, PositionSection, ProtocolSection, ScoringSection,
    StrategyFile,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};
    pub use crate::format::DocumentFormat;
    pub use crate::strategy::StrategyFile;
}
