//! End-to-end report assembly from a strategy file.

use approx::assert_relative_eq;
use tempfile::TempDir;

use solvency_config::{ConfigError, DocumentFormat, StrategyFile};
use solvency_report::{assemble_report, explain, ReportError, RiskLevel, RiskReport};

const STRATEGY: &str = r"
position:
  collateral_amount: 1.0
  collateral_price: 30000
  borrowed_amount: 21000
protocol:
  name: aave_v3
  liquidation_threshold: 0.80
execution:
  parallel: false
";

#[test]
fn test_reference_report_round_trip() {
    let strategy = StrategyFile::from_str(STRATEGY, DocumentFormat::Yaml).unwrap();
    let report = assemble_report(&strategy).unwrap();

    assert_eq!(report.base.protocol.as_deref(), Some("aave_v3"));
    assert_eq!(report.base.risk_level, RiskLevel::High);
    assert_relative_eq!(report.base.current_ltv_pct, 70.0);
    assert_relative_eq!(report.risk_score, 55.0);

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("reports").join("latest.json");
    report.write_json(&path).unwrap();

    let loaded = RiskReport::read_json(&path).unwrap();
    assert_eq!(loaded.generated_at, report.generated_at);
    assert_eq!(loaded.version, report.version);
    assert_eq!(loaded.risk_surface.summary, report.risk_surface.summary);
    assert_relative_eq!(loaded.risk_score, report.risk_score);
    assert_eq!(explain(&loaded), explain(&report));

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["risk_surface"]["summary"]["total_scenarios"], 60);
    assert_eq!(json["base"]["risk_level"], "HIGH");
    assert_eq!(json["risk_surface"]["enriched_matrix"][0]["risk_zone"], "SAFE");
}

#[test]
fn test_invalid_strategy_surfaces_config_error() {
    let strategy = StrategyFile::from_str(
        &STRATEGY.replace("0.80", "1.80"),
        DocumentFormat::Yaml,
    )
    .unwrap();

    let err = assemble_report(&strategy).unwrap_err();
    assert!(matches!(err, ReportError::Config(ConfigError::Model(_))));
}

#[test]
fn test_missing_report_file() {
    let dir = TempDir::new().unwrap();
    let err = RiskReport::read_json(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, ReportError::Io { .. }));
}
