//! Runs driven by `cellcheck.toml`.

use cellcheck_common::{Delay, GateFilter, VectorPolicy};
use cellcheck_config::{find_config, load_config, CellcheckConfig, ConfigError, CONFIG_FILE};
use cellcheck_conformance::{make_config, run_standard};
use cellcheck_diagnostics::DiagnosticCode;
use cellcheck_harness::{ReportFormat, Reporter};
use cellcheck_sim::FunctionalDeviceLayer;

const MIXED_POLICIES: &str = r#"
[suite]
name = "smoke"
gates = ["INV", "AOI21", "MUX2"]
failure_limit = 4
workers = 2

[stimulus]
policy = "bounded-random"
seed = 7
count = 5

[stimulus.overrides.MUX2]
policy = "unknown-states"

[device]
settle_time = "2ns"

[report]
format = "json"
"#;

#[test]
fn config_selects_gates_and_policies() {
    let config = make_config(MIXED_POLICIES).unwrap();
    let opts = config.harness_options().unwrap();
    assert_eq!(opts.filter, GateFilter::only(["INV", "AOI21", "MUX2"]));
    assert_eq!(opts.policy_for("MUX2"), &VectorPolicy::UnknownStates);
    assert_eq!(
        opts.policy_for("AOI21"),
        &VectorPolicy::BoundedRandom { seed: 7, count: 5 }
    );

    let device = FunctionalDeviceLayer::new(config.device.settle_time);
    let run = run_standard(&device, opts).unwrap();
    assert!(run.verdict.is_pass());
    let totals: Vec<(&str, usize)> = run
        .verdict
        .gates()
        .iter()
        .map(|g| (g.gate(), g.total()))
        .collect();
    // Registry order, not filter order. INV has only 2 vectors.
    assert_eq!(totals, [("INV", 2), ("MUX2", 27), ("AOI21", 5)]);
    assert_eq!(run.warning_count, 1);
    assert_eq!(run.diagnostics[0].code, DiagnosticCode::VECTOR_COUNT_CLAMPED);

    let json = Reporter::new(config.report.format)
        .render(&run.verdict)
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["gates"], 3);
    assert_eq!(value["vectors"], 34);
}

#[test]
fn defaults_when_file_is_absent() {
    let dir = tempfile::tempdir().unwrap();
    assert!(find_config(dir.path()).is_none());
    assert!(matches!(
        load_config(dir.path()),
        Err(ConfigError::Read { .. })
    ));
    let config = CellcheckConfig::default();
    assert_eq!(config.suite.name, "cellcheck");
    assert_eq!(config.device.settle_time, Delay::from_ns(10));
    assert_eq!(config.report.format, ReportFormat::Text);
    assert!(config.trace.enabled);
}

#[test]
fn file_in_directory_is_loaded() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(CONFIG_FILE), MIXED_POLICIES).unwrap();
    let config = load_config(dir.path()).unwrap();
    assert_eq!(find_config(dir.path()), Some(dir.path().join(CONFIG_FILE)));
    assert_eq!(config.suite.name, "smoke");
    assert_eq!(config.device.settle_time, Delay::from_ns(2));
}

#[test]
fn invalid_settings_are_rejected() {
    assert!(matches!(
        make_config("[suite]\nfailure_limit = 0\n"),
        Err(ConfigError::OutOfRange { .. })
    ));
    assert!(matches!(
        make_config("[stimulus]\npolicy = \"bounded-random\"\n"),
        Err(ConfigError::MissingField(_))
    ));
    assert!(matches!(
        make_config("[device]\nsettle_time = \"soon\"\n"),
        Err(ConfigError::Malformed(_))
    ));
    assert!(matches!(
        make_config("[bogus]\nx = 1\n"),
        Err(ConfigError::Malformed(_))
    ));
}
