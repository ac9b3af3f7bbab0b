//! Configuration types deserialized from `cellcheck.toml`.

use crate::error::ConfigError;
use cellcheck_common::{Delay, GateFilter, VectorPolicy};
use cellcheck_harness::{default_workers, HarnessOptions, ReportFormat, DEFAULT_FAILURE_LIMIT};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// The top-level run configuration parsed from `cellcheck.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CellcheckConfig {
    /// Which gates to sweep and how results are bounded.
    #[serde(default)]
    pub suite: SuiteConfig,
    /// Vector policy and per-gate overrides.
    #[serde(default)]
    pub stimulus: StimulusConfig,
    /// Device emulator settings.
    #[serde(default)]
    pub device: DeviceConfig,
    /// Debug trace capture for failing vectors.
    #[serde(default)]
    pub trace: TraceConfig,
    /// Report output.
    #[serde(default)]
    pub report: ReportConfig,
}

impl CellcheckConfig {
    /// Builds the harness options this configuration describes.
    pub fn harness_options(&self) -> Result<HarnessOptions, ConfigError> {
        let filter = match &self.suite.gates {
            Some(names) => GateFilter::only(names.iter().cloned()),
            None => GateFilter::All,
        };
        let mut overrides = BTreeMap::new();
        for (gate, spec) in &self.stimulus.overrides {
            let field = format!("stimulus.overrides.{gate}");
            overrides.insert(gate.clone(), spec.to_policy(&field)?);
        }
        Ok(HarnessOptions {
            policy: self.stimulus.default_policy()?,
            overrides,
            filter,
            failure_limit: self.suite.failure_limit,
            workers: self.suite.workers.unwrap_or_else(default_workers),
        })
    }
}

/// The `[suite]` section.
#[derive(Debug, Deserialize)]
pub struct SuiteConfig {
    /// A label for reports.
    #[serde(default = "default_suite_name")]
    pub name: String,
    /// Gates to sweep; all registered gates when absent.
    #[serde(default)]
    pub gates: Option<Vec<String>>,
    /// Failing trials retained per gate.
    #[serde(default = "default_failure_limit")]
    pub failure_limit: usize,
    /// Worker threads; available parallelism when absent.
    #[serde(default)]
    pub workers: Option<usize>,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            name: default_suite_name(),
            gates: None,
            failure_limit: default_failure_limit(),
            workers: None,
        }
    }
}

fn default_suite_name() -> String {
    "cellcheck".to_string()
}

fn default_failure_limit() -> usize {
    DEFAULT_FAILURE_LIMIT
}

/// Names of the vector policies as written in configuration.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyKind {
    /// Every boolean vector.
    #[default]
    Exhaustive,
    /// A seeded subset of boolean vectors.
    BoundedRandom,
    /// Every vector over `{0, 1, X}`.
    UnknownStates,
}

/// A policy with its parameters, as written in configuration.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct PolicySpec {
    /// Which policy.
    #[serde(default)]
    pub policy: PolicyKind,
    /// PRNG seed for `bounded-random`; defaults to 0.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Vector count for `bounded-random`.
    #[serde(default)]
    pub count: Option<usize>,
}

impl PolicySpec {
    /// Resolves these settings into a [`VectorPolicy`].
    ///
    /// `field` is the dotted path of the table, used in error messages.
    pub fn to_policy(&self, field: &str) -> Result<VectorPolicy, ConfigError> {
        match self.policy {
            PolicyKind::Exhaustive => Ok(VectorPolicy::Exhaustive),
            PolicyKind::UnknownStates => Ok(VectorPolicy::UnknownStates),
            PolicyKind::BoundedRandom => {
                let count = self
                    .count
                    .ok_or_else(|| ConfigError::MissingField(format!("{field}.count")))?;
                if count == 0 {
                    return Err(ConfigError::out_of_range(
                        format!("{field}.count"),
                        "must be at least 1",
                    ));
                }
                Ok(VectorPolicy::BoundedRandom {
                    seed: self.seed.unwrap_or(0),
                    count,
                })
            }
        }
    }
}

/// The `[stimulus]` section.
#[derive(Debug, Default, Deserialize)]
pub struct StimulusConfig {
    /// The default policy for every gate.
    #[serde(flatten)]
    pub default: PolicySpec,
    /// Per-gate policies, keyed by gate name.
    #[serde(default)]
    pub overrides: BTreeMap<String, PolicySpec>,
}

impl StimulusConfig {
    /// The policy for gates without an override.
    pub fn default_policy(&self) -> Result<VectorPolicy, ConfigError> {
        self.default.to_policy("stimulus")
    }
}

/// The `[device]` section.
#[derive(Debug, Deserialize)]
pub struct DeviceConfig {
    /// How long the emulator waits after `apply` before outputs are valid.
    #[serde(default = "default_settle_time")]
    pub settle_time: Delay,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            settle_time: default_settle_time(),
        }
    }
}

fn default_settle_time() -> Delay {
    Delay::from_ns(10)
}

/// The `[trace]` section.
#[derive(Debug, Deserialize)]
pub struct TraceConfig {
    /// Whether to capture traces for failing vectors.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Directory that receives trace files.
    #[serde(default = "default_trace_dir")]
    pub dir: PathBuf,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: default_trace_dir(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_trace_dir() -> PathBuf {
    PathBuf::from("traces")
}

/// The `[report]` section.
#[derive(Debug, Default, Deserialize)]
pub struct ReportConfig {
    /// Output format.
    #[serde(default)]
    pub format: ReportFormat,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load_config_from_str;

    #[test]
    fn policy_kind_all_variants() {
        for (input, expected) in [
            ("exhaustive", PolicyKind::Exhaustive),
            ("bounded-random", PolicyKind::BoundedRandom),
            ("unknown-states", PolicyKind::UnknownStates),
        ] {
            let toml = format!(
                r#"
[stimulus]
policy = "{input}"
count = 4
"#
            );
            let config = load_config_from_str(&toml).unwrap();
            assert_eq!(config.stimulus.default.policy, expected);
        }
    }

    #[test]
    fn report_format_variants() {
        for (input, expected) in [("text", ReportFormat::Text), ("json", ReportFormat::Json)] {
            let toml = format!("[report]\nformat = \"{input}\"\n");
            let config = load_config_from_str(&toml).unwrap();
            assert_eq!(config.report.format, expected);
        }
    }

    #[test]
    fn bounded_random_seed_defaults_to_zero() {
        let spec = PolicySpec {
            policy: PolicyKind::BoundedRandom,
            seed: None,
            count: Some(8),
        };
        assert_eq!(
            spec.to_policy("stimulus").unwrap(),
            VectorPolicy::BoundedRandom { seed: 0, count: 8 }
        );
    }

    #[test]
    fn bounded_random_needs_count() {
        let spec = PolicySpec {
            policy: PolicyKind::BoundedRandom,
            ..PolicySpec::default()
        };
        let err = spec.to_policy("stimulus.overrides.AOI222").unwrap_err();
        assert!(
            matches!(err, ConfigError::MissingField(ref f) if f == "stimulus.overrides.AOI222.count")
        );
    }

    #[test]
    fn harness_options_from_config() {
        let toml = r#"
[suite]
gates = ["AOI21", "MUX2"]
failure_limit = 4
workers = 2

[stimulus.overrides.MUX2]
policy = "unknown-states"
"#;
        let options = load_config_from_str(toml)
            .unwrap()
            .harness_options()
            .unwrap();
        assert_eq!(options.failure_limit, 4);
        assert_eq!(options.workers, 2);
        assert_eq!(options.filter, GateFilter::only(["AOI21", "MUX2"]));
        assert_eq!(options.policy, VectorPolicy::Exhaustive);
        assert_eq!(options.policy_for("MUX2"), &VectorPolicy::UnknownStates);
        assert_eq!(options.policy_for("AOI21"), &VectorPolicy::Exhaustive);
    }

    #[test]
    fn defaults_without_sections() {
        let config = CellcheckConfig::default();
        assert_eq!(config.suite.name, "cellcheck");
        assert_eq!(config.suite.failure_limit, 16);
        assert_eq!(config.device.settle_time, Delay::from_ns(10));
        assert!(config.trace.enabled);
        assert_eq!(config.trace.dir, PathBuf::from("traces"));
        assert_eq!(config.report.format, ReportFormat::Text);
        let options = config.harness_options().unwrap();
        assert_eq!(options.filter, GateFilter::All);
        assert!(options.workers >= 1);
    }
}
