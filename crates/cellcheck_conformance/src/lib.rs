//! Conformance test helpers for cellcheck.
//!
//! Provides shared functions that run the standard library through the
//! harness against the functional emulator and return structured results
//! for assertion in integration tests.

#![warn(missing_docs)]

use cellcheck_cells::GateRegistry;
use cellcheck_common::{GateFilter, LogicVec, VectorPolicy};
use cellcheck_config::{CellcheckConfig, ConfigError};
use cellcheck_diagnostics::{Diagnostic, DiagnosticSink, Severity};
use cellcheck_harness::{DeviceLayer, Harness, HarnessError, HarnessOptions, SuiteVerdict};
use cellcheck_sim::{FaultPlan, FunctionalDeviceLayer};

/// Result of one harness run.
pub struct SuiteRun {
    /// The suite verdict.
    pub verdict: SuiteVerdict,
    /// Diagnostics emitted while planning.
    pub diagnostics: Vec<Diagnostic>,
    /// Number of warning-severity diagnostics.
    pub warning_count: usize,
}

/// Options selecting `gates` under `policy`, on two workers.
///
/// An empty `gates` slice selects every registered gate.
pub fn options(gates: &[&str], policy: VectorPolicy) -> HarnessOptions {
    let filter = if gates.is_empty() {
        GateFilter::All
    } else {
        GateFilter::only(gates.iter().copied())
    };
    HarnessOptions {
        policy,
        filter,
        workers: 2,
        ..HarnessOptions::default()
    }
}

/// Parses a `cellcheck.toml` body.
pub fn make_config(toml_src: &str) -> Result<CellcheckConfig, ConfigError> {
    cellcheck_config::load_config_from_str(toml_src)
}

/// A fault-free emulator.
pub fn clean_device() -> FunctionalDeviceLayer {
    FunctionalDeviceLayer::default()
}

/// An emulator that injects `plan` and records histories for tracing.
pub fn faulty_device(plan: FaultPlan) -> FunctionalDeviceLayer {
    FunctionalDeviceLayer::default()
        .with_faults(plan)
        .with_recording()
}

/// Runs the standard library through `device` with the given options.
pub fn run_standard(
    device: &dyn DeviceLayer,
    options: HarnessOptions,
) -> Result<SuiteRun, HarnessError> {
    run_registry(&GateRegistry::standard(), device, options)
}

/// Runs an explicit registry through `device`.
pub fn run_registry(
    registry: &GateRegistry,
    device: &dyn DeviceLayer,
    options: HarnessOptions,
) -> Result<SuiteRun, HarnessError> {
    let sink = DiagnosticSink::new();
    let verdict = Harness::new(registry, options).run(device, &sink)?;
    let diagnostics = sink.take_all();
    let warning_count = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Warning)
        .count();
    Ok(SuiteRun {
        verdict,
        diagnostics,
        warning_count,
    })
}

/// Every boolean vector of width `arity`, in binary-counting order.
///
/// Built directly from indices so tests can cross-check the stimulus
/// generator.
pub fn all_vectors(arity: u32) -> impl Iterator<Item = LogicVec> {
    (0..1u64 << arity).map(move |i| LogicVec::from_index(i, arity))
}
