//! Verification harness for combinational standard cells.
//!
//! For every selected [`GateDescriptor`](cellcheck_cells::GateDescriptor) the
//! harness pulls vectors from a [`StimulusSet`], computes the expected outputs
//! with the oracle, drives a [`DeviceInstance`] through `apply`/`sample`, and
//! records one [`GateTrial`] per vector. Trials roll up into a [`GateVerdict`]
//! per gate and a [`SuiteVerdict`] for the run; the [`Reporter`] renders the
//! verdict and asks the device layer for debug traces of failing vectors.
//!
//! # Usage
//!
//! ```ignore
//! use cellcheck_cells::GateRegistry;
//! use cellcheck_diagnostics::DiagnosticSink;
//! use cellcheck_harness::{Harness, HarnessOptions, Reporter};
//!
//! let registry = GateRegistry::standard();
//! let sink = DiagnosticSink::new();
//! let verdict = Harness::new(&registry, HarnessOptions::default()).run(&device, &sink)?;
//! print!("{}", Reporter::default().render(&verdict)?);
//! ```
//!
//! # Modules
//!
//! - `stimulus`: Deterministic vector generation per policy
//! - `device`: The device-layer interface (apply, sample, trace capture)
//! - `verdict`: Trials, per-gate verdicts, and the suite verdict
//! - `comparator`: Parallel per-gate sweeps and aggregation
//! - `report`: Text/JSON rendering and trace requests

#![warn(missing_docs)]

pub mod comparator;
pub mod device;
pub mod error;
pub mod report;
pub mod stimulus;
pub mod verdict;

pub use comparator::{
    default_workers, sweep_gate, GatePlan, Harness, HarnessOptions, DEFAULT_FAILURE_LIMIT,
};
pub use device::{DeviceError, DeviceInstance, DeviceLayer, PortAssignment, TraceCapture, TraceError};
pub use error::{HarnessError, StimulusError};
pub use report::{exit_code, CapturedTrace, GateReport, ReportFormat, Reporter, SuiteReport};
pub use stimulus::{generate, StimulusSet, Vectors, MAX_ARITY, MAX_UNKNOWN_STATE_ARITY};
pub use verdict::{GateTrial, GateVerdict, SuiteVerdict, TrialOutcome, VerdictBuilder};
