//! Rendering a [`SuiteVerdict`] for people and machines.
//!
//! The text format prints one PASS/FAIL line per gate in registry order, then
//! the failing trials beneath each failing gate. Trials are also available as
//! [`Diagnostic`]s so the CLI can render them like any other error. The JSON
//! format serialises a [`SuiteReport`].

use crate::device::TraceCapture;
use crate::verdict::{GateTrial, GateVerdict, SuiteVerdict};
use cellcheck_cells::describe_ports;
use cellcheck_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink, Location};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::PathBuf;

/// Output format for a suite report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Human-readable summary lines.
    #[default]
    Text,
    /// A serialised [`SuiteReport`].
    Json,
}

/// Machine-readable summary of a run.
#[derive(Debug, Serialize)]
pub struct SuiteReport<'a> {
    /// Overall verdict.
    pub passed: bool,
    /// Number of gates swept.
    pub gates: usize,
    /// Number of gates with failures.
    pub failed_gates: usize,
    /// Vectors run across all gates.
    pub vectors: usize,
    /// Failing vectors across all gates.
    pub failed_vectors: usize,
    /// Per-gate results in registry order.
    pub results: Vec<GateReport<'a>>,
}

/// Machine-readable summary of one gate.
#[derive(Debug, Serialize)]
pub struct GateReport<'a> {
    /// The gate archetype.
    pub gate: &'a str,
    /// Input port names.
    pub inputs: &'a [String],
    /// Output port names.
    pub outputs: &'a [String],
    /// Vectors run.
    pub total: usize,
    /// Vectors passed.
    pub passed: usize,
    /// Vectors failed.
    pub failed: usize,
    /// Failures caused by device faults.
    pub device_faults: usize,
    /// Failing trials not included below.
    pub omitted_failures: usize,
    /// The first failing trials.
    pub failures: &'a [GateTrial],
}

impl<'a> SuiteReport<'a> {
    /// Summarises a verdict.
    pub fn new(verdict: &'a SuiteVerdict) -> Self {
        Self {
            passed: verdict.is_pass(),
            gates: verdict.gates().len(),
            failed_gates: verdict.failed_gates().count(),
            vectors: verdict.total_vectors(),
            failed_vectors: verdict.failed_vectors(),
            results: verdict.gates().iter().map(GateReport::new).collect(),
        }
    }
}

impl<'a> GateReport<'a> {
    fn new(g: &'a GateVerdict) -> Self {
        Self {
            gate: g.gate(),
            inputs: g.input_ports(),
            outputs: g.output_ports(),
            total: g.total(),
            passed: g.passed_count(),
            failed: g.failed_count(),
            device_faults: g.device_fault_count(),
            omitted_failures: g.omitted_failures(),
            failures: g.failures(),
        }
    }
}

/// A trace written for a failing vector.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CapturedTrace {
    /// The gate archetype.
    pub gate: String,
    /// The failing vector's index.
    pub vector: usize,
    /// Where the trace landed, if the capture hook reports it.
    pub path: Option<PathBuf>,
}

/// Renders verdicts and requests traces for failures.
#[derive(Clone, Copy, Debug, Default)]
pub struct Reporter {
    format: ReportFormat,
}

impl Reporter {
    /// Creates a reporter for a format.
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// The output format.
    pub fn format(&self) -> ReportFormat {
        self.format
    }

    /// Renders the verdict in the configured format.
    pub fn render(&self, verdict: &SuiteVerdict) -> Result<String, serde_json::Error> {
        match self.format {
            ReportFormat::Text => Ok(render_text(verdict)),
            ReportFormat::Json => serde_json::to_string_pretty(&SuiteReport::new(verdict)),
        }
    }

    /// One diagnostic per retained failing trial, in report order.
    pub fn diagnostics(&self, verdict: &SuiteVerdict) -> Vec<Diagnostic> {
        verdict
            .failed_gates()
            .flat_map(|g| g.failures().iter().map(move |t| trial_diagnostic(g, t)))
            .collect()
    }

    /// Requests a trace for every retained failing trial.
    ///
    /// Capture is best-effort: a failed capture becomes a warning in `sink`
    /// and never changes the verdict.
    pub fn capture_traces(
        &self,
        verdict: &SuiteVerdict,
        capture: &dyn TraceCapture,
        sink: &DiagnosticSink,
    ) -> Vec<CapturedTrace> {
        let mut captured = Vec::new();
        for g in verdict.failed_gates() {
            for t in g.failures() {
                match capture.capture_trace(g.gate(), t.index) {
                    Ok(path) => captured.push(CapturedTrace {
                        gate: g.gate().to_string(),
                        vector: t.index,
                        path,
                    }),
                    Err(e) => sink.emit(Diagnostic::warning(
                        DiagnosticCode::TRACE_CAPTURE_FAILED,
                        format!("could not capture trace: {e}"),
                        Location::vector(g.gate(), t.index),
                    )),
                }
            }
        }
        captured
    }
}

/// Process exit status for a verdict: 0 when everything passed, 1 otherwise.
pub fn exit_code(verdict: &SuiteVerdict) -> i32 {
    if verdict.is_pass() {
        0
    } else {
        1
    }
}

fn render_text(verdict: &SuiteVerdict) -> String {
    let mut out = String::new();
    let width = verdict
        .gates()
        .iter()
        .map(|g| g.gate().len())
        .max()
        .unwrap_or(0);
    for g in verdict.gates() {
        let status = if g.is_pass() { "PASS" } else { "FAIL" };
        let _ = write!(
            out,
            "   {status}  {:<width$}  {}/{} vectors",
            g.gate(),
            g.passed_count(),
            g.total()
        );
        if !g.is_pass() {
            let _ = write!(out, ", {} failed", g.failed_count());
        }
        if g.device_fault_count() > 0 {
            let _ = write!(out, " ({} device faults)", g.device_fault_count());
        }
        out.push('\n');
        for t in g.failures() {
            let _ = writeln!(out, "         {}", trial_line(g, t));
        }
        if g.omitted_failures() > 0 {
            let _ = writeln!(
                out,
                "         ... {} more failing vectors not shown",
                g.omitted_failures()
            );
        }
    }
    let failed_gates = verdict.failed_gates().count();
    let _ = writeln!(
        out,
        "\n   Result: {}: {} of {} gates passed, {} of {} vectors failed",
        if verdict.is_pass() { "PASS" } else { "FAIL" },
        verdict.gates().len() - failed_gates,
        verdict.gates().len(),
        verdict.failed_vectors(),
        verdict.total_vectors()
    );
    out
}

fn trial_line(g: &GateVerdict, t: &GateTrial) -> String {
    let stimulus = describe_ports(g.input_ports(), &t.stimulus);
    let expected = describe_ports(g.output_ports(), &t.expected);
    match (t.actual(), t.device_fault()) {
        (Some(actual), _) => format!(
            "#{}  {stimulus}  expected {expected}  actual {}",
            t.index,
            describe_ports(g.output_ports(), actual)
        ),
        (None, Some(fault)) => {
            format!("#{}  {stimulus}  expected {expected}  device fault: {fault}", t.index)
        }
        (None, None) => format!("#{}  {stimulus}  expected {expected}", t.index),
    }
}

fn trial_diagnostic(g: &GateVerdict, t: &GateTrial) -> Diagnostic {
    let location = Location::vector(g.gate(), t.index);
    let stimulus = format!("stimulus: {}", describe_ports(g.input_ports(), &t.stimulus));
    let expected = format!("expected: {}", describe_ports(g.output_ports(), &t.expected));
    match (t.actual(), t.device_fault()) {
        (_, Some(fault)) => {
            let code = if fault.is_timeout() {
                DiagnosticCode::DEVICE_TIMEOUT
            } else {
                DiagnosticCode::DEVICE_PROTOCOL
            };
            Diagnostic::error(code, fault.to_string(), location)
                .with_note(stimulus)
                .with_note(expected)
        }
        (actual, None) => {
            let actual = actual
                .map(|a| describe_ports(g.output_ports(), a))
                .unwrap_or_default();
            Diagnostic::error(
                DiagnosticCode::OUTPUT_MISMATCH,
                format!("{} output mismatch", g.gate()),
                location,
            )
            .with_note(stimulus)
            .with_note(expected)
            .with_note(format!("actual: {actual}"))
        }
    }
}
