//! `cellcheck run`: sweep gates through the functional emulator.
//!
//! Settings come from `cellcheck.toml` (or defaults), with command-line flags
//! taking precedence. The verdict goes to stdout in the chosen format;
//! progress lines and diagnostics go to stderr. Failing vectors get a VCD
//! trace unless tracing is disabled.

use std::error::Error;
use std::path::PathBuf;

use cellcheck_cells::GateRegistry;
use cellcheck_common::{Delay, GateFilter};
use cellcheck_config::{CellcheckConfig, PolicyKind};
use cellcheck_diagnostics::DiagnosticSink;
use cellcheck_harness::{exit_code, Harness, HarnessOptions, Reporter};
use cellcheck_sim::{FaultPlan, FaultRule, FunctionalDeviceLayer, VcdTraceCapture};

use crate::pipeline::{load_settings, render_diagnostics};
use crate::{GlobalArgs, PolicyArg, ReportFormat, RunArgs};

/// Runs the `cellcheck run` command.
///
/// Returns exit code 0 if every gate passed, 1 otherwise.
pub fn run(args: &RunArgs, global: &GlobalArgs) -> Result<i32, Box<dyn Error>> {
    let config = load_settings(global)?;
    execute(args, global, &config)
}

fn execute(
    args: &RunArgs,
    global: &GlobalArgs,
    config: &CellcheckConfig,
) -> Result<i32, Box<dyn Error>> {
    let registry = GateRegistry::standard();
    let options = harness_options(args, config)?;
    let settle = match &args.settle {
        Some(s) => s.parse::<Delay>()?,
        None => config.device.settle_time,
    };
    if settle.is_zero() {
        return Err("settle time must be greater than zero".into());
    }
    let faults = fault_plan(&args.inject, &registry)?;
    let tracing = config.trace.enabled && !args.no_trace;
    let mut device = FunctionalDeviceLayer::new(settle).with_faults(faults);
    if tracing {
        device = device.with_recording();
    }
    let format = args
        .format
        .map(cellcheck_harness::ReportFormat::from)
        .unwrap_or(config.report.format);

    if !global.quiet {
        eprintln!(
            "   Checking {} ({}, {} workers)",
            config.suite.name, options.policy, options.workers
        );
    }

    let sink = DiagnosticSink::new();
    let harness = Harness::new(&registry, options);
    let verdict = harness.run(&device, &sink)?;
    let reporter = Reporter::new(format);

    if tracing && !verdict.is_pass() {
        let dir = args
            .trace_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| config.trace.dir.clone());
        let capture = VcdTraceCapture::new(device.traces(), dir);
        let traces = reporter.capture_traces(&verdict, &capture, &sink);
        if global.verbose {
            for t in &traces {
                if let Some(path) = &t.path {
                    eprintln!("   Trace {} #{}: {}", t.gate, t.vector, path.display());
                }
            }
        } else if !global.quiet && !traces.is_empty() {
            eprintln!(
                "   Wrote {} trace(s) to {}",
                traces.len(),
                capture.dir().display()
            );
        }
    }

    let mut diagnostics = sink.take_all();
    if format == cellcheck_harness::ReportFormat::Text {
        diagnostics.extend(reporter.diagnostics(&verdict));
    }
    render_diagnostics(&diagnostics, global);

    let report = reporter.render(&verdict)?;
    match format {
        cellcheck_harness::ReportFormat::Text => {
            if !global.quiet {
                print!("{report}");
            }
        }
        cellcheck_harness::ReportFormat::Json => println!("{report}"),
    }

    Ok(exit_code(&verdict))
}

/// Merges command-line overrides into the configured harness options.
fn harness_options(
    args: &RunArgs,
    config: &CellcheckConfig,
) -> Result<HarnessOptions, Box<dyn Error>> {
    let mut options = config.harness_options()?;
    if !args.gates.is_empty() {
        options.filter = GateFilter::only(args.gates.iter().cloned());
    }
    if args.policy.is_some() || args.seed.is_some() || args.count.is_some() {
        let mut spec = config.stimulus.default.clone();
        if let Some(policy) = args.policy {
            spec.policy = policy.into();
        }
        if args.seed.is_some() {
            spec.seed = args.seed;
        }
        if args.count.is_some() {
            spec.count = args.count;
        }
        options.policy = spec.to_policy("stimulus")?;
    }
    if let Some(jobs) = args.jobs {
        options.workers = jobs;
    }
    if let Some(limit) = args.failure_limit {
        if limit == 0 {
            return Err("--failure-limit must be at least 1".into());
        }
        options.failure_limit = limit;
    }
    Ok(options)
}

/// Parses `--inject` specs. Every named gate must be registered.
fn fault_plan(specs: &[String], registry: &GateRegistry) -> Result<FaultPlan, Box<dyn Error>> {
    let mut plan = FaultPlan::new();
    for spec in specs {
        let rule: FaultRule = spec.parse()?;
        registry.lookup(&rule.gate)?;
        plan = plan.with(rule);
    }
    Ok(plan)
}

impl From<PolicyArg> for PolicyKind {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Exhaustive => PolicyKind::Exhaustive,
            PolicyArg::BoundedRandom => PolicyKind::BoundedRandom,
            PolicyArg::UnknownStates => PolicyKind::UnknownStates,
        }
    }
}

impl From<ReportFormat> for cellcheck_harness::ReportFormat {
    fn from(format: ReportFormat) -> Self {
        match format {
            ReportFormat::Text => cellcheck_harness::ReportFormat::Text,
            ReportFormat::Json => cellcheck_harness::ReportFormat::Json,
        }
    }
}
