//! Per-gate sweeps and their aggregation into a [`SuiteVerdict`].
//!
//! A run has two phases. Planning selects gates and builds every stimulus set;
//! any error there is fatal and happens before a device is touched. Sweeping
//! then drives each gate's instance vector by vector. Gates are independent
//! and run on a fixed-size worker pool, but results are always collected in
//! registry order.

use crate::device::{DeviceError, DeviceInstance, DeviceLayer, PortAssignment};
use crate::error::HarnessError;
use crate::stimulus::StimulusSet;
use crate::verdict::{GateTrial, GateVerdict, SuiteVerdict, TrialOutcome};
use cellcheck_cells::{oracle, GateDescriptor, GateRegistry};
use cellcheck_common::{GateFilter, LogicVec, VectorPolicy};
use cellcheck_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink, Location};
use rayon::prelude::*;
use std::collections::BTreeMap;

/// Failing trials retained per gate unless configured otherwise.
pub const DEFAULT_FAILURE_LIMIT: usize = 16;

/// Options for one harness run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HarnessOptions {
    /// Vector policy for gates without an override.
    pub policy: VectorPolicy,
    /// Per-gate policy overrides, keyed by gate name.
    pub overrides: BTreeMap<String, VectorPolicy>,
    /// Which gates to sweep.
    pub filter: GateFilter,
    /// Failing trials retained per gate.
    pub failure_limit: usize,
    /// Worker threads for per-gate sweeps.
    pub workers: usize,
}

impl Default for HarnessOptions {
    fn default() -> Self {
        Self {
            policy: VectorPolicy::default(),
            overrides: BTreeMap::new(),
            filter: GateFilter::default(),
            failure_limit: DEFAULT_FAILURE_LIMIT,
            workers: default_workers(),
        }
    }
}

impl HarnessOptions {
    /// The policy that applies to a gate.
    pub fn policy_for(&self, gate: &str) -> &VectorPolicy {
        self.overrides.get(gate).unwrap_or(&self.policy)
    }
}

/// Number of workers used when none is configured.
pub fn default_workers() -> usize {
    std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get)
}

/// A gate and the stimulus it will be swept with.
#[derive(Clone, Debug)]
pub struct GatePlan<'r> {
    /// The gate.
    pub descriptor: &'r GateDescriptor,
    /// Its vectors.
    pub stimulus: StimulusSet,
}

/// Drives a registry's gates through a device layer.
pub struct Harness<'r> {
    registry: &'r GateRegistry,
    options: HarnessOptions,
}

impl<'r> Harness<'r> {
    /// Creates a harness over a registry. The registry stays borrowed for
    /// the harness's lifetime, so it cannot change during a run.
    pub fn new(registry: &'r GateRegistry, options: HarnessOptions) -> Self {
        Self { registry, options }
    }

    /// The run options.
    pub fn options(&self) -> &HarnessOptions {
        &self.options
    }

    /// Selects gates and builds their stimulus sets.
    ///
    /// Emits a warning for every bounded-random request larger than the
    /// gate's vector space.
    pub fn plan(&self, sink: &DiagnosticSink) -> Result<Vec<GatePlan<'r>>, HarnessError> {
        if self.options.workers == 0 {
            return Err(HarnessError::InvalidOption(
                "workers must be at least 1".into(),
            ));
        }
        if self.options.failure_limit == 0 {
            return Err(HarnessError::InvalidOption(
                "failure_limit must be at least 1".into(),
            ));
        }
        if self.options.filter.names().is_some_and(|names| names.is_empty()) {
            return Err(HarnessError::InvalidOption(
                "gate filter names no gates".into(),
            ));
        }
        for gate in self.options.overrides.keys() {
            self.registry.lookup(gate)?;
        }
        let mut plans = Vec::new();
        for descriptor in self.registry.select(&self.options.filter)? {
            let policy = self.options.policy_for(descriptor.name());
            let stimulus = StimulusSet::for_policy(descriptor.arity(), policy).map_err(|source| {
                HarnessError::Stimulus {
                    gate: descriptor.name().to_string(),
                    source,
                }
            })?;
            if stimulus.was_clamped() {
                sink.emit(
                    Diagnostic::warning(
                        DiagnosticCode::VECTOR_COUNT_CLAMPED,
                        format!(
                            "requested {} vectors but {} has only {}",
                            stimulus.requested().unwrap_or_default(),
                            descriptor.name(),
                            stimulus.len()
                        ),
                        Location::gate(descriptor.name()),
                    )
                    .with_note("every vector is run once"),
                );
            }
            plans.push(GatePlan {
                descriptor,
                stimulus,
            });
        }
        Ok(plans)
    }

    /// Plans and sweeps every selected gate.
    pub fn run(
        &self,
        device: &dyn DeviceLayer,
        sink: &DiagnosticSink,
    ) -> Result<SuiteVerdict, HarnessError> {
        let plans = self.plan(sink)?;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.options.workers)
            .build()
            .map_err(|e| HarnessError::WorkerPool(e.to_string()))?;
        let limit = self.options.failure_limit;
        let gates = pool.install(|| {
            plans
                .par_iter()
                .map(|plan| sweep_gate(plan, device, limit))
                .collect::<Result<Vec<_>, _>>()
        })?;
        Ok(SuiteVerdict::new(gates))
    }
}

/// Sweeps one gate's vectors through a fresh device instance, in order.
///
/// Mismatches and device faults become failing trials and never stop the
/// sweep. If the instance cannot be created, every vector is recorded as a
/// device fault.
pub fn sweep_gate(
    plan: &GatePlan<'_>,
    device: &dyn DeviceLayer,
    failure_limit: usize,
) -> Result<GateVerdict, HarnessError> {
    let d = plan.descriptor;
    let mut verdict = GateVerdict::builder(
        d.name(),
        d.input_ports().to_vec(),
        d.output_ports().to_vec(),
        failure_limit,
    );
    let mut instance = device.instantiate(d);
    for (index, stimulus) in plan.stimulus.iter().enumerate() {
        let expected = oracle::evaluate(d, &stimulus)?;
        let outcome = match instance.as_mut() {
            Ok(inst) => match drive(inst.as_mut(), d, &stimulus) {
                Ok(actual) => TrialOutcome::Sampled { actual },
                Err(error) => TrialOutcome::DeviceFault { error },
            },
            Err(error) => TrialOutcome::DeviceFault {
                error: error.clone(),
            },
        };
        verdict.record(GateTrial::new(d.name(), index, stimulus, expected, outcome));
    }
    Ok(verdict.finish())
}

/// One atomic apply/sample round trip.
fn drive(
    instance: &mut dyn DeviceInstance,
    descriptor: &GateDescriptor,
    stimulus: &LogicVec,
) -> Result<LogicVec, DeviceError> {
    instance.apply(&PortAssignment::from_ports(descriptor.input_ports(), stimulus))?;
    let sampled = instance.sample()?;
    sampled
        .project(descriptor.output_ports())
        .map_err(|detail| DeviceError::protocol(instance.id(), detail))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellcheck_cells::{CellError, GateFunction};
    use cellcheck_common::Logic;

    /// Evaluates the oracle, optionally corrupting or faulting one vector.
    struct Model {
        corrupt: Option<(String, usize)>,
        timeout: Option<(String, usize)>,
    }

    struct ModelInstance {
        descriptor: GateDescriptor,
        corrupt: Option<usize>,
        timeout: Option<usize>,
        applied: usize,
        inputs: LogicVec,
    }

    impl DeviceLayer for Model {
        fn instantiate(
            &self,
            descriptor: &GateDescriptor,
        ) -> Result<Box<dyn DeviceInstance>, DeviceError> {
            let pick = |f: &Option<(String, usize)>| {
                f.as_ref()
                    .filter(|(g, _)| g == descriptor.name())
                    .map(|&(_, i)| i)
            };
            Ok(Box::new(ModelInstance {
                descriptor: descriptor.clone(),
                corrupt: pick(&self.corrupt),
                timeout: pick(&self.timeout),
                applied: 0,
                inputs: LogicVec::new(0),
            }))
        }
    }

    impl DeviceInstance for ModelInstance {
        fn id(&self) -> &str {
            self.descriptor.name()
        }

        fn apply(&mut self, assignment: &PortAssignment) -> Result<(), DeviceError> {
            self.inputs = assignment.iter().map(|(_, v)| v).collect();
            self.applied += 1;
            Ok(())
        }

        fn sample(&mut self) -> Result<PortAssignment, DeviceError> {
            let index = self.applied - 1;
            if self.timeout == Some(index) {
                return Err(DeviceError::timeout(self.id(), "no settle"));
            }
            let mut out = self.descriptor.evaluate(&self.inputs).unwrap();
            if self.corrupt == Some(index) {
                out.set(0, !out.get(0));
            }
            Ok(PortAssignment::from_ports(
                self.descriptor.output_ports(),
                &out,
            ))
        }
    }

    struct Unavailable;

    impl DeviceLayer for Unavailable {
        fn instantiate(
            &self,
            descriptor: &GateDescriptor,
        ) -> Result<Box<dyn DeviceInstance>, DeviceError> {
            Err(DeviceError::protocol(descriptor.name(), "no such cell"))
        }
    }

    fn options(workers: usize) -> HarnessOptions {
        HarnessOptions {
            workers,
            ..HarnessOptions::default()
        }
    }

    fn clean() -> Model {
        Model {
            corrupt: None,
            timeout: None,
        }
    }

    #[test]
    fn clean_device_passes_every_gate() {
        let registry = GateRegistry::standard();
        let sink = DiagnosticSink::new();
        let verdict = Harness::new(&registry, options(4))
            .run(&clean(), &sink)
            .unwrap();
        assert!(verdict.is_pass());
        assert_eq!(verdict.gates().len(), registry.len());
        let order: Vec<&str> = verdict.gates().iter().map(|g| g.gate()).collect();
        let expected: Vec<&str> = registry.all().map(|d| d.name()).collect();
        assert_eq!(order, expected);
        assert_eq!(verdict.gate("AOI222").unwrap().total(), 64);
    }

    #[test]
    fn single_corruption_is_isolated() {
        let registry = GateRegistry::standard();
        let device = Model {
            corrupt: Some(("AOI21".into(), 5)),
            timeout: None,
        };
        let verdict = Harness::new(&registry, options(2))
            .run(&device, &DiagnosticSink::new())
            .unwrap();
        assert!(!verdict.is_pass());
        let failed: Vec<&str> = verdict.failed_gates().map(|g| g.gate()).collect();
        assert_eq!(failed, vec!["AOI21"]);
        let aoi = verdict.gate("AOI21").unwrap();
        assert_eq!(aoi.failed_count(), 1);
        let trial = &aoi.failures()[0];
        assert_eq!(trial.index, 5);
        assert_eq!(trial.stimulus.to_string(), "101");
        assert_eq!(trial.expected.to_string(), "0");
        assert_eq!(trial.actual().unwrap().to_string(), "1");
    }

    #[test]
    fn timeout_does_not_abort_sweep() {
        let registry = GateRegistry::standard();
        let device = Model {
            corrupt: None,
            timeout: Some(("NAND2".into(), 0)),
        };
        let verdict = Harness::new(&registry, options(1))
            .run(&device, &DiagnosticSink::new())
            .unwrap();
        let nand = verdict.gate("NAND2").unwrap();
        assert_eq!(nand.total(), 4);
        assert_eq!(nand.passed_count(), 3);
        assert_eq!(nand.device_fault_count(), 1);
        assert!(verdict.gate("NAND3").unwrap().is_pass());
    }

    #[test]
    fn unavailable_instance_faults_every_vector() {
        let registry = GateRegistry::standard();
        let opts = HarnessOptions {
            filter: GateFilter::only(["INV"]),
            ..options(1)
        };
        let verdict = Harness::new(&registry, opts)
            .run(&Unavailable, &DiagnosticSink::new())
            .unwrap();
        let inv = verdict.gate("INV").unwrap();
        assert_eq!(inv.total(), 2);
        assert_eq!(inv.device_fault_count(), 2);
    }

    #[test]
    fn unknown_filter_name_is_fatal() {
        let registry = GateRegistry::standard();
        let opts = HarnessOptions {
            filter: GateFilter::only(["NAND5"]),
            ..options(1)
        };
        let err = Harness::new(&registry, opts)
            .run(&clean(), &DiagnosticSink::new())
            .unwrap_err();
        assert!(matches!(err, HarnessError::Cell(_)));
    }

    #[test]
    fn clamped_count_warns() {
        let registry = GateRegistry::standard();
        let opts = HarnessOptions {
            policy: VectorPolicy::BoundedRandom { seed: 3, count: 10 },
            filter: GateFilter::only(["INV"]),
            ..options(1)
        };
        let sink = DiagnosticSink::new();
        let verdict = Harness::new(&registry, opts).run(&clean(), &sink).unwrap();
        assert_eq!(verdict.gate("INV").unwrap().total(), 2);
        let diags = sink.diagnostics();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, DiagnosticCode::VECTOR_COUNT_CLAMPED);
    }

    #[test]
    fn overrides_apply_per_gate() {
        let registry = GateRegistry::standard();
        let mut opts = HarnessOptions {
            filter: GateFilter::only(["AND2", "MUX2"]),
            ..options(2)
        };
        opts.overrides.insert("MUX2".into(), VectorPolicy::UnknownStates);
        let verdict = Harness::new(&registry, opts)
            .run(&clean(), &DiagnosticSink::new())
            .unwrap();
        assert_eq!(verdict.gate("AND2").unwrap().total(), 4);
        assert_eq!(verdict.gate("MUX2").unwrap().total(), 27);
        assert!(verdict.is_pass());
    }

    #[test]
    fn wrong_output_port_is_protocol_fault() {
        struct Misnamed;
        struct MisnamedInstance;
        impl DeviceLayer for Misnamed {
            fn instantiate(
                &self,
                _: &GateDescriptor,
            ) -> Result<Box<dyn DeviceInstance>, DeviceError> {
                Ok(Box::new(MisnamedInstance))
            }
        }
        impl DeviceInstance for MisnamedInstance {
            fn id(&self) -> &str {
                "u_inv"
            }
            fn apply(&mut self, _: &PortAssignment) -> Result<(), DeviceError> {
                Ok(())
            }
            fn sample(&mut self) -> Result<PortAssignment, DeviceError> {
                let mut out = PortAssignment::new();
                out.set("Y", Logic::One);
                Ok(out)
            }
        }

        let registry = GateRegistry::standard();
        let d = registry.lookup("INV").unwrap();
        let plan = GatePlan {
            descriptor: d,
            stimulus: crate::stimulus::generate(1).unwrap(),
        };
        let verdict = sweep_gate(&plan, &Misnamed, 16).unwrap();
        assert_eq!(verdict.device_fault_count(), 2);
        let fault = verdict.failures()[0].device_fault().unwrap();
        assert_eq!(
            fault,
            &DeviceError::protocol("u_inv", "unexpected port 'Y'")
        );
    }

    #[test]
    fn zero_workers_rejected() {
        let registry = GateRegistry::standard();
        let err = Harness::new(&registry, options(0))
            .plan(&DiagnosticSink::new())
            .unwrap_err();
        assert!(matches!(err, HarnessError::InvalidOption(_)));
    }

    #[test]
    fn zero_failure_limit_rejected() {
        let registry = GateRegistry::standard();
        let opts = HarnessOptions {
            failure_limit: 0,
            ..options(1)
        };
        let err = Harness::new(&registry, opts)
            .plan(&DiagnosticSink::new())
            .unwrap_err();
        assert!(matches!(err, HarnessError::InvalidOption(ref m) if m.contains("failure_limit")));
    }

    #[test]
    fn empty_gate_filter_rejected() {
        let registry = GateRegistry::standard();
        let opts = HarnessOptions {
            filter: GateFilter::only(Vec::<String>::new()),
            ..options(1)
        };
        let err = Harness::new(&registry, opts)
            .run(&clean(), &DiagnosticSink::new())
            .unwrap_err();
        assert!(matches!(err, HarnessError::InvalidOption(_)));
    }

    #[test]
    fn override_for_unregistered_gate_is_fatal() {
        let registry = GateRegistry::standard();
        let mut opts = HarnessOptions {
            filter: GateFilter::only(["AOI222"]),
            ..options(1)
        };
        opts.overrides
            .insert("AOI2222".into(), VectorPolicy::UnknownStates);
        let err = Harness::new(&registry, opts)
            .plan(&DiagnosticSink::new())
            .unwrap_err();
        assert!(matches!(
            err,
            HarnessError::Cell(CellError::UnknownGate(ref name)) if name == "AOI2222"
        ));
    }

    #[test]
    fn custom_registry_is_swept() {
        let mut registry = GateRegistry::new();
        registry
            .register(GateDescriptor::standard("XOR4", GateFunction::Xor(4)))
            .unwrap();
        let verdict = Harness::new(&registry, options(1))
            .run(&clean(), &DiagnosticSink::new())
            .unwrap();
        assert_eq!(verdict.gate("XOR4").unwrap().total(), 16);
    }
}
