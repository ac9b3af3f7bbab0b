//! Fail-soft sweeps: injected faults show up exactly where they were
//! injected, and nothing else changes.

use cellcheck_cells::{CellError, GateDescriptor, GateFunction, GateRegistry};
use cellcheck_common::{Logic, VectorPolicy};
use cellcheck_conformance::{
    clean_device, faulty_device, make_config, options, run_registry, run_standard,
};
use cellcheck_harness::{
    exit_code, DeviceError, DeviceInstance, DeviceLayer, HarnessError, HarnessOptions,
};
use cellcheck_sim::{FaultKind, FaultPlan, FaultRule};

#[test]
fn clean_suite_passes_and_exits_zero() {
    let run = run_standard(&clean_device(), options(&[], VectorPolicy::Exhaustive)).unwrap();
    assert!(run.verdict.is_pass());
    assert_eq!(run.verdict.failed_vectors(), 0);
    assert_eq!(exit_code(&run.verdict), 0);
}

#[test]
fn single_wrong_response_is_isolated() {
    let rule: FaultRule = "AOI21:5".parse().unwrap();
    let device = faulty_device(FaultPlan::new().with(rule));
    let run = run_standard(&device, options(&[], VectorPolicy::Exhaustive)).unwrap();

    assert!(!run.verdict.is_pass());
    assert_eq!(exit_code(&run.verdict), 1);
    let failed: Vec<&str> = run.verdict.failed_gates().map(|g| g.gate()).collect();
    assert_eq!(failed, ["AOI21"]);

    let aoi = run.verdict.gate("AOI21").unwrap();
    assert_eq!(aoi.total(), 8);
    assert_eq!(aoi.passed_count(), 7);
    assert_eq!(aoi.device_fault_count(), 0);
    let trial = &aoi.failures()[0];
    assert_eq!(trial.index, 5);
    assert_eq!(trial.stimulus.to_string(), "101");
    assert_eq!(trial.expected.to_string(), "0");
    assert_eq!(trial.actual().unwrap().to_string(), "1");
}

#[test]
fn timeout_does_not_abort_the_sweep() {
    let device =
        faulty_device(FaultPlan::new().inject("NAND2", Some(1), FaultKind::Timeout));
    let run = run_standard(
        &device,
        options(&["NAND2", "NOR2"], VectorPolicy::Exhaustive),
    )
    .unwrap();

    let nand = run.verdict.gate("NAND2").unwrap();
    assert_eq!(nand.total(), 4);
    assert_eq!(nand.failed_count(), 1);
    assert_eq!(nand.device_fault_count(), 1);
    let fault = nand.failures()[0].device_fault().unwrap();
    assert!(fault.is_timeout());
    assert_eq!(nand.failures()[0].index, 1);

    assert!(run.verdict.gate("NOR2").unwrap().is_pass());
    assert!(!run.verdict.is_pass());
}

#[test]
fn protocol_fault_is_recorded() {
    let device = faulty_device(FaultPlan::new().inject("XOR3", Some(7), FaultKind::Protocol));
    let run = run_standard(&device, options(&["XOR3"], VectorPolicy::Exhaustive)).unwrap();
    let xor = run.verdict.gate("XOR3").unwrap();
    assert_eq!(xor.failed_count(), 1);
    assert!(matches!(
        xor.failures()[0].device_fault(),
        Some(DeviceError::Protocol { .. })
    ));
}

#[test]
fn stuck_output_fails_only_where_it_differs() {
    let device = faulty_device(FaultPlan::new().inject(
        "AND2",
        None,
        FaultKind::StuckAt("Z".into(), Logic::Zero),
    ));
    let run = run_standard(&device, options(&["AND2"], VectorPolicy::Exhaustive)).unwrap();
    let and = run.verdict.gate("AND2").unwrap();
    assert_eq!(and.passed_count(), 3);
    assert_eq!(and.failures()[0].index, 3);
}

#[test]
fn failure_list_is_bounded() {
    let device = faulty_device(FaultPlan::new().inject("AND4", None, FaultKind::Invert(None)));
    let opts = HarnessOptions {
        failure_limit: 4,
        ..options(&["AND4"], VectorPolicy::Exhaustive)
    };
    let run = run_standard(&device, opts).unwrap();
    let and = run.verdict.gate("AND4").unwrap();
    assert_eq!(and.failed_count(), 16);
    assert_eq!(and.failures().len(), 4);
    assert_eq!(and.omitted_failures(), 12);
    let first: Vec<usize> = and.failures().iter().map(|t| t.index).collect();
    assert_eq!(first, [0, 1, 2, 3]);
}

/// A device that must never be reached.
struct Untouchable;

impl DeviceLayer for Untouchable {
    fn instantiate(
        &self,
        descriptor: &GateDescriptor,
    ) -> Result<Box<dyn DeviceInstance>, DeviceError> {
        panic!("device touched for {}", descriptor.name());
    }
}

#[test]
fn unknown_gate_is_fatal_before_device_use() {
    let err = run_standard(&Untouchable, options(&["AOI21", "NAND9"], VectorPolicy::Exhaustive))
        .err()
        .unwrap();
    assert!(matches!(
        err,
        HarnessError::Cell(CellError::UnknownGate(ref name)) if name == "NAND9"
    ));
}

#[test]
fn misspelled_override_is_fatal_before_device_use() {
    let config = make_config(
        "[suite]\ngates = [\"AOI222\"]\n\n[stimulus.overrides.AOI2222]\npolicy = \"unknown-states\"\n",
    )
    .unwrap();
    let err = run_standard(&Untouchable, config.harness_options().unwrap())
        .err()
        .unwrap();
    assert!(matches!(
        err,
        HarnessError::Cell(CellError::UnknownGate(ref name)) if name == "AOI2222"
    ));
}

#[test]
fn zero_count_is_fatal_before_device_use() {
    let err = run_standard(
        &Untouchable,
        options(&["INV"], VectorPolicy::BoundedRandom { seed: 0, count: 0 }),
    )
    .err()
    .unwrap();
    assert!(matches!(err, HarnessError::Stimulus { ref gate, .. } if gate == "INV"));
}

#[test]
fn duplicate_registration_is_rejected() {
    let mut registry = GateRegistry::standard();
    let err = registry
        .register(GateDescriptor::standard("INV", GateFunction::Inv))
        .unwrap_err();
    assert_eq!(err, CellError::DuplicateGate("INV".into()));
}

#[test]
fn custom_registry_runs_in_registration_order() {
    let mut registry = GateRegistry::new();
    registry
        .register(GateDescriptor::standard("BUFN", GateFunction::Inv))
        .unwrap();
    registry
        .register(GateDescriptor::standard("AND5", GateFunction::And(5)))
        .unwrap();
    let run = run_registry(&registry, &clean_device(), options(&[], VectorPolicy::Exhaustive))
        .unwrap();
    let names: Vec<&str> = run.verdict.gates().iter().map(|g| g.gate()).collect();
    assert_eq!(names, ["BUFN", "AND5"]);
    assert_eq!(run.verdict.total_vectors(), 2 + 32);
    assert!(run.verdict.is_pass());
}
