//! Trial results and their roll-up into gate and suite verdicts.

use crate::device::DeviceError;
use cellcheck_common::LogicVec;
use serde::Serialize;

/// What the device produced for one vector.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum TrialOutcome {
    /// The device settled and its outputs were sampled.
    Sampled {
        /// Outputs in declared port order.
        actual: LogicVec,
    },
    /// The device faulted instead of producing outputs.
    DeviceFault {
        /// The fault.
        error: DeviceError,
    },
}

/// One vector's comparison of actual against expected outputs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GateTrial {
    /// The gate archetype.
    pub gate: String,
    /// Position of the vector in the gate's sweep.
    pub index: usize,
    /// Inputs in declared port order.
    pub stimulus: LogicVec,
    /// Oracle outputs in declared port order.
    pub expected: LogicVec,
    /// What the device did.
    #[serde(flatten)]
    pub outcome: TrialOutcome,
    /// `true` if the sampled outputs match the expected ones.
    pub passed: bool,
}

impl GateTrial {
    /// Builds a trial and derives `passed`.
    ///
    /// A device fault never passes. An expected `X` is met by a sampled `X`
    /// or `Z`; known values must match exactly.
    pub fn new(
        gate: impl Into<String>,
        index: usize,
        stimulus: LogicVec,
        expected: LogicVec,
        outcome: TrialOutcome,
    ) -> Self {
        let passed = match &outcome {
            TrialOutcome::Sampled { actual } => expected.matches(actual),
            TrialOutcome::DeviceFault { .. } => false,
        };
        Self {
            gate: gate.into(),
            index,
            stimulus,
            expected,
            outcome,
            passed,
        }
    }

    /// The sampled outputs, unless the device faulted.
    pub fn actual(&self) -> Option<&LogicVec> {
        match &self.outcome {
            TrialOutcome::Sampled { actual } => Some(actual),
            TrialOutcome::DeviceFault { .. } => None,
        }
    }

    /// The device fault, if any.
    pub fn device_fault(&self) -> Option<&DeviceError> {
        match &self.outcome {
            TrialOutcome::Sampled { .. } => None,
            TrialOutcome::DeviceFault { error } => Some(error),
        }
    }
}

/// The result of sweeping one gate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GateVerdict {
    gate: String,
    input_ports: Vec<String>,
    output_ports: Vec<String>,
    total: usize,
    passed: usize,
    device_faults: usize,
    failures: Vec<GateTrial>,
}

impl GateVerdict {
    /// Starts an empty verdict that retains at most `failure_limit` failures.
    pub fn builder(
        gate: impl Into<String>,
        input_ports: Vec<String>,
        output_ports: Vec<String>,
        failure_limit: usize,
    ) -> VerdictBuilder {
        VerdictBuilder {
            verdict: GateVerdict {
                gate: gate.into(),
                input_ports,
                output_ports,
                total: 0,
                passed: 0,
                device_faults: 0,
                failures: Vec::new(),
            },
            failure_limit,
        }
    }

    /// The gate archetype.
    pub fn gate(&self) -> &str {
        &self.gate
    }

    /// Input port names in declared order.
    pub fn input_ports(&self) -> &[String] {
        &self.input_ports
    }

    /// Output port names in declared order.
    pub fn output_ports(&self) -> &[String] {
        &self.output_ports
    }

    /// Number of vectors run.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of vectors that passed.
    pub fn passed_count(&self) -> usize {
        self.passed
    }

    /// Number of vectors that failed, device faults included.
    pub fn failed_count(&self) -> usize {
        self.total - self.passed
    }

    /// Number of vectors that ended in a device fault.
    pub fn device_fault_count(&self) -> usize {
        self.device_faults
    }

    /// The first failing trials, in sweep order.
    pub fn failures(&self) -> &[GateTrial] {
        &self.failures
    }

    /// Number of failing trials not retained.
    pub fn omitted_failures(&self) -> usize {
        self.failed_count() - self.failures.len()
    }

    /// Returns `true` if every vector passed.
    pub fn is_pass(&self) -> bool {
        self.passed == self.total
    }
}

/// Accumulates trials into a [`GateVerdict`].
#[derive(Debug)]
pub struct VerdictBuilder {
    verdict: GateVerdict,
    failure_limit: usize,
}

impl VerdictBuilder {
    /// Records one trial.
    pub fn record(&mut self, trial: GateTrial) {
        let v = &mut self.verdict;
        v.total += 1;
        if trial.passed {
            v.passed += 1;
            return;
        }
        if trial.device_fault().is_some() {
            v.device_faults += 1;
        }
        if v.failures.len() < self.failure_limit {
            v.failures.push(trial);
        }
    }

    /// Finishes the verdict.
    pub fn finish(self) -> GateVerdict {
        self.verdict
    }
}

/// The verdict for a whole run: per-gate verdicts in registry order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SuiteVerdict {
    passed: bool,
    gates: Vec<GateVerdict>,
}

impl SuiteVerdict {
    /// Builds the suite verdict; it passes only if every gate passed.
    pub fn new(gates: Vec<GateVerdict>) -> Self {
        let passed = gates.iter().all(GateVerdict::is_pass);
        Self { passed, gates }
    }

    /// Returns `true` if every gate passed.
    pub fn is_pass(&self) -> bool {
        self.passed
    }

    /// Per-gate verdicts in registry order.
    pub fn gates(&self) -> &[GateVerdict] {
        &self.gates
    }

    /// Looks up one gate's verdict.
    pub fn gate(&self, name: &str) -> Option<&GateVerdict> {
        self.gates.iter().find(|g| g.gate == name)
    }

    /// Gates with at least one failing vector.
    pub fn failed_gates(&self) -> impl Iterator<Item = &GateVerdict> + '_ {
        self.gates.iter().filter(|g| !g.is_pass())
    }

    /// Total vectors run across all gates.
    pub fn total_vectors(&self) -> usize {
        self.gates.iter().map(GateVerdict::total).sum()
    }

    /// Total failing vectors across all gates.
    pub fn failed_vectors(&self) -> usize {
        self.gates.iter().map(GateVerdict::failed_count).sum()
    }
}
