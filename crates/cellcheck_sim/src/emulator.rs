//! The functional device layer.
//!
//! Each instance holds one value per port, all `X` until first driven.
//! `apply` validates and latches inputs at the current time; `sample`
//! advances time by the settle delay, evaluates the cell function, applies any
//! injected faults, and reports the outputs. A layer built with
//! [`FunctionalDeviceLayer::with_recording`] also logs every change into the
//! shared trace store.

use crate::error::SimError;
use crate::fault::{FaultKind, FaultPlan, FaultRule};
use crate::time::SimTime;
use crate::trace::{self, GateHistory, PortDirection, SharedTraceStore, TraceStore};
use cellcheck_cells::GateDescriptor;
use cellcheck_common::{Delay, Logic, LogicVec};
use cellcheck_harness::{DeviceError, DeviceInstance, DeviceLayer, PortAssignment};

/// Settle delay used when none is configured.
pub const DEFAULT_SETTLE: Delay = Delay::from_ns(10);

/// A [`DeviceLayer`] that evaluates cells in-process.
#[derive(Debug, Clone)]
pub struct FunctionalDeviceLayer {
    settle: Delay,
    faults: FaultPlan,
    traces: SharedTraceStore,
    recording: bool,
}

impl Default for FunctionalDeviceLayer {
    fn default() -> Self {
        Self::new(DEFAULT_SETTLE)
    }
}

impl FunctionalDeviceLayer {
    /// Creates a fault-free layer with the given settle delay.
    pub fn new(settle: Delay) -> Self {
        Self {
            settle,
            faults: FaultPlan::new(),
            traces: TraceStore::shared(),
            recording: false,
        }
    }

    /// Records signal histories so failing vectors can be traced afterwards.
    pub fn with_recording(mut self) -> Self {
        self.recording = true;
        self
    }

    /// Returns `true` if instances record into the trace store.
    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// Replaces the fault plan.
    pub fn with_faults(mut self, faults: FaultPlan) -> Self {
        self.faults = faults;
        self
    }

    /// The settle delay.
    pub fn settle(&self) -> Delay {
        self.settle
    }

    /// A handle to the trace store all instances record into.
    pub fn traces(&self) -> SharedTraceStore {
        self.traces.clone()
    }

    /// Creates a concrete instance for a descriptor.
    pub fn instance(&self, descriptor: &GateDescriptor) -> FunctionalInstance {
        FunctionalInstance::new(
            descriptor.clone(),
            self.settle,
            self.faults.for_gate(descriptor.name()),
            self.recording.then(|| self.traces.clone()),
        )
    }
}

impl DeviceLayer for FunctionalDeviceLayer {
    fn instantiate(
        &self,
        descriptor: &GateDescriptor,
    ) -> Result<Box<dyn DeviceInstance>, DeviceError> {
        Ok(Box::new(self.instance(descriptor)))
    }
}

/// One emulated cell.
#[derive(Debug)]
pub struct FunctionalInstance {
    id: String,
    descriptor: GateDescriptor,
    settle: Delay,
    faults: Vec<FaultRule>,
    traces: Option<SharedTraceStore>,
    inputs: Vec<Logic>,
    outputs: Vec<Logic>,
    now: SimTime,
    /// Vector index and settle deadline of the last `apply`, until sampled.
    pending: Option<(usize, SimTime)>,
    applied: usize,
}

impl FunctionalInstance {
    fn new(
        descriptor: GateDescriptor,
        settle: Delay,
        faults: Vec<FaultRule>,
        traces: Option<SharedTraceStore>,
    ) -> Self {
        let id = format!("u_{}", descriptor.name().to_ascii_lowercase());
        let inputs = vec![Logic::X; descriptor.input_ports().len()];
        let outputs = vec![Logic::X; descriptor.output_ports().len()];
        if let Some(store) = &traces {
            let ports = descriptor
                .input_ports()
                .iter()
                .map(|p| (p.clone(), PortDirection::Input))
                .chain(
                    descriptor
                        .output_ports()
                        .iter()
                        .map(|p| (p.clone(), PortDirection::Output)),
                )
                .collect();
            let mut history = GateHistory::new(id.clone(), ports);
            for port in 0..inputs.len() + outputs.len() {
                history.record(SimTime::zero(), port, Logic::X);
            }
            trace::lock(store).begin(descriptor.name(), history);
        }
        Self {
            id,
            descriptor,
            settle,
            faults,
            traces,
            inputs,
            outputs,
            now: SimTime::zero(),
            pending: None,
            applied: 0,
        }
    }

    /// The current emulated time.
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Current input values in port order.
    pub fn inputs(&self) -> LogicVec {
        self.inputs.iter().copied().collect()
    }

    /// Current output values in port order.
    pub fn outputs(&self) -> LogicVec {
        self.outputs.iter().copied().collect()
    }

    /// Checks that an assignment drives exactly the cell's inputs.
    fn latch(&self, assignment: &PortAssignment) -> Result<Vec<Logic>, SimError> {
        let ports = self.descriptor.input_ports();
        if let Some((port, _)) = assignment.iter().find(|(p, _)| !ports.iter().any(|q| q == p)) {
            return Err(SimError::UnknownPort {
                port: port.to_string(),
            });
        }
        ports
            .iter()
            .map(|port| {
                assignment
                    .get(port)
                    .ok_or_else(|| SimError::MissingPort { port: port.clone() })
            })
            .collect()
    }

    fn active_faults(&self, vector: usize) -> impl Iterator<Item = &FaultKind> + '_ {
        let gate = self.descriptor.name();
        self.faults
            .iter()
            .filter(move |r| r.applies(gate, vector))
            .map(|r| &r.kind)
    }

    fn output_index(&self, port: &str) -> Option<usize> {
        self.descriptor.output_ports().iter().position(|p| p == port)
    }

    /// Logs changes from `old` to `new` on ports numbered from `base`, and
    /// closes the vector when `end` is set. Does nothing unless recording.
    fn record(&self, base: usize, old: &[Logic], new: &[Logic], end: bool) {
        let Some(store) = &self.traces else {
            return;
        };
        let mut store = trace::lock(store);
        if let Some(h) = store.history_mut(self.descriptor.name()) {
            for (i, (&was, &now)) in old.iter().zip(new).enumerate() {
                if was != now {
                    h.record(self.now, base + i, now);
                }
            }
            if end {
                h.end_vector();
            }
        }
    }

    /// Latches new output values at `self.now` and closes the vector.
    fn settle_outputs(&mut self, next: Vec<Logic>) {
        self.record(self.inputs.len(), &self.outputs, &next, true);
        self.outputs = next;
    }
}

impl DeviceInstance for FunctionalInstance {
    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&mut self, assignment: &PortAssignment) -> Result<(), DeviceError> {
        let next = self
            .latch(assignment)
            .map_err(|e| DeviceError::protocol(&self.id, e.to_string()))?;
        self.record(0, &self.inputs, &next, false);
        self.inputs = next;
        self.pending = Some((self.applied, self.now.after(self.settle)));
        self.applied += 1;
        Ok(())
    }

    fn sample(&mut self) -> Result<PortAssignment, DeviceError> {
        let (vector, deadline) = self
            .pending
            .take()
            .ok_or_else(|| DeviceError::protocol(&self.id, "sample without a preceding apply"))?;
        self.now = deadline;

        let faults: Vec<FaultKind> = self.active_faults(vector).cloned().collect();
        if faults.contains(&FaultKind::Timeout) {
            let stale = self.outputs.clone();
            self.settle_outputs(stale);
            return Err(DeviceError::timeout(
                &self.id,
                format!("outputs did not settle within {}", self.settle),
            ));
        }

        let inputs = self.inputs();
        let mut next: Vec<Logic> = self
            .descriptor
            .evaluate(&inputs)
            .map_err(|e| DeviceError::protocol(&self.id, e.to_string()))?
            .iter()
            .collect();
        let mut malformed = false;
        for fault in &faults {
            match fault {
                FaultKind::Invert(None) => next.iter_mut().for_each(|v| *v = !*v),
                FaultKind::Invert(Some(port)) => {
                    if let Some(i) = self.output_index(port) {
                        next[i] = !next[i];
                    }
                }
                FaultKind::StuckAt(port, value) => {
                    if let Some(i) = self.output_index(port) {
                        next[i] = *value;
                    }
                }
                FaultKind::Protocol => malformed = true,
                FaultKind::Timeout => {}
            }
        }
        self.settle_outputs(next);
        if malformed {
            return Err(DeviceError::protocol(&self.id, "malformed sample response"));
        }
        Ok(PortAssignment::from_ports(
            self.descriptor.output_ports(),
            &self.outputs(),
        ))
    }
}
