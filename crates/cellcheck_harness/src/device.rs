//! The device-layer interface.
//!
//! The harness never builds or wires a device itself. It asks a
//! [`DeviceLayer`] for one [`DeviceInstance`] per gate and drives it through
//! named ports. Trace capture is a separate, optional hook
//! ([`TraceCapture`]) so a device layer without waveform support can still
//! be verified.

use cellcheck_cells::GateDescriptor;
use cellcheck_common::{Logic, LogicVec};
use serde::Serialize;
use std::path::PathBuf;

/// A device fault observed while driving one vector.
///
/// These never abort a sweep; the comparator records them as failing trials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DeviceError {
    /// The device did not settle within its time budget.
    #[error("instance '{instance}' timed out: {detail}")]
    Timeout {
        /// The instance identifier.
        instance: String,
        /// What the device was waiting for.
        detail: String,
    },

    /// The device rejected a port or returned a malformed response.
    #[error("instance '{instance}' protocol error: {detail}")]
    Protocol {
        /// The instance identifier.
        instance: String,
        /// What went wrong.
        detail: String,
    },
}

impl DeviceError {
    /// Creates a [`DeviceError::Timeout`].
    pub fn timeout(instance: impl Into<String>, detail: impl Into<String>) -> Self {
        DeviceError::Timeout {
            instance: instance.into(),
            detail: detail.into(),
        }
    }

    /// Creates a [`DeviceError::Protocol`].
    pub fn protocol(instance: impl Into<String>, detail: impl Into<String>) -> Self {
        DeviceError::Protocol {
            instance: instance.into(),
            detail: detail.into(),
        }
    }

    /// Returns `true` for timeouts.
    pub fn is_timeout(&self) -> bool {
        matches!(self, DeviceError::Timeout { .. })
    }
}

/// Errors from the optional trace-capture hook.
#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    /// Writing the trace failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No recorded history exists for the requested vector.
    #[error("no recorded history for {gate} vector {vector}")]
    NoHistory {
        /// The gate archetype.
        gate: String,
        /// The vector index.
        vector: usize,
    },

    /// The device layer does not support this trace request.
    #[error("trace capture unsupported: {0}")]
    Unsupported(String),
}

/// An ordered assignment of logic values to named ports.
///
/// Port names are exact and case-sensitive.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PortAssignment {
    entries: Vec<(String, Logic)>,
}

impl PortAssignment {
    /// Creates an empty assignment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pairs port names with the values of a vector, position by position.
    pub fn from_ports(ports: &[String], values: &LogicVec) -> Self {
        Self {
            entries: ports.iter().cloned().zip(values.iter()).collect(),
        }
    }

    /// Sets a port, replacing any earlier value for the same name.
    pub fn set(&mut self, port: impl Into<String>, value: Logic) {
        let port = port.into();
        match self.entries.iter_mut().find(|(name, _)| *name == port) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((port, value)),
        }
    }

    /// Looks up a port's value.
    pub fn get(&self, port: &str) -> Option<Logic> {
        self.entries
            .iter()
            .find(|(name, _)| name == port)
            .map(|&(_, value)| value)
    }

    /// Iterates `(port, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Logic)> + '_ {
        self.entries.iter().map(|(name, value)| (name.as_str(), *value))
    }

    /// Number of assigned ports.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no ports are assigned.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reorders the assignment into a vector over `ports`.
    ///
    /// Fails with a description of the first missing or unexpected port.
    pub fn project(&self, ports: &[String]) -> Result<LogicVec, String> {
        if let Some((extra, _)) = self.entries.iter().find(|(name, _)| !ports.contains(name)) {
            return Err(format!("unexpected port '{extra}'"));
        }
        ports
            .iter()
            .map(|port| self.get(port).ok_or_else(|| format!("missing port '{port}'")))
            .collect()
    }
}

/// One live, exclusively-driven instance of a gate.
///
/// Each `apply`/`sample` pair is atomic from the harness's view: `sample`
/// returns the outputs after the device settled from the last `apply`.
pub trait DeviceInstance {
    /// A stable identifier for diagnostics.
    fn id(&self) -> &str;

    /// Drives the named input ports.
    fn apply(&mut self, assignment: &PortAssignment) -> Result<(), DeviceError>;

    /// Reads the named output ports once the device has settled.
    fn sample(&mut self) -> Result<PortAssignment, DeviceError>;
}

/// Hands out device instances for gate descriptors.
///
/// Shared across worker threads; each worker owns the instance it receives.
pub trait DeviceLayer: Sync {
    /// Creates the instance that will receive a gate's whole sweep.
    fn instantiate(
        &self,
        descriptor: &GateDescriptor,
    ) -> Result<Box<dyn DeviceInstance>, DeviceError>;
}

/// Optional hook for dumping debug waveforms of failing vectors.
pub trait TraceCapture {
    /// Captures the trace for one vector of one gate.
    ///
    /// Returns where the trace was written, if it has a location.
    fn capture_trace(
        &self,
        gate: &str,
        vector_index: usize,
    ) -> Result<Option<PathBuf>, TraceError>;
}
