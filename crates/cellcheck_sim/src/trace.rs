//! Recorded signal histories, shared between emulator instances and the
//! trace-capture hook.
//!
//! Each gate gets one [`GateHistory`]: its port list, every value change in
//! time order, and a mark after each completed vector. A capture for vector
//! `i` replays the changes up to and including mark `i`.

use crate::error::SimError;
use crate::time::SimTime;
use crate::waveform::{SignalId, VcdRecorder, WaveformRecorder};
use cellcheck_common::Logic;
use std::collections::HashMap;
use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A trace store shared across worker threads.
pub type SharedTraceStore = Arc<Mutex<TraceStore>>;

/// Whether a port is driven by the harness or by the cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PortDirection {
    /// Driven by `apply`.
    Input,
    /// Driven by the cell.
    Output,
}

/// One value change on one port.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Change {
    /// When the change happened.
    pub time: SimTime,
    /// Index into the history's port list.
    pub port: usize,
    /// The new value.
    pub value: Logic,
}

/// The recorded history of one gate instance.
#[derive(Clone, Debug)]
pub struct GateHistory {
    instance: String,
    ports: Vec<(String, PortDirection)>,
    changes: Vec<Change>,
    vector_ends: Vec<usize>,
}

impl GateHistory {
    /// Starts an empty history for an instance with the given ports.
    pub fn new(instance: impl Into<String>, ports: Vec<(String, PortDirection)>) -> Self {
        Self {
            instance: instance.into(),
            ports,
            changes: Vec::new(),
            vector_ends: Vec::new(),
        }
    }

    /// The instance name used as the VCD scope.
    pub fn instance(&self) -> &str {
        &self.instance
    }

    /// Port names and directions, inputs first.
    pub fn ports(&self) -> &[(String, PortDirection)] {
        &self.ports
    }

    /// Appends a value change.
    pub fn record(&mut self, time: SimTime, port: usize, value: Logic) {
        self.changes.push(Change { time, port, value });
    }

    /// Marks the end of the current vector.
    pub fn end_vector(&mut self) {
        self.vector_ends.push(self.changes.len());
    }

    /// Number of completed vectors.
    pub fn vectors(&self) -> usize {
        self.vector_ends.len()
    }

    /// Every change up to and including the end of `vector`.
    pub fn changes_through(&self, vector: usize) -> Option<&[Change]> {
        self.vector_ends.get(vector).map(|&end| &self.changes[..end])
    }

    /// Writes the history through `vector` as a VCD file.
    ///
    /// Returns `Ok(false)` if `vector` was never completed.
    pub fn write_vcd<W: Write>(&self, vector: usize, writer: W) -> Result<bool, SimError> {
        let Some(changes) = self.changes_through(vector) else {
            return Ok(false);
        };
        let mut rec = VcdRecorder::new(writer);
        rec.begin_scope(&self.instance)?;
        for (i, (name, _)) in self.ports.iter().enumerate() {
            rec.register_signal(SignalId(i as u32), name)?;
        }
        rec.end_scope()?;
        for change in changes {
            rec.record_change(change.time.fs, SignalId(change.port as u32), change.value)?;
        }
        rec.finalize()?;
        Ok(true)
    }
}

/// Histories for every instantiated gate, keyed by gate name.
#[derive(Debug, Default)]
pub struct TraceStore {
    histories: HashMap<String, GateHistory>,
}

impl TraceStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store wrapped for sharing.
    pub fn shared() -> SharedTraceStore {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Starts a fresh history for a gate, replacing any earlier one.
    pub fn begin(&mut self, gate: impl Into<String>, history: GateHistory) {
        self.histories.insert(gate.into(), history);
    }

    /// The history of a gate.
    pub fn history(&self, gate: &str) -> Option<&GateHistory> {
        self.histories.get(gate)
    }

    /// The history of a gate, for appending.
    pub fn history_mut(&mut self, gate: &str) -> Option<&mut GateHistory> {
        self.histories.get_mut(gate)
    }

    /// Number of gates with a history.
    pub fn len(&self) -> usize {
        self.histories.len()
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.histories.is_empty()
    }
}

/// Locks a shared store, recovering the data if a holder panicked.
pub(crate) fn lock(store: &SharedTraceStore) -> MutexGuard<'_, TraceStore> {
    store.lock().unwrap_or_else(PoisonError::into_inner)
}
