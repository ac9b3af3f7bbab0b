//! Collects diagnostics from concurrent gate sweeps.

use crate::diagnostic::Diagnostic;
use crate::severity::Severity;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Diagnostics emitted during one run, in emission order.
///
/// Sweep workers share the sink by reference. Per-severity tallies are kept
/// beside the list so a verdict check never waits on the lock.
#[derive(Default)]
pub struct DiagnosticSink {
    emitted: Mutex<Vec<Diagnostic>>,
    tally: [AtomicUsize; 3],
}

impl DiagnosticSink {
    /// An empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a diagnostic.
    pub fn emit(&self, diag: Diagnostic) {
        self.tally[slot(diag.severity)].fetch_add(1, Ordering::Relaxed);
        self.emitted().push(diag);
    }

    /// How many diagnostics of `severity` have been emitted, including any
    /// already drained by [`take_all`](Self::take_all).
    pub fn count(&self, severity: Severity) -> usize {
        self.tally[slot(severity)].load(Ordering::Relaxed)
    }

    /// Returns `true` once any error has been emitted.
    pub fn has_errors(&self) -> bool {
        self.count(Severity::Error) > 0
    }

    /// Drains the collected diagnostics. The tallies are left alone.
    pub fn take_all(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.emitted())
    }

    /// A copy of what has been collected so far.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.emitted().clone()
    }

    fn emitted(&self) -> MutexGuard<'_, Vec<Diagnostic>> {
        self.emitted.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn slot(severity: Severity) -> usize {
    match severity {
        Severity::Note => 0,
        Severity::Warning => 1,
        Severity::Error => 2,
    }
}
