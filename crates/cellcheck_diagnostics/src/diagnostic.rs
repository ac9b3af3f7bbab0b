//! Structured diagnostic messages with severity, codes, location, and notes.

use crate::code::DiagnosticCode;
use crate::severity::Severity;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where in a run a diagnostic applies: a gate, and optionally one vector.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Gate archetype name.
    pub gate: Option<String>,
    /// Zero-based vector index within the gate's sweep.
    pub vector: Option<usize>,
}

impl Location {
    /// A location covering the whole run.
    pub const NONE: Location = Location {
        gate: None,
        vector: None,
    };

    /// A location covering one gate.
    pub fn gate(name: impl Into<String>) -> Self {
        Self {
            gate: Some(name.into()),
            vector: None,
        }
    }

    /// A location covering one vector of one gate.
    pub fn vector(name: impl Into<String>, index: usize) -> Self {
        Self {
            gate: Some(name.into()),
            vector: Some(index),
        }
    }

    /// Returns `true` if the location names nothing.
    pub fn is_none(&self) -> bool {
        self.gate.is_none()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.gate, self.vector) {
            (Some(gate), Some(vector)) => write!(f, "{gate} #{vector}"),
            (Some(gate), None) => write!(f, "{gate}"),
            (None, _) => write!(f, "<suite>"),
        }
    }
}

/// A structured diagnostic message.
///
/// Each diagnostic includes:
/// - A severity level and unique code
/// - A primary message and the gate/vector it concerns
/// - Optional notes (stimulus, expected, actual) and help text
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The severity level of this diagnostic.
    pub severity: Severity,
    /// The code identifying the kind of diagnostic.
    pub code: DiagnosticCode,
    /// The main diagnostic message.
    pub message: String,
    /// The gate and vector this diagnostic concerns.
    pub location: Location,
    /// Explanatory footnotes (e.g., "note: ...").
    pub notes: Vec<String>,
    /// Actionable suggestions (e.g., "help: ...").
    pub help: Vec<String>,
}

impl Diagnostic {
    /// Creates a new error diagnostic.
    pub fn error(code: DiagnosticCode, message: impl Into<String>, location: Location) -> Self {
        Self::with_severity(Severity::Error, code, message, location)
    }

    /// Creates a new warning diagnostic.
    pub fn warning(code: DiagnosticCode, message: impl Into<String>, location: Location) -> Self {
        Self::with_severity(Severity::Warning, code, message, location)
    }

    fn with_severity(
        severity: Severity,
        code: DiagnosticCode,
        message: impl Into<String>,
        location: Location,
    ) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            location,
            notes: Vec::new(),
            help: Vec::new(),
        }
    }

    /// Adds a note to this diagnostic.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Adds a help message to this diagnostic.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help.push(help.into());
        self
    }
}
