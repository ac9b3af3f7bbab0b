//! How serious a diagnostic is.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Diagnostic severity. Variants compare in increasing order of seriousness,
/// so `max()` over a run gives its worst outcome.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Context only.
    Note,
    /// Reported but leaves the verdict untouched, such as a trace that
    /// could not be written.
    Warning,
    /// A failed trial, or a setup problem that stopped the run.
    Error,
}

impl Severity {
    /// Returns `true` for [`Severity::Error`].
    pub fn is_error(self) -> bool {
        matches!(self, Severity::Error)
    }

    /// The lowercase word used in rendered output and JSON.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Note => "note",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
