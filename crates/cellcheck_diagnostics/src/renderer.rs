//! Diagnostic rendering for terminal output.

use crate::diagnostic::Diagnostic;
use crate::severity::Severity;

/// Trait for rendering diagnostics into formatted output strings.
pub trait DiagnosticRenderer {
    /// Renders a single diagnostic into a formatted string.
    fn render(&self, diag: &Diagnostic) -> String;
}

/// Renders diagnostics in a rustc-style terminal format.
///
/// Produces output like:
/// ```text
/// error[M001]: AOI21 output mismatch
///   --> AOI21 #3
///    = note: stimulus  A1=0 A2=1 B=1
///    = note: expected  ZN=0
///    = note: actual    ZN=1
/// ```
pub struct TerminalRenderer {
    /// Whether to use ANSI color codes in output.
    pub color: bool,
}

impl TerminalRenderer {
    /// Creates a new terminal renderer.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn header(&self, diag: &Diagnostic) -> String {
        let label = format!("{}[{}]", diag.severity, diag.code);
        if !self.color {
            return label;
        }
        let ansi = match diag.severity {
            Severity::Error => "31",
            Severity::Warning => "33",
            Severity::Note => "36",
        };
        format!("\x1b[1;{ansi}m{label}\x1b[0m")
    }
}

impl DiagnosticRenderer for TerminalRenderer {
    fn render(&self, diag: &Diagnostic) -> String {
        let mut out = format!("{}: {}\n", self.header(diag), diag.message);

        if !diag.location.is_none() {
            out.push_str(&format!("  --> {}\n", diag.location));
        }
        for note in &diag.notes {
            out.push_str(&format!("   = note: {note}\n"));
        }
        for help in &diag.help {
            out.push_str(&format!("   = help: {help}\n"));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::DiagnosticCode;
    use crate::diagnostic::Location;

    #[test]
    fn render_error_with_location() {
        let diag = Diagnostic::error(
            DiagnosticCode::OUTPUT_MISMATCH,
            "AOI21 output mismatch",
            Location::vector("AOI21", 3),
        )
        .with_note("expected  ZN=0")
        .with_help("inspect the trace");

        let output = TerminalRenderer::new(false).render(&diag);
        assert!(output.starts_with("error[M001]: AOI21 output mismatch\n"));
        assert!(output.contains("  --> AOI21 #3\n"));
        assert!(output.contains("   = note: expected  ZN=0\n"));
        assert!(output.contains("   = help: inspect the trace\n"));
    }

    #[test]
    fn render_without_location() {
        let diag = Diagnostic::warning(
            DiagnosticCode::VECTOR_COUNT_CLAMPED,
            "count clamped",
            Location::NONE,
        );
        let output = TerminalRenderer::new(false).render(&diag);
        assert_eq!(output, "warning[W002]: count clamped\n");
    }

    #[test]
    fn render_colored_header() {
        let diag = Diagnostic::error(
            DiagnosticCode::DEVICE_TIMEOUT,
            "timeout",
            Location::NONE,
        );
        let output = TerminalRenderer::new(true).render(&diag);
        assert!(output.starts_with("\x1b[1;31merror[D001]\x1b[0m: timeout"));
    }
}
