//! Stable diagnostic codes such as `M001` or `W002`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What kind of finding a code reports. The category picks the code's
/// leading letter.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Category {
    /// `E`: the run could not start.
    Setup,
    /// `M`: a sampled output disagreed with the oracle.
    Mismatch,
    /// `D`: the device layer faulted.
    Device,
    /// `W`: a problem that leaves the verdict alone.
    Warning,
}

impl Category {
    /// The code's leading letter.
    pub fn prefix(self) -> char {
        match self {
            Category::Setup => 'E',
            Category::Mismatch => 'M',
            Category::Device => 'D',
            Category::Warning => 'W',
        }
    }
}

/// A category plus a number, printed as the prefix letter and three digits.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct DiagnosticCode {
    /// Which letter the code carries.
    pub category: Category,
    /// Position within the category.
    pub number: u16,
}

impl DiagnosticCode {
    /// `M001`: an output differed from the expected value.
    pub const OUTPUT_MISMATCH: Self = Self::new(Category::Mismatch, 1);
    /// `D001`: outputs were not ready within the settle window.
    pub const DEVICE_TIMEOUT: Self = Self::new(Category::Device, 1);
    /// `D002`: the device answered outside the port protocol.
    pub const DEVICE_PROTOCOL: Self = Self::new(Category::Device, 2);
    /// `W001`: a failing vector's trace was not written.
    pub const TRACE_CAPTURE_FAILED: Self = Self::new(Category::Warning, 1);
    /// `W002`: a bounded-random request asked for more vectors than exist.
    pub const VECTOR_COUNT_CLAMPED: Self = Self::new(Category::Warning, 2);

    /// Builds a code.
    pub const fn new(category: Category, number: u16) -> Self {
        Self { category, number }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.category.prefix(), self.number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_print_as_documented() {
        let printed: Vec<String> = [
            DiagnosticCode::OUTPUT_MISMATCH,
            DiagnosticCode::DEVICE_TIMEOUT,
            DiagnosticCode::DEVICE_PROTOCOL,
            DiagnosticCode::TRACE_CAPTURE_FAILED,
            DiagnosticCode::VECTOR_COUNT_CLAMPED,
        ]
        .iter()
        .map(ToString::to_string)
        .collect();
        assert_eq!(printed, ["M001", "D001", "D002", "W001", "W002"]);
    }

    #[test]
    fn setup_codes_pad_to_three_digits() {
        assert_eq!(DiagnosticCode::new(Category::Setup, 42).to_string(), "E042");
        assert_eq!(DiagnosticCode::new(Category::Setup, 120).to_string(), "E120");
    }

    #[test]
    fn codes_survive_json() {
        let json = serde_json::to_string(&DiagnosticCode::DEVICE_TIMEOUT).unwrap();
        let back: DiagnosticCode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, DiagnosticCode::DEVICE_TIMEOUT);
    }
}
