//! Diagnostics for cell-library checks.
//!
//! Every finding of a run, whether a mismatching vector, a device fault, or a
//! trace that could not be written, becomes a [`Diagnostic`] tied to a gate
//! and optionally one vector through its [`Location`]. Sweep workers push
//! them into a shared [`DiagnosticSink`]. A [`DiagnosticRenderer`] turns them
//! into text once the run is over.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::{Diagnostic, Location};
pub use renderer::{DiagnosticRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
