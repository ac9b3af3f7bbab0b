//! In-process functional device layer for the cellcheck harness.
//!
//! [`FunctionalDeviceLayer`] implements the harness's device interface by
//! evaluating each cell's boolean function after a configurable settle time.
//! Every signal change lands in a shared [`TraceStore`], from which
//! [`VcdTraceCapture`] writes per-vector debug waveforms. A [`FaultPlan`]
//! lets tests and demos inject wrong answers, timeouts, and protocol errors.

#![warn(missing_docs)]

pub mod capture;
pub mod emulator;
pub mod error;
pub mod fault;
pub mod time;
pub mod trace;
pub mod waveform;

pub use capture::VcdTraceCapture;
pub use emulator::{FunctionalDeviceLayer, FunctionalInstance};
pub use error::SimError;
pub use fault::{FaultKind, FaultPlan, FaultRule};
pub use time::SimTime;
pub use trace::{PortDirection, SharedTraceStore, TraceStore};
pub use waveform::{SignalId, VcdRecorder, WaveformRecorder};
