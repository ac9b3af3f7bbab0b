//! Emulator error types.
//!
//! These stay inside the crate's plumbing; at the device interface they are
//! converted to [`DeviceError`](cellcheck_harness::DeviceError) or
//! [`TraceError`](cellcheck_harness::TraceError).

use std::io;

/// Errors raised by the emulator, the trace store, and the waveform writer.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// An assignment named a port the cell does not have.
    #[error("unknown port '{port}'")]
    UnknownPort {
        /// The offending name.
        port: String,
    },

    /// An assignment left an input port undriven.
    #[error("missing input port '{port}'")]
    MissingPort {
        /// The undriven port.
        port: String,
    },

    /// A waveform write referenced a signal that was never registered.
    #[error("invalid signal reference: {reason}")]
    InvalidSignalRef {
        /// Description of why the signal reference is invalid.
        reason: String,
    },

    /// An I/O error occurred while writing waveform data.
    #[error("waveform I/O error: {0}")]
    WaveformIo(#[from] io::Error),

    /// A `--inject` rule could not be parsed.
    #[error("invalid fault spec '{spec}': {reason}")]
    InvalidFault {
        /// The text as given.
        spec: String,
        /// What was wrong with it.
        reason: String,
    },
}
