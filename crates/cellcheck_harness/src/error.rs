//! Error types for harness setup.
//!
//! Everything here is fatal and raised before any device is touched. Device
//! faults during a sweep are not errors; they become failing trials.

use cellcheck_cells::CellError;

/// Errors from building a stimulus set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StimulusError {
    /// The arity is zero or too large for the chosen policy.
    #[error("arity must be between 1 and {max}, got {arity}")]
    Arity {
        /// The requested arity.
        arity: usize,
        /// The largest arity the policy supports.
        max: usize,
    },

    /// A bounded-random policy asked for zero vectors.
    #[error("bounded-random policy needs a vector count of at least 1")]
    EmptySample,
}

/// Fatal errors raised while setting up a harness run.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    /// Registry lookup or descriptor evaluation failed.
    #[error(transparent)]
    Cell(#[from] CellError),

    /// A gate's stimulus could not be generated.
    #[error("gate '{gate}': {source}")]
    Stimulus {
        /// The gate whose stimulus failed.
        gate: String,
        /// The underlying stimulus error.
        #[source]
        source: StimulusError,
    },

    /// A harness option is out of range.
    #[error("invalid option: {0}")]
    InvalidOption(String),

    /// The worker pool could not be started.
    #[error("failed to start worker pool: {0}")]
    WorkerPool(String),
}
