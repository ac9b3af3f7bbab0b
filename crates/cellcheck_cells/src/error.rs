//! Error types for the cell catalog and oracle.

/// Errors raised while building the registry or evaluating a descriptor.
///
/// All of these are configuration or programming errors and are fatal to
/// harness setup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CellError {
    /// A descriptor with the same name was already registered.
    #[error("gate '{0}' is already registered")]
    DuplicateGate(String),

    /// No descriptor with this name exists.
    #[error("unknown gate '{0}'")]
    UnknownGate(String),

    /// A vector's width did not match the descriptor's input port count.
    #[error("gate '{gate}' takes {expected} input(s), got a vector of {found}")]
    ArityMismatch {
        /// The gate being evaluated.
        gate: String,
        /// Number of declared input ports.
        expected: usize,
        /// Number of values supplied.
        found: usize,
    },

    /// A descriptor's ports disagree with its function or with each other.
    #[error("invalid descriptor '{gate}': {reason}")]
    InvalidDescriptor {
        /// The descriptor name.
        gate: String,
        /// What is wrong with it.
        reason: String,
    },
}
