//! Error types for configuration loading and validation.

use std::path::PathBuf;

/// Errors raised while loading `cellcheck.toml`.
///
/// Every variant is fatal: a run never starts from a configuration that
/// failed to load.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Read {
        /// The file that was opened.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The TOML is malformed, has unknown keys, or holds a value of the
    /// wrong shape (an unknown policy name, an unparsable delay).
    #[error("malformed configuration: {0}")]
    Malformed(String),

    /// A setting that the chosen policy needs is absent.
    #[error("`{0}` is required")]
    MissingField(String),

    /// A setting is present but outside its allowed range.
    #[error("`{field}` {reason}")]
    OutOfRange {
        /// Dotted path of the setting, e.g. `suite.workers`.
        field: String,
        /// What the value must satisfy.
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn out_of_range(field: impl Into<String>, reason: &str) -> Self {
        ConfigError::OutOfRange {
            field: field.into(),
            reason: reason.to_string(),
        }
    }
}
