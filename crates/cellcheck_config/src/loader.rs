//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::CellcheckConfig;
use std::path::{Path, PathBuf};

/// The configuration file name looked up in a directory.
pub const CONFIG_FILE: &str = "cellcheck.toml";

/// Returns `<dir>/cellcheck.toml` if it exists.
pub fn find_config(dir: &Path) -> Option<PathBuf> {
    let path = dir.join(CONFIG_FILE);
    path.is_file().then_some(path)
}

/// Loads and validates `cellcheck.toml` from a directory.
pub fn load_config(dir: &Path) -> Result<CellcheckConfig, ConfigError> {
    load_config_file(&dir.join(CONFIG_FILE))
}

/// Loads and validates a configuration file at an explicit path.
pub fn load_config_file(path: &Path) -> Result<CellcheckConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    load_config_from_str(&content)
}

/// Parses and validates a configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<CellcheckConfig, ConfigError> {
    let config: CellcheckConfig =
        toml::from_str(content).map_err(|e| ConfigError::Malformed(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Checks ranges and cross-field requirements that serde cannot express.
fn validate_config(config: &CellcheckConfig) -> Result<(), ConfigError> {
    if config.suite.failure_limit == 0 {
        return Err(ConfigError::out_of_range(
            "suite.failure_limit",
            "must be at least 1",
        ));
    }
    if config.suite.workers == Some(0) {
        return Err(ConfigError::out_of_range("suite.workers", "must be at least 1"));
    }
    if config.suite.gates.as_ref().is_some_and(Vec::is_empty) {
        return Err(ConfigError::out_of_range(
            "suite.gates",
            "must name at least one gate",
        ));
    }
    if config.device.settle_time.is_zero() {
        return Err(ConfigError::out_of_range(
            "device.settle_time",
            "must be greater than zero",
        ));
    }
    // Resolving every policy surfaces missing or zero counts.
    config.harness_options()?;
    Ok(())
}
