//! Parsing and validation of `cellcheck.toml` run configuration files.
//!
//! This crate reads the optional configuration file and produces a
//! strongly-typed [`CellcheckConfig`], which converts into the harness's
//! [`HarnessOptions`](cellcheck_harness::HarnessOptions). Every section is
//! optional; a missing file is equivalent to an empty one.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{find_config, load_config, load_config_file, load_config_from_str, CONFIG_FILE};
pub use types::*;
