//! Helpers shared by the subcommands: configuration lookup and diagnostic
//! rendering.

use std::path::{Path, PathBuf};

use cellcheck_config::{CellcheckConfig, CONFIG_FILE};
use cellcheck_diagnostics::{Diagnostic, DiagnosticRenderer, Severity, TerminalRenderer};

use crate::GlobalArgs;

/// Finds the configuration file a run should use, if any.
///
/// `--config` may name a file or a directory holding `cellcheck.toml`; an
/// explicit path that does not exist is an error. Without `--config`, the
/// current directory is searched. `None` means built-in defaults.
pub fn resolve_config_path(
    global: &GlobalArgs,
    cwd: &Path,
) -> Result<Option<PathBuf>, Box<dyn std::error::Error>> {
    match &global.config {
        Some(config_path) => {
            let p = PathBuf::from(config_path);
            if p.is_file() {
                Ok(Some(p))
            } else if p.is_dir() {
                Ok(Some(p.join(CONFIG_FILE)))
            } else {
                Err(format!("config file not found: {}", p.display()).into())
            }
        }
        None => Ok(cellcheck_config::find_config(cwd)),
    }
}

/// Loads the run configuration, falling back to defaults.
pub fn load_settings(global: &GlobalArgs) -> Result<CellcheckConfig, Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    match resolve_config_path(global, &cwd)? {
        Some(path) => {
            if global.verbose {
                eprintln!("   Config {}", path.display());
            }
            Ok(cellcheck_config::load_config_file(&path)?)
        }
        None => Ok(CellcheckConfig::default()),
    }
}

/// Renders diagnostics to stderr. Under `--quiet` only errors are shown.
///
/// Returns the number rendered.
pub fn render_diagnostics(diagnostics: &[Diagnostic], global: &GlobalArgs) -> usize {
    let renderer = TerminalRenderer::new(global.color);
    let mut shown = 0;
    for diag in diagnostics {
        if global.quiet && diag.severity != Severity::Error {
            continue;
        }
        eprintln!("{}", renderer.render(diag));
        shown += 1;
    }
    shown
}
