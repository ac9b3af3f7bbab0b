//! `cellcheck list`: show the registered archetypes.

use cellcheck_cells::GateRegistry;

use crate::GlobalArgs;

/// Runs the `cellcheck list` command.
pub fn run(global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let registry = GateRegistry::standard();
    print!("{}", format_list(&registry, global.verbose));
    if !global.quiet {
        eprintln!("   {} gates", registry.len());
    }
    Ok(0)
}

/// One line per gate: name, ports, and (when verbose) the boolean expression.
fn format_list(registry: &GateRegistry, verbose: bool) -> String {
    let width = registry.all().map(|d| d.name().len()).max().unwrap_or(0);
    let mut out = String::new();
    for d in registry.all() {
        out.push_str(&format!(
            "{:<width$}  {} -> {}",
            d.name(),
            d.input_ports().join(","),
            d.output_ports().join(",")
        ));
        if verbose {
            out.push_str(&format!("  {}", d.expression()));
        }
        out.push('\n');
    }
    out
}
