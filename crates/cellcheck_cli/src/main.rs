//! cellcheck CLI: functional conformance checks for standard-cell libraries.
//!
//! Provides `cellcheck run` to sweep the cell library through the functional
//! emulator, `cellcheck list` to show the registered archetypes, and
//! `cellcheck table` to print a gate's expected truth table.

#![warn(missing_docs)]

mod list;
mod pipeline;
mod run;
mod table;

use std::io::IsTerminal;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

/// cellcheck: standard-cell functional conformance harness.
#[derive(Parser, Debug)]
#[command(name = "cellcheck", version, about = "Standard-cell conformance harness")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a `cellcheck.toml` file, or a directory containing one.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sweep gates through the functional emulator and report a verdict.
    Run(RunArgs),
    /// List the registered gate archetypes.
    List,
    /// Print the expected truth table of one gate.
    Table(TableArgs),
}

/// Arguments for the `cellcheck run` subcommand.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Gates to sweep (default: every gate, or `suite.gates` from config).
    #[arg(short, long = "gate", num_args = 1..)]
    pub gates: Vec<String>,

    /// Vector policy for every gate without a configured override.
    #[arg(short, long, value_enum)]
    pub policy: Option<PolicyArg>,

    /// PRNG seed for `bounded-random`.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Vector count for `bounded-random`.
    #[arg(long)]
    pub count: Option<usize>,

    /// Report format.
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,

    /// Worker threads for per-gate sweeps.
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Failing trials retained per gate.
    #[arg(long)]
    pub failure_limit: Option<usize>,

    /// Emulator settle time (e.g. "10ns", "500ps").
    #[arg(long)]
    pub settle: Option<String>,

    /// Directory for failure traces.
    #[arg(long)]
    pub trace_dir: Option<String>,

    /// Disable failure traces.
    #[arg(long)]
    pub no_trace: bool,

    /// Invert a gate's outputs, at every vector or at one (`GATE[:VECTOR]`).
    #[arg(long, value_name = "GATE[:VECTOR]")]
    pub inject: Vec<String>,
}

/// Arguments for the `cellcheck table` subcommand.
#[derive(Parser, Debug)]
pub struct TableArgs {
    /// Gate archetype name, e.g. `AOI21`.
    pub gate: String,

    /// Enumerate `{0, 1, X}` inputs instead of `{0, 1}`.
    #[arg(short, long)]
    pub unknown: bool,
}

/// Vector policy selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    /// Every boolean vector.
    Exhaustive,
    /// A seeded subset of boolean vectors.
    BoundedRandom,
    /// Every vector over `{0, 1, X}`.
    UnknownStates,
}

/// Report output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable summary.
    Text,
    /// Machine-readable JSON.
    Json,
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Detect from terminal capabilities.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose information.
    pub verbose: bool,
    /// Whether to use colored output.
    pub color: bool,
    /// Optional path to a config file or directory.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let color = match cli.color {
        ColorChoice::Auto => std::io::stderr().is_terminal(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color,
        config: cli.config,
    };

    let result = match cli.command {
        Command::Run(ref args) => run::run(args, &global),
        Command::List => list::run(&global),
        Command::Table(ref args) => table::run(args),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_run_default() {
        let cli = Cli::parse_from(["cellcheck", "run"]);
        match cli.command {
            Command::Run(ref args) => {
                assert!(args.gates.is_empty());
                assert!(args.policy.is_none());
                assert!(args.format.is_none());
                assert!(args.jobs.is_none());
                assert!(!args.no_trace);
                assert!(args.inject.is_empty());
            }
            _ => panic!("expected Run command"),
        }
    }

    #[test]
    fn parse_run_gates() {
        let cli = Cli::parse_from(["cellcheck", "run", "--gate", "AOI21", "MUX2", "-g", "INV"]);
        match cli.command {
            Command::Run(ref args) => assert_eq!(args.gates, ["AOI21", "MUX2", "INV"]),
            _ => panic!("expected Run command"),
        }
    }

    #[test]
    fn parse_run_bounded_random() {
        let cli = Cli::parse_from([
            "cellcheck",
            "run",
            "--policy",
            "bounded-random",
            "--seed",
            "42",
            "--count",
            "8",
        ]);
        match cli.command {
            Command::Run(ref args) => {
                assert_eq!(args.policy, Some(PolicyArg::BoundedRandom));
                assert_eq!(args.seed, Some(42));
                assert_eq!(args.count, Some(8));
            }
            _ => panic!("expected Run command"),
        }
    }

    #[test]
    fn parse_run_output_flags() {
        let cli = Cli::parse_from([
            "cellcheck",
            "run",
            "--format",
            "json",
            "-j",
            "4",
            "--trace-dir",
            "out/traces",
            "--no-trace",
            "--settle",
            "500ps",
        ]);
        match cli.command {
            Command::Run(ref args) => {
                assert_eq!(args.format, Some(ReportFormat::Json));
                assert_eq!(args.jobs, Some(4));
                assert_eq!(args.trace_dir.as_deref(), Some("out/traces"));
                assert!(args.no_trace);
                assert_eq!(args.settle.as_deref(), Some("500ps"));
            }
            _ => panic!("expected Run command"),
        }
    }

    #[test]
    fn parse_run_inject_repeats() {
        let cli = Cli::parse_from([
            "cellcheck",
            "run",
            "--inject",
            "AOI21:5",
            "--inject",
            "NAND2",
        ]);
        match cli.command {
            Command::Run(ref args) => assert_eq!(args.inject, ["AOI21:5", "NAND2"]),
            _ => panic!("expected Run command"),
        }
    }

    #[test]
    fn parse_table() {
        let cli = Cli::parse_from(["cellcheck", "table", "MUX2", "--unknown"]);
        match cli.command {
            Command::Table(ref args) => {
                assert_eq!(args.gate, "MUX2");
                assert!(args.unknown);
            }
            _ => panic!("expected Table command"),
        }
    }

    #[test]
    fn parse_list() {
        let cli = Cli::parse_from(["cellcheck", "list"]);
        assert!(matches!(cli.command, Command::List));
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::parse_from(["cellcheck", "--quiet", "--color", "never", "run"]);
        assert!(cli.quiet);
        assert!(!cli.verbose);
        assert_eq!(cli.color, ColorChoice::Never);
    }

    #[test]
    fn parse_config_path() {
        let cli = Cli::parse_from(["cellcheck", "run", "--config", "ci/cellcheck.toml"]);
        assert_eq!(cli.config.as_deref(), Some("ci/cellcheck.toml"));
    }

    #[test]
    fn table_requires_gate() {
        assert!(Cli::try_parse_from(["cellcheck", "table"]).is_err());
    }
}
