//! `cellcheck table`: print a gate's expected truth table.

use cellcheck_cells::{oracle, GateDescriptor, GateRegistry};
use cellcheck_common::LogicVec;
use cellcheck_harness::StimulusSet;

use crate::TableArgs;

/// Runs the `cellcheck table` command.
pub fn run(args: &TableArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let registry = GateRegistry::standard();
    let descriptor = registry.lookup(&args.gate)?;
    print!("{}", format_table(descriptor, args.unknown)?);
    Ok(0)
}

/// Renders the oracle's outputs for every vector, one row per vector.
fn format_table(
    descriptor: &GateDescriptor,
    unknown: bool,
) -> Result<String, Box<dyn std::error::Error>> {
    let stimulus = if unknown {
        StimulusSet::unknown_states(descriptor.arity())?
    } else {
        StimulusSet::exhaustive(descriptor.arity())?
    };
    let rows = oracle::truth_table(descriptor, stimulus.iter())?;

    let inputs = descriptor.input_ports();
    let outputs = descriptor.output_ports();
    let cell = |ports: &[String], values: &LogicVec| {
        ports
            .iter()
            .zip(values.iter())
            .map(|(p, v)| format!("{:<w$}", v.as_char(), w = p.len()))
            .collect::<Vec<_>>()
            .join(" ")
    };

    let mut out = format!("{} | {}\n", inputs.join(" "), outputs.join(" "));
    for row in &rows {
        let line = format!(
            "{} | {}",
            cell(inputs, &row.inputs),
            cell(outputs, &row.outputs)
        );
        out.push_str(line.trim_end());
        out.push('\n');
    }
    Ok(out)
}
