//! The standard cell library: every archetype the harness verifies.

use crate::descriptor::GateDescriptor;
use crate::function::GateFunction;

/// Returns the standard archetypes in registration (and report) order.
pub fn standard_cells() -> Vec<GateDescriptor> {
    let mut cells = Vec::new();

    for n in 2..=4 {
        cells.push(GateDescriptor::standard(format!("AND{n}"), GateFunction::And(n)));
    }
    for n in 2..=4 {
        cells.push(GateDescriptor::standard(format!("OR{n}"), GateFunction::Or(n)));
    }
    for n in 2..=4 {
        cells.push(GateDescriptor::standard(format!("NAND{n}"), GateFunction::Nand(n)));
    }
    for n in 2..=4 {
        cells.push(GateDescriptor::standard(format!("NOR{n}"), GateFunction::Nor(n)));
    }
    cells.push(GateDescriptor::standard("XOR2", GateFunction::Xor(2)));
    cells.push(GateDescriptor::standard("XOR3", GateFunction::Xor(3)));
    cells.push(GateDescriptor::standard("XNOR2", GateFunction::Xnor(2)));
    cells.push(GateDescriptor::standard("INV", GateFunction::Inv));
    cells.push(GateDescriptor::standard("MUX2", GateFunction::Mux2));

    // Subscript digits give the group sizes: AOI221 = (2, 2, 1).
    let compound = [
        ("AOI21", vec![2, 1]),
        ("AOI22", vec![2, 2]),
        ("AOI211", vec![2, 1, 1]),
        ("AOI221", vec![2, 2, 1]),
        ("AOI222", vec![2, 2, 2]),
        ("OAI21", vec![2, 1]),
        ("OAI22", vec![2, 2]),
        ("OAI211", vec![2, 1, 1]),
        ("OAI221", vec![2, 2, 1]),
        ("OAI222", vec![2, 2, 2]),
        ("OAI31", vec![3, 1]),
        ("OAI32", vec![3, 2]),
    ];
    for (name, groups) in compound {
        let function = if name.starts_with("AOI") {
            GateFunction::Aoi(groups)
        } else {
            GateFunction::Oai(groups)
        };
        cells.push(GateDescriptor::standard(name, function));
    }

    cells
}
