//! Boolean functions of the combinational cell archetypes.
//!
//! Each variant evaluates with IEEE 1164 operators, so known inputs give the
//! exact boolean result and unknown inputs propagate pessimistically. Cell
//! outputs are always driven: a `Z` input never reaches an output as `Z`.

use cellcheck_common::{Logic, LogicVec};
use serde::Serialize;

/// The truth-table definition of one cell archetype.
///
/// The compound variants carry the group structure implied by the cell name:
/// `Aoi(vec![2, 2, 1])` is AOI221, i.e. `!((A1 & A2) | (B1 & B2) | C)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "shape", rename_all = "lowercase")]
pub enum GateFunction {
    /// Conjunction of n inputs.
    And(usize),
    /// Disjunction of n inputs.
    Or(usize),
    /// Complement of an n-input AND.
    Nand(usize),
    /// Complement of an n-input OR.
    Nor(usize),
    /// Odd parity of n inputs.
    Xor(usize),
    /// Even parity of n inputs.
    Xnor(usize),
    /// Inverter.
    Inv,
    /// 2:1 multiplexer over `(I0, I1, S)`: `S ? I1 : I0`.
    Mux2,
    /// AND-OR-INVERT: groups are ANDed, the results ORed, then inverted.
    Aoi(Vec<usize>),
    /// OR-AND-INVERT: groups are ORed, the results ANDed, then inverted.
    Oai(Vec<usize>),
}

impl GateFunction {
    /// Number of inputs the function consumes.
    pub fn input_count(&self) -> usize {
        match self {
            GateFunction::And(n)
            | GateFunction::Or(n)
            | GateFunction::Nand(n)
            | GateFunction::Nor(n)
            | GateFunction::Xor(n)
            | GateFunction::Xnor(n) => *n,
            GateFunction::Inv => 1,
            GateFunction::Mux2 => 3,
            GateFunction::Aoi(groups) | GateFunction::Oai(groups) => groups.iter().sum(),
        }
    }

    /// Number of outputs the function produces.
    pub fn output_count(&self) -> usize {
        1
    }

    /// Returns `true` if the cell's output is the complement of its core logic.
    pub fn is_inverting(&self) -> bool {
        matches!(
            self,
            GateFunction::Nand(_)
                | GateFunction::Nor(_)
                | GateFunction::Xnor(_)
                | GateFunction::Inv
                | GateFunction::Aoi(_)
                | GateFunction::Oai(_)
        )
    }

    /// Conventional input port names for this function.
    ///
    /// Grouped inputs are lettered `A`, `B`, `C`, …; a group with more than
    /// one member is numbered (`A1`, `A2`), a single-member group is the bare
    /// letter. Flat n-input gates use `A1..An`.
    pub fn default_input_ports(&self) -> Vec<String> {
        match self {
            GateFunction::Inv => vec!["I".to_string()],
            GateFunction::Mux2 => ["I0", "I1", "S"].iter().map(|s| s.to_string()).collect(),
            GateFunction::Aoi(groups) | GateFunction::Oai(groups) => grouped_ports(groups),
            _ => (1..=self.input_count()).map(|i| format!("A{i}")).collect(),
        }
    }

    /// Conventional output port names: `ZN` for inverting cells, `Z` otherwise.
    pub fn default_output_ports(&self) -> Vec<String> {
        let name = if self.is_inverting() { "ZN" } else { "Z" };
        vec![name.to_string()]
    }

    /// Evaluates the function.
    ///
    /// # Panics
    ///
    /// Panics if `inputs.width()` differs from [`input_count`](Self::input_count).
    /// Callers go through [`GateDescriptor::evaluate`](crate::GateDescriptor::evaluate),
    /// which checks arity first.
    pub fn eval(&self, inputs: &LogicVec) -> LogicVec {
        assert_eq!(
            inputs.width() as usize,
            self.input_count(),
            "arity checked by caller"
        );
        let values: Vec<Logic> = inputs.iter().collect();
        let out = match self {
            GateFunction::And(_) => Logic::all(values),
            GateFunction::Or(_) => Logic::any(values),
            GateFunction::Nand(_) => !Logic::all(values),
            GateFunction::Nor(_) => !Logic::any(values),
            GateFunction::Xor(_) => Logic::parity(values),
            GateFunction::Xnor(_) => !Logic::parity(values),
            GateFunction::Inv => !values[0],
            GateFunction::Mux2 => mux(values[0], values[1], values[2]),
            GateFunction::Aoi(groups) => !Logic::any(
                split_groups(&values, groups).map(|g| Logic::all(g.iter().copied())),
            ),
            GateFunction::Oai(groups) => !Logic::all(
                split_groups(&values, groups).map(|g| Logic::any(g.iter().copied())),
            ),
        };
        std::iter::once(out).collect()
    }

    /// Renders the function as an expression over the given port names,
    /// e.g. `ZN = !((A1 & A2) | B)`.
    pub fn expression(&self, inputs: &[String], outputs: &[String]) -> String {
        let out = outputs.first().map(String::as_str).unwrap_or("Y");
        let join = |names: &[String], op: &str| names.join(&format!(" {op} "));
        let rhs = match self {
            GateFunction::And(_) => join(inputs, "&"),
            GateFunction::Or(_) => join(inputs, "|"),
            GateFunction::Nand(_) => format!("!({})", join(inputs, "&")),
            GateFunction::Nor(_) => format!("!({})", join(inputs, "|")),
            GateFunction::Xor(_) => join(inputs, "^"),
            GateFunction::Xnor(_) => format!("!({})", join(inputs, "^")),
            GateFunction::Inv => format!("!{}", inputs[0]),
            GateFunction::Mux2 => format!("{} ? {} : {}", inputs[2], inputs[1], inputs[0]),
            GateFunction::Aoi(groups) => {
                format!("!({})", grouped_expression(inputs, groups, "&", "|"))
            }
            GateFunction::Oai(groups) => {
                format!("!({})", grouped_expression(inputs, groups, "|", "&"))
            }
        };
        format!("{out} = {rhs}")
    }
}

/// Selects `i1` when `s` is high. An unknown select still resolves when both
/// data inputs agree on a known value.
fn mux(i0: Logic, i1: Logic, s: Logic) -> Logic {
    match s {
        Logic::Zero => driven(i0),
        Logic::One => driven(i1),
        Logic::X | Logic::Z if i0 == i1 && i0.is_known() => i0,
        Logic::X | Logic::Z => Logic::X,
    }
}

/// A buffered output never floats.
fn driven(v: Logic) -> Logic {
    if v == Logic::Z {
        Logic::X
    } else {
        v
    }
}

fn split_groups<'a, T>(values: &'a [T], groups: &'a [usize]) -> impl Iterator<Item = &'a [T]> {
    groups.iter().scan(0usize, move |start, &len| {
        let group = &values[*start..*start + len];
        *start += len;
        Some(group)
    })
}

fn grouped_ports(groups: &[usize]) -> Vec<String> {
    let mut ports = Vec::new();
    for (g, &len) in groups.iter().enumerate() {
        let letter = (b'A' + g as u8) as char;
        if len == 1 {
            ports.push(letter.to_string());
        } else {
            ports.extend((1..=len).map(|i| format!("{letter}{i}")));
        }
    }
    ports
}

fn grouped_expression(inputs: &[String], groups: &[usize], inner: &str, outer: &str) -> String {
    split_groups(inputs, groups)
        .map(|group| {
            if group.len() == 1 {
                group[0].clone()
            } else {
                format!("({})", group.join(&format!(" {inner} ")))
            }
        })
        .collect::<Vec<_>>()
        .join(&format!(" {outer} "))
}
