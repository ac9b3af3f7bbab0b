//! Gate descriptors: one immutable record per cell archetype.

use std::collections::HashSet;

use cellcheck_common::LogicVec;
use serde::Serialize;

use crate::error::CellError;
use crate::function::GateFunction;

/// A named cell archetype with ordered ports and a boolean function.
///
/// Port order is significant: stimulus vectors, expected results, and
/// sampled results are all indexed by declared port position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GateDescriptor {
    name: String,
    input_ports: Vec<String>,
    output_ports: Vec<String>,
    function: GateFunction,
}

impl GateDescriptor {
    /// Creates a descriptor with explicit port names.
    ///
    /// Fails if the name is empty, a port name repeats, or the port counts
    /// disagree with the function's arity.
    pub fn new(
        name: impl Into<String>,
        input_ports: Vec<String>,
        output_ports: Vec<String>,
        function: GateFunction,
    ) -> Result<Self, CellError> {
        let name = name.into();
        let invalid = |reason: String| CellError::InvalidDescriptor {
            gate: name.clone(),
            reason,
        };

        if name.is_empty() {
            return Err(invalid("name must not be empty".to_string()));
        }
        if input_ports.len() != function.input_count() {
            return Err(invalid(format!(
                "{} input port(s) declared, function takes {}",
                input_ports.len(),
                function.input_count()
            )));
        }
        if output_ports.len() != function.output_count() {
            return Err(invalid(format!(
                "{} output port(s) declared, function drives {}",
                output_ports.len(),
                function.output_count()
            )));
        }
        let mut seen = HashSet::new();
        for port in input_ports.iter().chain(&output_ports) {
            if port.is_empty() {
                return Err(invalid("port names must not be empty".to_string()));
            }
            if !seen.insert(port.as_str()) {
                return Err(invalid(format!("port '{port}' declared twice")));
            }
        }

        Ok(Self {
            name,
            input_ports,
            output_ports,
            function,
        })
    }

    /// Creates a descriptor using the function's conventional port names.
    pub fn standard(name: impl Into<String>, function: GateFunction) -> Self {
        Self {
            name: name.into(),
            input_ports: function.default_input_ports(),
            output_ports: function.default_output_ports(),
            function,
        }
    }

    /// The archetype name, e.g. `"AOI21"`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Input port names in declared order.
    pub fn input_ports(&self) -> &[String] {
        &self.input_ports
    }

    /// Output port names in declared order.
    pub fn output_ports(&self) -> &[String] {
        &self.output_ports
    }

    /// The boolean function.
    pub fn function(&self) -> &GateFunction {
        &self.function
    }

    /// Number of input ports.
    pub fn arity(&self) -> usize {
        self.input_ports.len()
    }

    /// Evaluates the function over a vector in input port order.
    pub fn evaluate(&self, inputs: &LogicVec) -> Result<LogicVec, CellError> {
        if inputs.width() as usize != self.arity() {
            return Err(CellError::ArityMismatch {
                gate: self.name.clone(),
                expected: self.arity(),
                found: inputs.width() as usize,
            });
        }
        Ok(self.function.eval(inputs))
    }

    /// Boolean convenience wrapper around [`evaluate`](Self::evaluate).
    pub fn evaluate_bools(&self, inputs: &[bool]) -> Result<Vec<bool>, CellError> {
        let outputs = self.evaluate(&LogicVec::from_bools(inputs))?;
        // Known inputs always produce known outputs.
        Ok(outputs.iter().map(|v| v.to_bool() == Some(true)).collect())
    }

    /// The function as an expression over this descriptor's port names.
    pub fn expression(&self) -> String {
        self.function
            .expression(&self.input_ports, &self.output_ports)
    }

    /// Formats a vector as `PORT=value` pairs over the input ports.
    pub fn describe_inputs(&self, values: &LogicVec) -> String {
        describe_ports(&self.input_ports, values)
    }

    /// Formats a vector as `PORT=value` pairs over the output ports.
    pub fn describe_outputs(&self, values: &LogicVec) -> String {
        describe_ports(&self.output_ports, values)
    }
}

/// Formats values as `PORT=value` pairs, e.g. `A1=0 A2=1 B=1`.
pub fn describe_ports(ports: &[String], values: &LogicVec) -> String {
    ports
        .iter()
        .zip(values.iter())
        .map(|(port, v)| format!("{port}={v}"))
        .collect::<Vec<_>>()
        .join(" ")
}
