//! Standard-cell archetype catalog and boolean oracle.
//!
//! Every combinational cell the harness knows about is a [`GateDescriptor`]:
//! a name, ordered input and output port names, and a [`GateFunction`] that
//! defines its truth table bit-exactly. Descriptors live in an explicitly
//! constructed [`GateRegistry`]; [`GateRegistry::standard`] holds the full
//! library (AND/OR/NAND/NOR, XOR/XNOR, INV, MUX2, and the AOI/OAI families).
//!
//! The [`oracle`] module evaluates a descriptor over a stimulus vector to
//! produce the expected outputs.

#![warn(missing_docs)]

pub mod descriptor;
pub mod error;
pub mod function;
pub mod library;
pub mod oracle;
pub mod registry;

pub use descriptor::{describe_ports, GateDescriptor};
pub use error::CellError;
pub use function::GateFunction;
pub use library::standard_cells;
pub use registry::GateRegistry;
