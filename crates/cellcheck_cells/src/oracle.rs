//! The oracle: expected outputs for a stimulus vector.
//!
//! Evaluation is pure. The same descriptor and vector always give the same
//! expected result, so callers may cache results freely.

use cellcheck_common::LogicVec;

use crate::descriptor::GateDescriptor;
use crate::error::CellError;

/// Computes the expected output vector for `stimulus`.
///
/// Fails with [`CellError::ArityMismatch`] if the stimulus width differs from
/// the descriptor's input port count.
pub fn evaluate(descriptor: &GateDescriptor, stimulus: &LogicVec) -> Result<LogicVec, CellError> {
    descriptor.evaluate(stimulus)
}

/// One row of a truth table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TruthRow {
    /// The input vector.
    pub inputs: LogicVec,
    /// The expected outputs.
    pub outputs: LogicVec,
}

/// Evaluates the descriptor over every vector yielded by `vectors`.
pub fn truth_table<I>(descriptor: &GateDescriptor, vectors: I) -> Result<Vec<TruthRow>, CellError>
where
    I: IntoIterator<Item = LogicVec>,
{
    vectors
        .into_iter()
        .map(|inputs| {
            let outputs = evaluate(descriptor, &inputs)?;
            Ok(TruthRow { inputs, outputs })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GateRegistry;

    fn expected(gate: &str, bits: &str) -> String {
        let registry = GateRegistry::standard();
        let d = registry.lookup(gate).unwrap();
        evaluate(d, &bits.parse().unwrap()).unwrap().to_string()
    }

    #[test]
    fn aoi21_examples() {
        assert_eq!(expected("AOI21", "110"), "0");
        assert_eq!(expected("AOI21", "000"), "1");
    }

    #[test]
    fn mux2_examples() {
        assert_eq!(expected("MUX2", "010"), "0");
        assert_eq!(expected("MUX2", "011"), "1");
    }

    #[test]
    fn xor3_parity() {
        assert_eq!(expected("XOR3", "111"), "1");
        assert_eq!(expected("XOR3", "110"), "0");
    }

    #[test]
    fn arity_mismatch() {
        let registry = GateRegistry::standard();
        let d = registry.lookup("INV").unwrap();
        assert!(matches!(
            evaluate(d, &"01".parse().unwrap()),
            Err(CellError::ArityMismatch { expected: 1, found: 2, .. })
        ));
    }

    #[test]
    fn referentially_transparent() {
        let registry = GateRegistry::standard();
        let d = registry.lookup("OAI221").unwrap();
        let v: LogicVec = "10110".parse().unwrap();
        assert_eq!(evaluate(d, &v).unwrap(), evaluate(d, &v).unwrap());
    }

    #[test]
    fn inverter_table() {
        let registry = GateRegistry::standard();
        let d = registry.lookup("INV").unwrap();
        let rows = truth_table(d, (0..2).map(|i| LogicVec::from_index(i, 1))).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].outputs.to_string(), "1");
        assert_eq!(rows[1].outputs.to_string(), "0");
    }
}
