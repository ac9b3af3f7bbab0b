//! Fault injection for the functional emulator.
//!
//! A [`FaultPlan`] is a list of rules, each naming a gate and optionally one
//! vector index. A rule without an index applies to every vector of that
//! gate. When several rules match a vector, they apply in plan order.

use crate::error::SimError;
use cellcheck_common::Logic;
use std::str::FromStr;

/// What an injected fault does.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FaultKind {
    /// Complements an output; `None` complements every output.
    Invert(Option<String>),
    /// Forces an output to a fixed value.
    StuckAt(String, Logic),
    /// The outputs never settle.
    Timeout,
    /// The device answers with a malformed response.
    Protocol,
}

/// One fault, scoped to a gate and optionally one vector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FaultRule {
    /// Gate archetype name.
    pub gate: String,
    /// Vector index, or `None` for every vector.
    pub vector: Option<usize>,
    /// The fault.
    pub kind: FaultKind,
}

impl FaultRule {
    /// Returns `true` if the rule applies to this vector of this gate.
    pub fn applies(&self, gate: &str, vector: usize) -> bool {
        self.gate == gate && self.vector.is_none_or(|v| v == vector)
    }
}

impl FromStr for FaultRule {
    type Err = SimError;

    /// Parses `GATE` or `GATE:VECTOR` into an output inversion.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| SimError::InvalidFault {
            spec: s.to_string(),
            reason: reason.to_string(),
        };
        let (gate, vector) = match s.split_once(':') {
            Some((gate, index)) => {
                let index = index
                    .trim()
                    .parse()
                    .map_err(|_| invalid("vector index is not a number"))?;
                (gate.trim(), Some(index))
            }
            None => (s.trim(), None),
        };
        if gate.is_empty() {
            return Err(invalid("gate name is empty"));
        }
        Ok(FaultRule {
            gate: gate.to_string(),
            vector,
            kind: FaultKind::Invert(None),
        })
    }
}

/// The set of faults the emulator injects.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FaultPlan {
    rules: Vec<FaultRule>,
}

impl FaultPlan {
    /// A plan with no faults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule.
    pub fn with(mut self, rule: FaultRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds a rule for one gate and optional vector.
    pub fn inject(self, gate: impl Into<String>, vector: Option<usize>, kind: FaultKind) -> Self {
        self.with(FaultRule {
            gate: gate.into(),
            vector,
            kind,
        })
    }

    /// Rules scoped to one gate, in plan order.
    pub fn for_gate(&self, gate: &str) -> Vec<FaultRule> {
        self.rules.iter().filter(|r| r.gate == gate).cloned().collect()
    }

    /// Every rule, in plan order.
    pub fn rules(&self) -> &[FaultRule] {
        &self.rules
    }

    /// Returns `true` if the plan injects nothing.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_gate_only() {
        let rule: FaultRule = "AOI21".parse().unwrap();
        assert_eq!(rule.gate, "AOI21");
        assert_eq!(rule.vector, None);
        assert_eq!(rule.kind, FaultKind::Invert(None));
    }

    #[test]
    fn parse_gate_and_vector() {
        let rule: FaultRule = "MUX2:5".parse().unwrap();
        assert_eq!(rule.vector, Some(5));
        assert!(rule.applies("MUX2", 5));
        assert!(!rule.applies("MUX2", 4));
        assert!(!rule.applies("AOI21", 5));
    }

    #[test]
    fn parse_rejects_bad_specs() {
        assert!(matches!(
            "AOI21:five".parse::<FaultRule>(),
            Err(SimError::InvalidFault { .. })
        ));
        assert!(":3".parse::<FaultRule>().is_err());
    }

    #[test]
    fn plan_filters_by_gate() {
        let plan = FaultPlan::new()
            .inject("NAND2", Some(0), FaultKind::Timeout)
            .inject("INV", None, FaultKind::StuckAt("ZN".into(), Logic::One))
            .inject("NAND2", None, FaultKind::Protocol);
        let nand = plan.for_gate("NAND2");
        assert_eq!(nand.len(), 2);
        assert_eq!(nand[0].kind, FaultKind::Timeout);
        assert!(plan.for_gate("NOR2").is_empty());
        assert_eq!(plan.rules().len(), 3);
    }

    #[test]
    fn gate_wide_rule_applies_everywhere() {
        let rule = FaultRule {
            gate: "INV".into(),
            vector: None,
            kind: FaultKind::Timeout,
        };
        assert!(rule.applies("INV", 0));
        assert!(rule.applies("INV", 1));
    }
}
