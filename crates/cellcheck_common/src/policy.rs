//! Run options shared by the configuration loader, the harness, and the CLI.

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// How stimulus vectors are chosen for a gate.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "policy", rename_all = "kebab-case")]
pub enum VectorPolicy {
    /// Every one of the 2^k boolean vectors, in binary-counting order.
    #[default]
    Exhaustive,
    /// A seeded subset of `count` distinct boolean vectors, visited in
    /// ascending binary-counting order.
    BoundedRandom {
        /// PRNG seed; equal seeds select equal subsets.
        seed: u64,
        /// Number of vectors to draw (clamped to 2^k).
        count: usize,
    },
    /// Every one of the 3^k vectors over `{0, 1, X}`, for X-propagation checks.
    UnknownStates,
}

impl fmt::Display for VectorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VectorPolicy::Exhaustive => write!(f, "exhaustive"),
            VectorPolicy::BoundedRandom { seed, count } => {
                write!(f, "bounded-random(seed={seed}, count={count})")
            }
            VectorPolicy::UnknownStates => write!(f, "unknown-states"),
        }
    }
}

/// Which registered gates a run covers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum GateFilter {
    /// Every registered gate.
    #[default]
    All,
    /// Only the named gates (exact, case-sensitive names).
    Only(BTreeSet<String>),
}

impl GateFilter {
    /// Builds a filter admitting only the given names.
    pub fn only<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        GateFilter::Only(names.into_iter().map(Into::into).collect())
    }

    /// Returns `true` if the named gate is selected.
    pub fn admits(&self, name: &str) -> bool {
        match self {
            GateFilter::All => true,
            GateFilter::Only(names) => names.contains(name),
        }
    }

    /// Returns the explicit name set, if any.
    pub fn names(&self) -> Option<&BTreeSet<String>> {
        match self {
            GateFilter::All => None,
            GateFilter::Only(names) => Some(names),
        }
    }
}
