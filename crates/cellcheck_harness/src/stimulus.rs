//! Deterministic stimulus generation.
//!
//! A [`StimulusSet`] is a finite, restartable description of the vectors a
//! gate will see. Nothing is materialised up front: [`StimulusSet::iter`]
//! builds each [`LogicVec`] on demand, and calling it again replays the same
//! sequence from the start.

use crate::error::StimulusError;
use cellcheck_common::{LogicVec, VectorPolicy};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;

/// Largest arity the boolean policies support (2^63 vectors).
pub const MAX_ARITY: usize = 63;

/// Largest arity the unknown-states policy supports (3^20 vectors).
pub const MAX_UNKNOWN_STATE_ARITY: usize = 20;

/// Returns the exhaustive binary-counting sequence for `arity` inputs.
///
/// Vector `i` assigns bit `arity - 1 - p` of `i` to port `p`.
pub fn generate(arity: usize) -> Result<StimulusSet, StimulusError> {
    StimulusSet::exhaustive(arity)
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Order {
    /// Indices `0..len` in binary counting.
    Binary { len: u64 },
    /// A sorted subset of binary-counting indices.
    Sampled(Vec<u64>),
    /// Indices `0..len` in base-3 counting over `{0, 1, X}`.
    Ternary { len: u64 },
}

/// The vectors one gate will be driven with, in visiting order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StimulusSet {
    arity: u32,
    order: Order,
    requested: Option<usize>,
}

impl StimulusSet {
    /// Builds the set a policy selects for a gate of the given arity.
    pub fn for_policy(arity: usize, policy: &VectorPolicy) -> Result<Self, StimulusError> {
        match policy {
            VectorPolicy::Exhaustive => Self::exhaustive(arity),
            VectorPolicy::BoundedRandom { seed, count } => {
                Self::bounded_random(arity, *seed, *count)
            }
            VectorPolicy::UnknownStates => Self::unknown_states(arity),
        }
    }

    /// All 2^arity boolean vectors in binary-counting order.
    pub fn exhaustive(arity: usize) -> Result<Self, StimulusError> {
        check_arity(arity, MAX_ARITY)?;
        Ok(Self {
            arity: arity as u32,
            order: Order::Binary { len: 1u64 << arity },
            requested: None,
        })
    }

    /// `min(count, 2^arity)` distinct boolean vectors drawn with a PRNG seeded
    /// from `seed`, visited in ascending binary-counting order.
    ///
    /// A count that covers the whole space degenerates to the exhaustive
    /// sequence; [`was_clamped`](Self::was_clamped) reports whether the
    /// request was larger than the space.
    pub fn bounded_random(arity: usize, seed: u64, count: usize) -> Result<Self, StimulusError> {
        check_arity(arity, MAX_ARITY)?;
        if count == 0 {
            return Err(StimulusError::EmptySample);
        }
        let space = 1u64 << arity;
        let order = if count as u64 >= space {
            Order::Binary { len: space }
        } else {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut picked = BTreeSet::new();
            while picked.len() < count {
                picked.insert(rng.gen_range(0..space));
            }
            Order::Sampled(picked.into_iter().collect())
        };
        Ok(Self {
            arity: arity as u32,
            order,
            requested: Some(count),
        })
    }

    /// All 3^arity vectors over `{0, 1, X}` in base-3 counting order.
    pub fn unknown_states(arity: usize) -> Result<Self, StimulusError> {
        check_arity(arity, MAX_UNKNOWN_STATE_ARITY)?;
        Ok(Self {
            arity: arity as u32,
            order: Order::Ternary {
                len: 3u64.pow(arity as u32),
            },
            requested: None,
        })
    }

    /// Number of inputs each vector assigns.
    pub fn arity(&self) -> usize {
        self.arity as usize
    }

    /// Number of vectors in the set.
    pub fn len(&self) -> u64 {
        match &self.order {
            Order::Binary { len } | Order::Ternary { len } => *len,
            Order::Sampled(indices) => indices.len() as u64,
        }
    }

    /// Returns `true` if the set has no vectors.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if a bounded-random request exceeded 2^arity.
    pub fn was_clamped(&self) -> bool {
        self.requested.is_some_and(|count| count as u64 > self.len())
    }

    /// The vector count originally requested, for bounded-random sets.
    pub fn requested(&self) -> Option<usize> {
        self.requested
    }

    /// Returns the vector at a position in visiting order.
    pub fn get(&self, position: u64) -> Option<LogicVec> {
        match &self.order {
            Order::Binary { len } => {
                (position < *len).then(|| LogicVec::from_index(position, self.arity))
            }
            Order::Sampled(indices) => usize::try_from(position)
                .ok()
                .and_then(|p| indices.get(p))
                .map(|&i| LogicVec::from_index(i, self.arity)),
            Order::Ternary { len } => {
                (position < *len).then(|| LogicVec::from_ternary_index(position, self.arity))
            }
        }
    }

    /// Iterates the vectors from the start.
    pub fn iter(&self) -> Vectors<'_> {
        Vectors {
            set: self,
            next: 0,
            end: self.len(),
        }
    }
}

impl<'a> IntoIterator for &'a StimulusSet {
    type Item = LogicVec;
    type IntoIter = Vectors<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy iterator over a [`StimulusSet`].
#[derive(Clone, Debug)]
pub struct Vectors<'a> {
    set: &'a StimulusSet,
    next: u64,
    end: u64,
}

impl Iterator for Vectors<'_> {
    type Item = LogicVec;

    fn next(&mut self) -> Option<LogicVec> {
        if self.next >= self.end {
            return None;
        }
        let v = self.set.get(self.next);
        self.next += 1;
        v
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.end - self.next;
        match usize::try_from(rest) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

fn check_arity(arity: usize, max: usize) -> Result<(), StimulusError> {
    if arity == 0 || arity > max {
        return Err(StimulusError::Arity { arity, max });
    }
    Ok(())
}
