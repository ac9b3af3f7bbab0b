//! Packed, port-ordered vectors of 4-state logic values.
//!
//! A [`LogicVec`] holds one value per cell port, in the port order declared by
//! the gate descriptor. Position 0 is the first declared port. When a vector is
//! derived from a counting index, the first port is the most significant digit,
//! so printing a vector left to right reads as the index in binary.

use crate::logic::Logic;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Number of logic values packed per u64 word.
const VALUES_PER_WORD: u32 = 32;

/// A vector of 4-state [`Logic`] values, one per port.
///
/// Each value occupies 2 bits, with 32 values packed per `u64` word.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct LogicVec {
    width: u32,
    data: Vec<u64>,
}

/// Error returned when a string is not a valid logic vector.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid logic character '{found}' at position {position}")]
pub struct ParseLogicVecError {
    /// The offending character.
    pub found: char,
    /// Zero-based character position.
    pub position: usize,
}

impl LogicVec {
    /// Creates a vector of the given width with every position set to `Zero`.
    pub fn new(width: u32) -> Self {
        Self {
            width,
            data: vec![0; word_count(width)],
        }
    }

    /// Creates a vector of the given width with every position set to `value`.
    pub fn filled(width: u32, value: Logic) -> Self {
        let mut v = Self::new(width);
        for i in 0..width {
            v.set(i, value);
        }
        v
    }

    /// Returns the number of positions in this vector.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns `true` if the vector has no positions.
    pub fn is_empty(&self) -> bool {
        self.width == 0
    }

    /// Gets the value at the given port position.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.width()`.
    pub fn get(&self, index: u32) -> Logic {
        assert!(
            index < self.width,
            "index {index} out of bounds for width {}",
            self.width
        );
        let word_idx = (index / VALUES_PER_WORD) as usize;
        let bit_offset = (index % VALUES_PER_WORD) * 2;
        match (self.data[word_idx] >> bit_offset) & 0b11 {
            0 => Logic::Zero,
            1 => Logic::One,
            2 => Logic::X,
            _ => Logic::Z,
        }
    }

    /// Sets the value at the given port position.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.width()`.
    pub fn set(&mut self, index: u32, value: Logic) {
        assert!(
            index < self.width,
            "index {index} out of bounds for width {}",
            self.width
        );
        let word_idx = (index / VALUES_PER_WORD) as usize;
        let bit_offset = (index % VALUES_PER_WORD) * 2;
        let mask = !(0b11u64 << bit_offset);
        self.data[word_idx] = (self.data[word_idx] & mask) | ((value as u64) << bit_offset);
    }

    /// Iterates over the values in port order.
    pub fn iter(&self) -> impl Iterator<Item = Logic> + '_ {
        (0..self.width).map(move |i| self.get(i))
    }

    /// Builds the vector for a binary-counting index.
    ///
    /// Port `p` receives bit `width - 1 - p` of `index`, so the first port is
    /// the most significant bit.
    pub fn from_index(index: u64, width: u32) -> Self {
        let mut v = Self::new(width);
        for p in 0..width {
            let bit = width - 1 - p;
            if bit < 64 && (index >> bit) & 1 != 0 {
                v.set(p, Logic::One);
            }
        }
        v
    }

    /// Returns the binary-counting index of a fully known vector.
    ///
    /// Returns `None` if any position is `X`/`Z` or the width exceeds 64.
    pub fn to_index(&self) -> Option<u64> {
        if self.width > 64 {
            return None;
        }
        self.iter().try_fold(0u64, |acc, v| {
            v.to_bool().map(|b| (acc << 1) | u64::from(b))
        })
    }

    /// Builds the vector for a base-3 counting index over `{0, 1, X}`.
    ///
    /// The first port is the most significant digit; digit 2 maps to `X`.
    pub fn from_ternary_index(index: u64, width: u32) -> Self {
        let mut v = Self::new(width);
        let mut rest = index;
        for p in (0..width).rev() {
            let value = match rest % 3 {
                0 => Logic::Zero,
                1 => Logic::One,
                _ => Logic::X,
            };
            v.set(p, value);
            rest /= 3;
        }
        v
    }

    /// Builds a vector from booleans in port order.
    pub fn from_bools(values: &[bool]) -> Self {
        values.iter().map(|&b| Logic::from_bool(b)).collect()
    }

    /// Converts to booleans, if every position is known.
    pub fn to_bools(&self) -> Option<Vec<bool>> {
        self.iter().map(Logic::to_bool).collect()
    }

    /// Returns `true` if no position is `X` or `Z`.
    pub fn is_fully_known(&self) -> bool {
        self.iter().all(Logic::is_known)
    }

    /// Position-wise [`Logic::matches`] of `self` (expected) against `actual`.
    ///
    /// Vectors of different widths never match.
    pub fn matches(&self, actual: &LogicVec) -> bool {
        self.width == actual.width && self.iter().zip(actual.iter()).all(|(e, a)| e.matches(a))
    }
}

impl FromIterator<Logic> for LogicVec {
    fn from_iter<I: IntoIterator<Item = Logic>>(iter: I) -> Self {
        let values: Vec<Logic> = iter.into_iter().collect();
        let mut v = Self::new(values.len() as u32);
        for (i, value) in values.into_iter().enumerate() {
            v.set(i as u32, value);
        }
        v
    }
}

impl FromStr for LogicVec {
    type Err = ParseLogicVecError;

    /// Parses a string like `"01X"`; the leftmost character is port 0.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .enumerate()
            .map(|(position, found)| {
                Logic::from_char(found).ok_or(ParseLogicVecError { found, position })
            })
            .collect()
    }
}

impl fmt::Display for LogicVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for v in self.iter() {
            write!(f, "{}", v.as_char())?;
        }
        Ok(())
    }
}

impl fmt::Debug for LogicVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LogicVec(\"{self}\")")
    }
}

impl Serialize for LogicVec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LogicVec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Computes the number of u64 words needed to store `width` logic values.
fn word_count(width: u32) -> usize {
    width.div_ceil(VALUES_PER_WORD) as usize
}
