//! Time spans with unit parsing and display, stored in femtoseconds.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Femtoseconds per unit, largest first.
const UNITS: [(&str, u64); 5] = [
    ("ms", 1_000_000_000_000),
    ("us", 1_000_000_000),
    ("ns", 1_000_000),
    ("ps", 1_000),
    ("fs", 1),
];

/// A non-negative time span in femtoseconds.
///
/// Parses strings like "10ns", "2.5ns", "500ps", "1us"; a bare number is
/// taken as nanoseconds. Displays with the largest unit that divides it
/// exactly.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Delay(u64);

impl Delay {
    /// Creates a delay from femtoseconds.
    pub const fn from_fs(fs: u64) -> Self {
        Self(fs)
    }

    /// Creates a delay from nanoseconds.
    pub const fn from_ns(ns: u64) -> Self {
        Self(ns * 1_000_000)
    }

    /// Returns the delay in femtoseconds.
    pub fn fs(self) -> u64 {
        self.0
    }

    /// Returns `true` for a zero-length delay.
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for Delay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Delay({self})")
    }
}

impl fmt::Display for Delay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return write!(f, "0ns");
        }
        for (suffix, scale) in UNITS {
            if self.0 % scale == 0 {
                return write!(f, "{}{suffix}", self.0 / scale);
            }
        }
        write!(f, "{}fs", self.0)
    }
}

/// Error returned when a string is not a valid delay.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid delay: '{input}'")]
pub struct ParseDelayError {
    /// The input string that failed to parse.
    pub input: String,
}

impl FromStr for Delay {
    type Err = ParseDelayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let err = || ParseDelayError {
            input: s.to_string(),
        };
        let lower = s.to_ascii_lowercase();
        let (num, scale) = UNITS
            .iter()
            .find_map(|&(suffix, scale)| lower.strip_suffix(suffix).map(|n| (n, scale)))
            .unwrap_or((lower.as_str(), 1_000_000));
        let val: f64 = num.trim().parse().map_err(|_| err())?;
        let fs = val * scale as f64;
        if !fs.is_finite() || fs < 0.0 || fs > u64::MAX as f64 {
            return Err(err());
        }
        Ok(Delay(fs.round() as u64))
    }
}

impl Serialize for Delay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Delay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
