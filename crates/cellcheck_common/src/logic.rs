//! IEEE 1164 four-state logic values with truth-table-based operators.
//!
//! Cell functions are evaluated with these operators, so the same expression
//! gives the exact boolean result for known inputs and the pessimistic
//! X-propagation result when any input is unknown.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitOr, BitXor, Not};

/// One cell pin value. `X` is what every signal holds before it is first
/// driven. `Z` only appears when a faulty device leaves a pin floating.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[repr(u8)]
pub enum Logic {
    /// Driven low.
    Zero = 0,
    /// Driven high.
    One = 1,
    /// Unknown.
    X = 2,
    /// Floating.
    Z = 3,
}

impl Logic {
    /// Parses one vector character, either case for `x` and `z`.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(Logic::Zero),
            '1' => Some(Logic::One),
            'x' | 'X' => Some(Logic::X),
            'z' | 'Z' => Some(Logic::Z),
            _ => None,
        }
    }

    /// Returns the character used when printing vectors.
    pub fn as_char(self) -> char {
        match self {
            Logic::Zero => '0',
            Logic::One => '1',
            Logic::X => 'X',
            Logic::Z => 'Z',
        }
    }

    /// Converts a boolean into a driven `Zero`/`One`.
    pub fn from_bool(value: bool) -> Self {
        if value {
            Logic::One
        } else {
            Logic::Zero
        }
    }

    /// Returns the boolean value, or `None` for `X` and `Z`.
    pub fn to_bool(self) -> Option<bool> {
        match self {
            Logic::Zero => Some(false),
            Logic::One => Some(true),
            Logic::X | Logic::Z => None,
        }
    }

    /// Returns `true` for `Zero` and `One`.
    pub fn is_known(self) -> bool {
        matches!(self, Logic::Zero | Logic::One)
    }

    /// Checks a sampled value against an expected one.
    ///
    /// A known expectation must be met exactly. An expected `X` is met by any
    /// unresolvable sample (`X` or `Z`), but not by a driven `0`/`1`.
    pub fn matches(self, actual: Logic) -> bool {
        match self {
            Logic::Zero | Logic::One => self == actual,
            Logic::X | Logic::Z => !actual.is_known(),
        }
    }

    /// Reduction AND over a sequence of values. Empty input yields `One`.
    pub fn all(values: impl IntoIterator<Item = Logic>) -> Logic {
        values.into_iter().fold(Logic::One, |acc, v| acc & v)
    }

    /// Reduction OR over a sequence of values. Empty input yields `Zero`.
    pub fn any(values: impl IntoIterator<Item = Logic>) -> Logic {
        values.into_iter().fold(Logic::Zero, |acc, v| acc | v)
    }

    /// Reduction XOR (odd parity) over a sequence of values.
    pub fn parity(values: impl IntoIterator<Item = Logic>) -> Logic {
        values.into_iter().fold(Logic::Zero, |acc, v| acc ^ v)
    }
}

impl From<bool> for Logic {
    fn from(value: bool) -> Self {
        Logic::from_bool(value)
    }
}

impl fmt::Display for Logic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// IEEE 1164 AND truth table:
/// ```text
///     0  1  X  Z
/// 0 | 0  0  0  0
/// 1 | 0  1  X  X
/// X | 0  X  X  X
/// Z | 0  X  X  X
/// ```
impl BitAnd for Logic {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        use Logic::*;
        match (self, rhs) {
            (Zero, _) | (_, Zero) => Zero,
            (One, One) => One,
            _ => X,
        }
    }
}

/// IEEE 1164 OR truth table:
/// ```text
///     0  1  X  Z
/// 0 | 0  1  X  X
/// 1 | 1  1  1  1
/// X | X  1  X  X
/// Z | X  1  X  X
/// ```
impl BitOr for Logic {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        use Logic::*;
        match (self, rhs) {
            (One, _) | (_, One) => One,
            (Zero, Zero) => Zero,
            _ => X,
        }
    }
}

/// IEEE 1164 XOR: any unknown operand gives `X`.
impl BitXor for Logic {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self {
        use Logic::*;
        match (self, rhs) {
            (Zero, Zero) | (One, One) => Zero,
            (Zero, One) | (One, Zero) => One,
            _ => X,
        }
    }
}

/// IEEE 1164 NOT: `!0 = 1`, `!1 = 0`, `!X = X`, `!Z = X`
impl Not for Logic {
    type Output = Self;

    fn not(self) -> Self {
        use Logic::*;
        match self {
            Zero => One,
            One => Zero,
            X | Z => X,
        }
    }
}
