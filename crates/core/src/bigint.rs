//! Arbitrary-precision integers
//!
//! Keys never do arithmetic on big integers, they only store, compare and
//! round-trip them. `BigInt` therefore keeps the canonical decimal text and
//! orders it by sign, then digit count, then digits.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Arbitrary-precision signed integer in canonical decimal form
///
/// Canonical means: optional `-`, no leading zeros, and zero is never
/// negative. Two `BigInt`s are equal iff their texts are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BigInt(String);

/// Error returned when text is not a decimal integer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid big integer literal: {0:?}")]
pub struct ParseBigIntError(String);

impl BigInt {
    /// Zero
    pub fn zero() -> Self {
        BigInt("0".to_string())
    }

    /// Canonical decimal text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the value is strictly negative
    pub fn is_negative(&self) -> bool {
        self.0.starts_with('-')
    }

    /// Decimal digits without the sign
    fn magnitude(&self) -> &str {
        self.0.strip_prefix('-').unwrap_or(&self.0)
    }

    /// Convert to `i128` if it fits
    pub fn to_i128(&self) -> Option<i128> {
        self.0.parse().ok()
    }
}

impl FromStr for BigInt {
    type Err = ParseBigIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (negative, digits) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseBigIntError(s.to_string()));
        }

        let trimmed = digits.trim_start_matches('0');
        if trimmed.is_empty() {
            return Ok(BigInt::zero());
        }
        let mut text = String::with_capacity(trimmed.len() + 1);
        if negative {
            text.push('-');
        }
        text.push_str(trimmed);
        Ok(BigInt(text))
    }
}

impl TryFrom<String> for BigInt {
    type Error = ParseBigIntError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<BigInt> for String {
    fn from(b: BigInt) -> Self {
        b.0
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for BigInt {
                fn from(v: $t) -> Self {
                    BigInt(v.to_string())
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl Ord for BigInt {
    fn cmp(&self, other: &Self) -> Ordering {
        let by_magnitude = || {
            let (a, b) = (self.magnitude(), other.magnitude());
            a.len().cmp(&b.len()).then_with(|| a.cmp(b))
        };
        match (self.is_negative(), other.is_negative()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => by_magnitude(),
            (true, true) => by_magnitude().reverse(),
        }
    }
}

impl PartialOrd for BigInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
