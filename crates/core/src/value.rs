//! Value types for tagkv
//!
//! This module defines:
//! - KeyPart: the closed sum type used for key components and stored values
//! - TypeTag: the discriminant of a KeyPart, in canonical rank order
//!
//! ## Type Rules
//!
//! - Seven shapes only: Bool, Number, String, BigInt, Date, Bytes, Array
//! - No implicit coercions: `Number(1.0) != BigInt(1)`
//! - `Bytes` are not `String`
//! - Numbers compare with IEEE-754 totalOrder: `NaN == NaN`, `-0.0 < 0.0`
//!
//! ## Ordering
//!
//! Equality and ordering are total and agree with the string order of the
//! encoded form, so a range bound tested against decoded keys selects the
//! same entries a scan of the backend's sorted keys walks through.
//!
//! - Different types order by [`TypeTag`] rank
//! - Bool, Number and Date order by value
//! - String, BigInt, Bytes and Array order by the decimal text of their
//!   encoded length, then by encoded payload: `"b" < "aa"`, and
//!   `"aaaaaaaaaa"` (length `10`) sorts before `"b"` (length `1`) only
//!   because `"10:"` < `"1:"` as text

use crate::bigint::BigInt;
use crate::codec;
use crate::timestamp::Timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Type discriminator for [`KeyPart`]
///
/// Values sort in this declaration order whenever two parts of different
/// types are compared:
///
/// Boolean < Number < String < BigInt < Date < Bytes < Array
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TypeTag {
    /// `true` / `false`
    Boolean,
    /// 64-bit float
    Number,
    /// UTF-8 text
    String,
    /// Arbitrary-precision integer
    BigInt,
    /// Millisecond instant
    Date,
    /// Opaque bytes
    Bytes,
    /// Nested sequence of parts
    Array,
}

impl TypeTag {
    /// Every tag, in rank order
    pub const ALL: [TypeTag; 7] = [
        TypeTag::Boolean,
        TypeTag::Number,
        TypeTag::String,
        TypeTag::BigInt,
        TypeTag::Date,
        TypeTag::Bytes,
        TypeTag::Array,
    ];

    /// Human readable name
    pub fn name(&self) -> &'static str {
        match self {
            TypeTag::Boolean => "Boolean",
            TypeTag::Number => "Number",
            TypeTag::String => "String",
            TypeTag::BigInt => "BigInt",
            TypeTag::Date => "Date",
            TypeTag::Bytes => "Bytes",
            TypeTag::Array => "Array",
        }
    }
}

/// One typed component of a composite key, or a stored value
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum KeyPart {
    /// Boolean value
    Bool(bool),
    /// 64-bit floating point (IEEE-754)
    Number(f64),
    /// UTF-8 string
    String(String),
    /// Arbitrary-precision integer
    BigInt(BigInt),
    /// Millisecond-resolution instant
    Date(Timestamp),
    /// Raw bytes
    Bytes(Vec<u8>),
    /// Nested parts
    Array(Vec<KeyPart>),
}

impl KeyPart {
    /// The type discriminator of this part
    pub fn type_tag(&self) -> TypeTag {
        match self {
            KeyPart::Bool(_) => TypeTag::Boolean,
            KeyPart::Number(_) => TypeTag::Number,
            KeyPart::String(_) => TypeTag::String,
            KeyPart::BigInt(_) => TypeTag::BigInt,
            KeyPart::Date(_) => TypeTag::Date,
            KeyPart::Bytes(_) => TypeTag::Bytes,
            KeyPart::Array(_) => TypeTag::Array,
        }
    }

    /// Get the type name as a string
    pub fn type_name(&self) -> &'static str {
        self.type_tag().name()
    }

    /// Get as bool if this is a Bool value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            KeyPart::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as f64 if this is a Number value
    pub fn as_number(&self) -> Option<f64> {
        match self {
            KeyPart::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as &str if this is a String value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            KeyPart::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as &BigInt if this is a BigInt value
    pub fn as_bigint(&self) -> Option<&BigInt> {
        match self {
            KeyPart::BigInt(b) => Some(b),
            _ => None,
        }
    }

    /// Get as Timestamp if this is a Date value
    pub fn as_date(&self) -> Option<Timestamp> {
        match self {
            KeyPart::Date(t) => Some(*t),
            _ => None,
        }
    }

    /// Get as &[u8] if this is a Bytes value
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            KeyPart::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Get as &[KeyPart] if this is an Array value
    pub fn as_array(&self) -> Option<&[KeyPart]> {
        match self {
            KeyPart::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Unwrap an Array into its elements
    pub fn into_array(self) -> Option<Vec<KeyPart>> {
        match self {
            KeyPart::Array(a) => Some(a),
            _ => None,
        }
    }
}

impl Ord for KeyPart {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (KeyPart::Bool(a), KeyPart::Bool(b)) => a.cmp(b),
            (KeyPart::Number(a), KeyPart::Number(b)) => a.total_cmp(b),
            (KeyPart::Date(a), KeyPart::Date(b)) => a.cmp(b),
            // Length-prefixed shapes: the encoding is the order.
            (KeyPart::String(_), KeyPart::String(_))
            | (KeyPart::BigInt(_), KeyPart::BigInt(_))
            | (KeyPart::Bytes(_), KeyPart::Bytes(_))
            | (KeyPart::Array(_), KeyPart::Array(_)) => {
                codec::encode(self).cmp(&codec::encode(other))
            }
            _ => self.type_tag().cmp(&other.type_tag()),
        }
    }
}

impl PartialOrd for KeyPart {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Equality must agree with `Ord`, so floats compare by totalOrder here too.
impl PartialEq for KeyPart {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for KeyPart {}

// ============================================================================
// From implementations for ergonomic API usage
// ============================================================================

impl From<bool> for KeyPart {
    fn from(b: bool) -> Self {
        KeyPart::Bool(b)
    }
}

impl From<f64> for KeyPart {
    fn from(n: f64) -> Self {
        KeyPart::Number(n)
    }
}

impl From<f32> for KeyPart {
    fn from(n: f32) -> Self {
        KeyPart::Number(n as f64)
    }
}

impl From<i32> for KeyPart {
    fn from(n: i32) -> Self {
        KeyPart::Number(n as f64)
    }
}

impl From<u32> for KeyPart {
    fn from(n: u32) -> Self {
        KeyPart::Number(n as f64)
    }
}

impl From<&str> for KeyPart {
    fn from(s: &str) -> Self {
        KeyPart::String(s.to_string())
    }
}

impl From<String> for KeyPart {
    fn from(s: String) -> Self {
        KeyPart::String(s)
    }
}

impl From<BigInt> for KeyPart {
    fn from(b: BigInt) -> Self {
        KeyPart::BigInt(b)
    }
}

impl From<Timestamp> for KeyPart {
    fn from(t: Timestamp) -> Self {
        KeyPart::Date(t)
    }
}

impl From<DateTime<Utc>> for KeyPart {
    fn from(dt: DateTime<Utc>) -> Self {
        KeyPart::Date(Timestamp::from(dt))
    }
}

impl From<Vec<u8>> for KeyPart {
    fn from(b: Vec<u8>) -> Self {
        KeyPart::Bytes(b)
    }
}

impl From<&[u8]> for KeyPart {
    fn from(b: &[u8]) -> Self {
        KeyPart::Bytes(b.to_vec())
    }
}

impl From<Vec<KeyPart>> for KeyPart {
    fn from(a: Vec<KeyPart>) -> Self {
        KeyPart::Array(a)
    }
}

/// Build a `Vec<KeyPart>` from heterogeneous literals
///
/// ```
/// use tagkv_core::{key, KeyPart};
///
/// let k = key!["users", 42, true];
/// assert_eq!(k[0], KeyPart::String("users".into()));
/// assert_eq!(k[1], KeyPart::Number(42.0));
/// ```
#[macro_export]
macro_rules! key {
    () => {
        ::std::vec::Vec::<$crate::KeyPart>::new()
    };
    ($($part:expr),+ $(,)?) => {
        ::std::vec![$($crate::KeyPart::from($part)),+]
    };
}
