//! Typed string codec.
//!
//! Converts [`KeyPart`]s to and from plain text so they can be stored in a
//! string-keyed backend, and so that a composite key is one backend key.
//!
//! # Format
//!
//! Every part starts with a one-character type tag. Tags are
//! non-alphanumeric, which keeps them distinct from namespace prefixes, and
//! ascend in [`TypeTag`] rank order.
//!
//! | Type    | Tag | Payload                                           |
//! |---------|-----|---------------------------------------------------|
//! | Boolean | `!` | `0` or `1`                                        |
//! | Number  | `#` | 16 uppercase hex digits, order-preserving f64     |
//! | String  | `$` | `<len>:` then `len` bytes of UTF-8                |
//! | BigInt  | `%` | `<len>:` then `len` bytes of canonical decimal    |
//! | Date    | `&` | 16 uppercase hex digits, order-preserving i64 ms  |
//! | Bytes   | `*` | `<len>:` then `len` chars of padded base64        |
//! | Array   | `[` | `<len>:` then `len` bytes of element encodings    |
//!
//! Fixed-width payloads end where the width says; variable payloads carry
//! their decimal byte length, so nothing ever scans for a terminator inside
//! user data. A concatenation of encodings decodes back into the same parts.
//!
//! A key tuple is its parts' encodings written back to back, with no outer
//! tag or length, so backend string order compares keys part by part from
//! the left. The code is prefix-free: two different part encodings always
//! differ before either one ends.
//!
//! Because Number and Date payloads are fixed-width and order-preserving,
//! comparing two encodings as strings orders numbers by
//! [`f64::total_cmp`] and dates chronologically, across signs and
//! magnitudes. Length-prefixed types sort by the decimal text of their
//! length first, then by payload; [`KeyPart`]'s `Ord` follows the same
//! rule so that decoded and encoded order agree.
//!
//! # Usage
//!
//! ```
//! use tagkv_core::codec::{decode_key, encode_key};
//! use tagkv_core::key;
//!
//! let parts = key!["users", 42, true];
//! let encoded = encode_key(&parts);
//! assert_eq!(decode_key(&encoded).unwrap(), parts);
//! ```

mod error;
pub mod sortable;

pub use error::CodecError;

use crate::bigint::BigInt;
use crate::timestamp::Timestamp;
use crate::value::{KeyPart, TypeTag};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use sortable::{decode_f64_sortable, decode_i64_sortable, encode_f64_sortable, encode_i64_sortable};
use std::fmt::Write;

/// Separates a decimal length prefix from its payload.
pub const LENGTH_DELIMITER: char = ':';

/// Width of the hex payload of Number and Date parts.
const FIXED_HEX_WIDTH: usize = 16;

impl TypeTag {
    /// Wire character of this tag
    pub const fn as_char(&self) -> char {
        match self {
            TypeTag::Boolean => '!',
            TypeTag::Number => '#',
            TypeTag::String => '$',
            TypeTag::BigInt => '%',
            TypeTag::Date => '&',
            TypeTag::Bytes => '*',
            TypeTag::Array => '[',
        }
    }

    /// Parse a wire character
    pub fn from_char(c: char) -> Option<Self> {
        TypeTag::ALL.into_iter().find(|tag| tag.as_char() == c)
    }
}

/// Encode one part.
pub fn encode(value: &KeyPart) -> String {
    let mut out = String::new();
    encode_into(value, &mut out);
    out
}

/// Encode a key tuple as the concatenation of its part encodings.
///
/// There is no outer wrapper, so comparing two encoded keys compares their
/// first parts before anything else, and `encode_key(a) + encode_key(b)`
/// is the encoding of `a` followed by `b`. The empty tuple encodes to `""`.
pub fn encode_key(parts: &[KeyPart]) -> String {
    let mut out = String::new();
    for part in parts {
        encode_into(part, &mut out);
    }
    out
}

/// Decode exactly one part; the whole input must be consumed.
pub fn decode(input: &str) -> Result<KeyPart, CodecError> {
    let (value, rest) = decode_prefix(input)?;
    if !rest.is_empty() {
        return Err(CodecError::TrailingData(rest.len()));
    }
    Ok(value)
}

/// Decode a key tuple produced by [`encode_key`], reading parts until the
/// input is used up.
pub fn decode_key(mut input: &str) -> Result<Vec<KeyPart>, CodecError> {
    let mut parts = Vec::new();
    while !input.is_empty() {
        let (part, rest) = decode_prefix(input)?;
        parts.push(part);
        input = rest;
    }
    Ok(parts)
}

/// Decode the first part of `input`, returning it with the unread remainder.
pub fn decode_prefix(input: &str) -> Result<(KeyPart, &str), CodecError> {
    let c = input.chars().next().ok_or(CodecError::UnexpectedEnd)?;
    let tag = TypeTag::from_char(c).ok_or(CodecError::UnknownTag(c))?;
    let body = &input[c.len_utf8()..];

    match tag {
        TypeTag::Boolean => {
            let (flag, rest) = split_fixed(body, 1)?;
            let value = match flag {
                "0" => false,
                "1" => true,
                other => return Err(invalid(tag, format!("boolean flag {:?}", other))),
            };
            Ok((KeyPart::Bool(value), rest))
        }
        TypeTag::Number => {
            let (hex, rest) = split_fixed(body, FIXED_HEX_WIDTH)?;
            let bits = parse_hex(tag, hex)?;
            Ok((KeyPart::Number(decode_f64_sortable(bits)), rest))
        }
        TypeTag::String => {
            let (payload, rest) = split_sized(tag, body)?;
            Ok((KeyPart::String(payload.to_string()), rest))
        }
        TypeTag::BigInt => {
            let (payload, rest) = split_sized(tag, body)?;
            let value: BigInt = payload.parse().map_err(|e| invalid(tag, e))?;
            if value.as_str() != payload {
                return Err(invalid(tag, "non-canonical decimal"));
            }
            Ok((KeyPart::BigInt(value), rest))
        }
        TypeTag::Date => {
            let (hex, rest) = split_fixed(body, FIXED_HEX_WIDTH)?;
            let millis = decode_i64_sortable(parse_hex(tag, hex)?);
            Ok((KeyPart::Date(Timestamp::from_millis(millis)), rest))
        }
        TypeTag::Bytes => {
            let (payload, rest) = split_sized(tag, body)?;
            let bytes = BASE64.decode(payload).map_err(|e| invalid(tag, e))?;
            Ok((KeyPart::Bytes(bytes), rest))
        }
        TypeTag::Array => {
            let (payload, rest) = split_sized(tag, body)?;
            Ok((KeyPart::Array(decode_key(payload)?), rest))
        }
    }
}

fn encode_into(value: &KeyPart, out: &mut String) {
    match value {
        KeyPart::Bool(b) => {
            out.push(TypeTag::Boolean.as_char());
            out.push(if *b { '1' } else { '0' });
        }
        KeyPart::Number(n) => push_hex(out, TypeTag::Number, encode_f64_sortable(*n)),
        KeyPart::String(s) => push_sized(out, TypeTag::String, s),
        KeyPart::BigInt(b) => push_sized(out, TypeTag::BigInt, b.as_str()),
        KeyPart::Date(t) => push_hex(out, TypeTag::Date, encode_i64_sortable(t.as_millis())),
        KeyPart::Bytes(b) => push_sized(out, TypeTag::Bytes, &BASE64.encode(b)),
        KeyPart::Array(items) => push_sized(out, TypeTag::Array, &encode_key(items)),
    }
}

fn push_hex(out: &mut String, tag: TypeTag, value: u64) {
    out.push(tag.as_char());
    // Writing into a String cannot fail.
    let _ = write!(out, "{:016X}", value);
}

fn push_sized(out: &mut String, tag: TypeTag, payload: &str) {
    out.push(tag.as_char());
    let _ = write!(out, "{}{}", payload.len(), LENGTH_DELIMITER);
    out.push_str(payload);
}

/// Split off exactly `width` bytes.
fn split_fixed(body: &str, width: usize) -> Result<(&str, &str), CodecError> {
    let head = body.get(..width).ok_or(CodecError::UnexpectedEnd)?;
    Ok((head, &body[width..]))
}

/// Read `<len>:` and split off `len` bytes of payload.
fn split_sized(tag: TypeTag, body: &str) -> Result<(&str, &str), CodecError> {
    let digits_len = body.bytes().take_while(u8::is_ascii_digit).count();
    let digits = &body[..digits_len];
    if digits.is_empty() {
        return Err(if body.is_empty() {
            CodecError::UnexpectedEnd
        } else {
            CodecError::InvalidLength(tag.as_char())
        });
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return Err(CodecError::InvalidLength(tag.as_char()));
    }
    let len: usize = digits
        .parse()
        .map_err(|_| CodecError::InvalidLength(tag.as_char()))?;

    let after_digits = &body[digits_len..];
    let rest = match after_digits.strip_prefix(LENGTH_DELIMITER) {
        Some(rest) => rest,
        None if after_digits.is_empty() => return Err(CodecError::UnexpectedEnd),
        None => return Err(CodecError::InvalidLength(tag.as_char())),
    };
    if rest.len() < len {
        return Err(CodecError::UnexpectedEnd);
    }
    let payload = rest
        .get(..len)
        .ok_or_else(|| invalid(tag, "length splits a character"))?;
    Ok((payload, &rest[len..]))
}

fn parse_hex(tag: TypeTag, hex: &str) -> Result<u64, CodecError> {
    if !hex.bytes().all(|b| matches!(b, b'0'..=b'9' | b'A'..=b'F')) {
        return Err(invalid(tag, format!("not uppercase hex: {:?}", hex)));
    }
    u64::from_str_radix(hex, 16).map_err(|e| invalid(tag, e))
}

fn invalid(tag: TypeTag, reason: impl ToString) -> CodecError {
    CodecError::InvalidPayload {
        tag: tag.as_char(),
        reason: reason.to_string(),
    }
}
