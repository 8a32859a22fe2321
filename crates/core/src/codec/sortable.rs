//! Order-preserving integer images of numbers and instants.
//!
//! Numbers and dates are written as fixed-width hex of a `u64` whose unsigned
//! order matches the source order, so comparing the encoded text compares
//! the values.
//!
//! - `i64`: flip the sign bit. Negatives land in `0x0...` and positives
//!   in `0x8...`, relative order inside each half is kept.
//! - `f64`: negative floats flip every bit, non-negative floats flip only
//!   the sign bit. The resulting order is IEEE-754 totalOrder, the same
//!   order as [`f64::total_cmp`].

const SIGN_BIT: u64 = 0x8000_0000_0000_0000;

/// Map an i64 onto u64 preserving order
#[inline]
pub const fn encode_i64_sortable(value: i64) -> u64 {
    (value as u64) ^ SIGN_BIT
}

/// Inverse of [`encode_i64_sortable`]
#[inline]
pub const fn decode_i64_sortable(sortable: u64) -> i64 {
    (sortable ^ SIGN_BIT) as i64
}

/// Map an f64 onto u64 preserving totalOrder
#[inline]
pub const fn encode_f64_sortable(value: f64) -> u64 {
    let bits = value.to_bits();
    if bits & SIGN_BIT != 0 {
        !bits
    } else {
        bits ^ SIGN_BIT
    }
}

/// Inverse of [`encode_f64_sortable`]
#[inline]
pub const fn decode_f64_sortable(sortable: u64) -> f64 {
    let bits = if sortable & SIGN_BIT != 0 {
        sortable ^ SIGN_BIT
    } else {
        !sortable
    };
    f64::from_bits(bits)
}
