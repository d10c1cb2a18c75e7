//! Arbitrary-precision integer support for exact base
//! conversion.
//!
//! The converters only need a handful of big-integer
//! capabilities: multiplication, division with remainder,
//! comparison, and left shifts. [`Natural`] names exactly that
//! set so the conversion code is written against capabilities
//! rather than a concrete representation; [`BigUint`] is the
//! implementation the crate runs on.

use core::{fmt, ops::Shl};

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::ToPrimitive;

/// An unsigned integer of unbounded width.
///
/// The bound covers multiplication, division with remainder
/// (via [`Integer`]), ordering, and left shifts; the methods add
/// the small amount of base-10 and width plumbing the converters
/// need.
pub trait Natural: Integer + Clone + Shl<usize, Output = Self> + fmt::Debug {
    /// Returns the number of significant bits, which is zero for
    /// zero.
    fn bit_len(&self) -> u64;

    /// Parses an ASCII base-10 digit string.
    ///
    /// Leading zeros are allowed. Returns `None` if `digits` is
    /// empty or contains a non-digit byte.
    fn from_digits(digits: &[u8]) -> Option<Self>;

    /// Converts from a `u64`.
    fn from_u64(n: u64) -> Self;

    /// Narrows to a `u64`, or `None` if the value does not fit.
    fn to_u64(&self) -> Option<u64>;

    /// Returns the base-10 digit string, without sign or leading
    /// zeros.
    fn to_digits(&self) -> String;
}

impl Natural for BigUint {
    fn bit_len(&self) -> u64 {
        self.bits()
    }

    fn from_digits(digits: &[u8]) -> Option<Self> {
        if digits.is_empty() {
            return None;
        }
        BigUint::parse_bytes(digits, 10)
    }

    fn from_u64(n: u64) -> Self {
        BigUint::from(n)
    }

    fn to_u64(&self) -> Option<u64> {
        ToPrimitive::to_u64(self)
    }

    fn to_digits(&self) -> String {
        self.to_str_radix(10)
    }
}

/// Returns `10^k` by binary exponentiation.
pub(crate) fn pow10<N: Natural>(k: usize) -> N {
    let mut base = N::from_u64(10);
    let mut acc = N::one();
    let mut k = k;
    while k > 0 {
        if k & 1 == 1 {
            acc = acc * base.clone();
        }
        k >>= 1;
        if k > 0 {
            base = base.clone() * base;
        }
    }
    acc
}
