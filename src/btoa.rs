//! Binary64 to decimal expansion decoding.

use core::cmp::Ordering;

use num_bigint::BigUint;

use crate::{
    bignum::{pow10, Natural},
    bin64::Bin64,
    conv::DecodeError,
    ctx::RoundingMode,
};

impl Bin64 {
    /// Returns the decimal expansion of the value, rounded
    /// half-even to `digits` fractional digits.
    ///
    /// A binary64 value is a dyadic rational, so its exact
    /// decimal expansion terminates; requesting more digits than
    /// [`termination_digit_count`][Self::termination_digit_count]
    /// appends exact zeros. When `digits` cuts the expansion
    /// short, the final digit is rounded to nearest with ties to
    /// even; see [`expansion_in`][Self::expansion_in] for other
    /// modes. `digits == 0` renders the integer part alone.
    ///
    /// Only zero and normal numbers decode. Infinities, NaNs,
    /// and subnormals return an error naming the reserved field.
    pub fn expansion(self, digits: usize) -> Result<String, DecodeError> {
        self.expansion_in(digits, RoundingMode::ToNearestEven)
    }

    /// Returns the decimal expansion of the value, rounding the
    /// final digit with `mode`.
    ///
    /// See [`expansion`][Self::expansion].
    pub fn expansion_in(self, digits: usize, mode: RoundingMode) -> Result<String, DecodeError> {
        if self.is_special() {
            return Err(DecodeError::special());
        }
        if self.is_subnormal() {
            return Err(DecodeError::subnormal());
        }
        Ok(expand::<BigUint>(self, digits, mode))
    }

    /// Returns the fractional digit count beyond which the exact
    /// decimal expansion is all zeros.
    ///
    /// For a normal number with unbiased exponent `e` this is
    /// `53 + max(0, -e)`: the value is `N / 2^(52-e)` and the
    /// expansion of `1/2^n` terminates after exactly `n` digits.
    /// For zero it is 0. Meaningful only for zero and normal
    /// numbers.
    pub fn termination_digit_count(self) -> u32 {
        if self.is_zero() {
            return 0;
        }
        debug_assert!(self.is_normal());

        let e = i32::from(self.unbiased_exp());
        Self::P + e.min(0).unsigned_abs()
    }
}

/// Renders `bits` to `d` fractional digits.
///
/// `bits` must be zero or normal.
fn expand<N: Natural>(bits: Bin64, d: usize, mode: RoundingMode) -> String {
    let mut out = String::with_capacity(d + 8);
    if bits.is_sign_negative() {
        out.push('-');
    }
    if bits.is_zero() {
        out.push('0');
        if d > 0 {
            out.push('.');
            out.push_str(&"0".repeat(d));
        }
        return out;
    }

    // The exact value is full_significand / 2^shift.
    let e = i64::from(bits.unbiased_exp());
    let shift = i64::from(Bin64::T) - e;

    // Scale by 10^d so the integer quotient carries the integer
    // part and the first `d` fractional digits; the remainder
    // decides the final digit's rounding.
    let num = N::from_u64(bits.full_significand()) * pow10::<N>(d);
    let q = if shift <= 0 {
        num << shift.unsigned_abs() as usize
    } else {
        let den = N::one() << shift as usize;
        let (q, r) = num.div_rem(&den);
        let round_up = match mode {
            RoundingMode::ToZero => false,
            RoundingMode::ToNearestEven | RoundingMode::ToNearestAway => {
                if r.is_zero() {
                    false
                } else {
                    match (r << 1usize).cmp(&den) {
                        Ordering::Less => false,
                        Ordering::Greater => true,
                        Ordering::Equal => match mode {
                            RoundingMode::ToNearestAway => true,
                            _ => q.is_odd(),
                        },
                    }
                }
            }
        };
        if round_up {
            q + N::one()
        } else {
            q
        }
    };

    let t = q.to_digits();
    if t.len() > d {
        let (int, frac) = t.split_at(t.len() - d);
        out.push_str(int);
        if d > 0 {
            out.push('.');
            out.push_str(frac);
        }
    } else {
        // The value is below 10^-? of the integer part: pad the
        // fraction with leading zeros.
        out.push('0');
        out.push('.');
        out.push_str(&"0".repeat(d - t.len()));
        out.push_str(&t);
    }
    out
}
