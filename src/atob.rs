//! Decimal literal to binary64 encoding.

use num_bigint::BigUint;

use crate::{
    bignum::{pow10, Natural},
    bin64::Bin64,
    conv::EncodeError,
    ctx::Condition,
    util,
};

/// Decimal magnitudes at or beyond these bounds cannot land in
/// the normal binary64 range, whatever the digits say. The
/// bounds are deliberately loose by one decade; the boundary
/// decades fall through to the exact path.
const DEC_MAG_MAX: i64 = 309;
const DEC_MAG_MIN: i64 = -309;

impl Bin64 {
    /// Parses a decimal literal into the nearest binary64 value.
    ///
    /// The literal is an optional sign, one or more integer
    /// digits, an optional fraction (`.` followed by zero or
    /// more digits), and an optional decimal exponent (`e` or
    /// `E`, an optional sign, and one or more digits). There is
    /// no bound on the digit count; the literal is held as an
    /// exact rational and rounded once, to nearest, ties to
    /// even.
    ///
    /// Literals outside the normal binary64 range are errors:
    /// [`is_out_of_range`][EncodeError::is_out_of_range] above
    /// it, [`is_subnormal`][EncodeError::is_subnormal] below it.
    /// Zero literals encode to a zero with the literal's sign.
    pub fn parse(s: &str) -> Result<Self, EncodeError> {
        let (bits, _) = Self::parse_with_cond(s)?;
        Ok(bits)
    }

    /// Parses a decimal literal, also reporting whether rounding
    /// changed the value.
    ///
    /// See [`parse`][Self::parse] for the grammar. The returned
    /// [`Condition`] is empty when the literal is exactly
    /// representable.
    pub fn parse_with_cond(s: &str) -> Result<(Self, Condition), EncodeError> {
        let lit = Literal::scan(s.as_bytes())?;
        if cfg!(debug_assertions) {
            println!(" int = {}", String::from_utf8_lossy(lit.int));
            println!("frac = {}", String::from_utf8_lossy(lit.frac));
            println!(" exp = {}", lit.exp);
        }
        encode_literal::<BigUint>(&lit)
    }
}

/// A scanned literal: digit slices plus the decimal exponent.
struct Literal<'a> {
    sign: bool,
    int: &'a [u8],
    frac: &'a [u8],
    exp: i64,
}

impl<'a> Literal<'a> {
    fn scan(mut s: &'a [u8]) -> Result<Self, EncodeError> {
        if s.is_empty() {
            return Err(EncodeError::malformed("empty input"));
        }

        let mut sign = false;
        if let Some((c @ (b'-' | b'+'), rest)) = s.split_first() {
            sign = *c == b'-';
            s = rest;
        }

        if !matches!(s.first(), Some(b'0'..=b'9')) {
            return Err(EncodeError::malformed("expected digit"));
        }

        let (int, rest) = scan_digits(s);
        let (frac, rest) = if let Some((b'.', rest)) = rest.split_first() {
            scan_digits(rest)
        } else {
            (&s[..0], rest)
        };
        let exp = scan_exp(rest)?;

        Ok(Self {
            sign,
            int,
            frac,
            exp,
        })
    }

    /// Returns the power of ten of the most significant nonzero
    /// digit, or `None` if every digit is zero.
    fn decimal_magnitude(&self) -> Option<i64> {
        if let Some(i) = self.int.iter().position(|&c| c != b'0') {
            let m = (self.int.len() - i - 1) as i64;
            return Some(m.saturating_add(self.exp));
        }
        if let Some(i) = self.frac.iter().position(|&c| c != b'0') {
            let m = -(i as i64) - 1;
            return Some(m.saturating_add(self.exp));
        }
        None
    }
}

/// Splits `s` at the first non-digit.
fn scan_digits(s: &[u8]) -> (&[u8], &[u8]) {
    let mut rest = s;
    let mut n = 0;
    while let Some((b'0'..=b'9', r)) = rest.split_first() {
        n += 1;
        rest = r;
    }
    s.split_at(n)
}

/// Parses the optional exponent suffix.
///
/// The value saturates at `i64` bounds: a saturated exponent is
/// decided by the decimal magnitude pre-check either way.
fn scan_exp(mut s: &[u8]) -> Result<i64, EncodeError> {
    if s.is_empty() {
        return Ok(0);
    }

    if let Some((b'e' | b'E', rest)) = s.split_first() {
        s = rest;
    } else {
        return Err(EncodeError::malformed("expected `e` or `E`"));
    }

    let mut sign = false;
    if let Some((c @ (b'-' | b'+'), rest)) = s.split_first() {
        sign = *c == b'-';
        s = rest;
    }
    if s.is_empty() {
        return Err(EncodeError::malformed("expected exponent digit"));
    }

    let mut exp: i64 = 0;
    while let Some((&c, rest)) = s.split_first() {
        let d = c.wrapping_sub(b'0');
        if d >= 10 {
            return Err(EncodeError::malformed("expected digit"));
        }
        exp = exp.saturating_mul(10).saturating_add(i64::from(d));
        s = rest;
    }
    Ok(if sign { -exp } else { exp })
}

/// Encodes a scanned literal with one round-to-nearest-even
/// step.
fn encode_literal<N: Natural>(lit: &Literal<'_>) -> Result<(Bin64, Condition), EncodeError> {
    util::debug_assert_all_digits(lit.int);
    util::debug_assert_all_digits(lit.frac);

    let Some(mag) = lit.decimal_magnitude() else {
        // Every digit is zero.
        return Ok((Bin64::zero(lit.sign), Condition::empty()));
    };
    if mag >= DEC_MAG_MAX {
        return Err(EncodeError::out_of_range());
    }
    if mag <= DEC_MAG_MIN {
        return Err(EncodeError::subnormal());
    }

    // The exact rational: coeff / 10^scale.
    let mut digits = Vec::with_capacity(lit.int.len() + lit.frac.len());
    digits.extend_from_slice(lit.int);
    digits.extend_from_slice(lit.frac);
    let Some(coeff) = N::from_digits(&digits) else {
        return Err(EncodeError::malformed("expected digit"));
    };
    let scale = (lit.frac.len() as i64) - lit.exp;

    let (num, den) = if scale > 0 {
        (coeff, pow10::<N>(scale as usize))
    } else {
        (coeff * pow10::<N>(scale.unsigned_abs() as usize), N::one())
    };

    // The binary exponent `e` with 2^e <= num/den < 2^(e+1). The
    // bit-length estimate is off by at most one, so a single
    // exact comparison settles it.
    let mut e = num.bit_len() as i64 - den.bit_len() as i64;
    if !ge_pow2(&num, &den, e) {
        e -= 1;
    }
    debug_assert!(ge_pow2(&num, &den, e));
    debug_assert!(!ge_pow2(&num, &den, e + 1));

    if e > i64::from(Bin64::EMAX) {
        return Err(EncodeError::out_of_range());
    }
    if e < i64::from(Bin64::EMIN) {
        return Err(EncodeError::subnormal());
    }

    // 54 bits of num/den: q = floor(num/den * 2^(53-e)), so the
    // top bit of `q` is the implicit leading 1 and the low bit
    // is the guard. The remainder is the sticky.
    let (q, r) = if e >= 53 {
        num.div_rem(&(den << (e - 53) as usize))
    } else {
        (num << (53 - e) as usize).div_rem(&den)
    };
    let sticky = !r.is_zero();
    debug_assert_eq!(q.bit_len(), 54);
    let Some(q) = q.to_u64() else {
        // `q` has exactly 54 bits by the choice of `e`.
        unreachable!()
    };

    let guard = q & 1;
    let mut sig = q >> 1;
    let mut cond = Condition::empty();
    if guard == 1 || sticky {
        cond |= Condition::INEXACT;
    }
    if guard == 1 && (sticky || sig & 1 == 1) {
        cond |= Condition::ROUNDED;
        sig += 1;
        if sig == 1 << Bin64::P {
            // Carry out of the significand: 1.11...1 rounded up
            // to 10.00...0.
            sig >>= 1;
            e += 1;
            if e > i64::from(Bin64::EMAX) {
                return Err(EncodeError::out_of_range());
            }
        }
    }
    debug_assert_eq!(sig >> Bin64::T, 1);

    let biased = (e + i64::from(Bin64::BIAS)) as u16;
    Ok((Bin64::from_parts(lit.sign, biased, sig & Bin64::SIG_MASK), cond))
}

/// Reports whether `num/den >= 2^e`.
fn ge_pow2<N: Natural>(num: &N, den: &N, e: i64) -> bool {
    if e >= 0 {
        *num >= den.clone() << e as usize
    } else {
        num.clone() << e.unsigned_abs() as usize >= *den
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[track_caller]
    fn parse(s: &str) -> Bin64 {
        match Bin64::parse(s) {
            Ok(bits) => bits,
            Err(err) => panic!("parse(\"{s}\"): {err}"),
        }
    }

    #[test]
    fn test_parse_matches_platform() {
        let tests = [
            "1",
            "1.0",
            "2",
            "0.5",
            "0.1",
            "0.125",
            "0.0625",
            "1.5",
            "-2.75",
            "3.141592653589793",
            "0.1234567890123456",
            "255.255",
            "1e3",
            "1.5e-2",
            "12e0",
            "6.02214076e23",
            "9007199254740992",
            "1.7976931348623157e308",
            "2.2250738585072014e-308",
            "4.9406564584124654e-307",
        ];
        for (i, s) in tests.iter().enumerate() {
            let want = match s.parse::<f64>() {
                Ok(f) => f.to_bits(),
                Err(err) => panic!("#{i}: {err}"),
            };
            let got = parse(s);
            assert_eq!(got.to_bits(), want, "#{i}: parse(\"{s}\")");
        }
    }

    #[test]
    fn test_parse_trailing_dot() {
        // `1.` is well formed, `.5` is not.
        assert_eq!(parse("1.").to_bits(), 1.0f64.to_bits());
        assert!(Bin64::parse(".5").is_err());
    }

    #[test]
    fn test_parse_concrete() {
        let got = parse("0.1234567890123456");
        assert!(!got.signbit());
        assert_eq!(got.biased_exp(), 1019);
        assert_eq!(
            got.significand(),
            0b1111100110101101110100110111010001101111011001011001,
        );
    }

    #[test]
    fn test_parse_ties_to_even() {
        // 1 + 2^-53: exactly halfway between 1.0 (stored
        // significand 0, even) and 1 + 2^-52 (stored 1, odd).
        let down = parse("1.00000000000000011102230246251565404236316680908203125");
        assert_eq!(down, Bin64::from_parts(false, 1023, 0));

        // 1 + 3*2^-53: halfway between stored 1 and stored 2.
        let up = parse("1.00000000000000033306690738754696212708950042724609375");
        assert_eq!(up, Bin64::from_parts(false, 1023, 2));

        // The same two cases in the integer range: 2^53 + 1 and
        // 2^53 + 3.
        let down = parse("9007199254740993");
        assert_eq!(down, Bin64::from_parts(false, 1076, 0));
        let up = parse("9007199254740995");
        assert_eq!(up, Bin64::from_parts(false, 1076, 2));
    }

    #[test]
    fn test_parse_zero() {
        let tests = [
            ("0", false),
            ("0.0", false),
            ("0.000", false),
            ("+0", false),
            ("-0.0", true),
            ("0e5", false),
            ("00.00e-10", false),
            // The exponent saturates, but zero is zero.
            ("0e-99999999999999999999", false),
        ];
        for (i, &(s, sign)) in tests.iter().enumerate() {
            let got = parse(s);
            assert!(got.is_zero(), "#{i}: parse(\"{s}\") = {got:?}");
            assert_eq!(got.signbit(), sign, "#{i}: parse(\"{s}\")");
        }
    }

    #[test]
    fn test_parse_malformed() {
        let tests = [
            "", "+", "-", ".", ".5", "-.5", "e4", "1e", "1e+", "1e-", "abc", "0x10", "1..",
            "1.2.3", "1 ", " 1", "--1", "+-1", "1f3", "1e3.5",
        ];
        for (i, s) in tests.iter().enumerate() {
            let got = Bin64::parse(s);
            assert!(
                matches!(&got, Err(err) if err.is_malformed()),
                "#{i}: parse(\"{s}\") = {got:?}",
            );
        }
    }

    #[test]
    fn test_parse_out_of_range() {
        let big = format!("1{}", "0".repeat(309));
        let tests = [
            big.as_str(),
            "1e309",
            "2e308",
            "1e99999999999999999999",
            // Rounds up to 2^1024.
            "1.7976931348623159e308",
            "-1e400",
        ];
        for (i, s) in tests.iter().enumerate() {
            let got = Bin64::parse(s);
            assert!(
                matches!(&got, Err(err) if err.is_out_of_range()),
                "#{i}: parse(\"{s}\") = {got:?}",
            );
        }
    }

    #[test]
    fn test_parse_subnormal() {
        let tests = [
            "1e-308",
            "1e-309",
            "4.9e-324",
            "1e-99999999999999999999",
            // Just below the smallest normal.
            "2.2250738585072011e-308",
        ];
        for (i, s) in tests.iter().enumerate() {
            let got = Bin64::parse(s);
            assert!(
                matches!(&got, Err(err) if err.is_subnormal()),
                "#{i}: parse(\"{s}\") = {got:?}",
            );
        }
    }

    #[test]
    fn test_parse_long_literal() {
        // The exact expansion of 0.1's binary64 value encodes
        // back to the same bits.
        let exact = "0.1000000000000000055511151231257827021181583404541015625";
        assert_eq!(parse(exact).to_bits(), 0.1f64.to_bits());

        // Excess precision is absorbed by rounding.
        let long = format!("0.1{}", "0".repeat(200));
        assert_eq!(parse(&long).to_bits(), 0.1f64.to_bits());
    }

    #[test]
    fn test_parse_condition() {
        let tests = [
            // Dyadic literals are exact.
            ("0.125", Condition::empty()),
            ("4096", Condition::empty()),
            ("1.5e2", Condition::empty()),
            // 0.1 rounds up to 0.100000000000000005551...
            ("0.1", Condition::INEXACT | Condition::ROUNDED),
            // 0.3 rounds down to 0.299999999999999988897...
            ("0.3", Condition::INEXACT),
        ];
        for (i, &(s, want)) in tests.iter().enumerate() {
            let got = match Bin64::parse_with_cond(s) {
                Ok((_, cond)) => cond,
                Err(err) => panic!("#{i}: {err}"),
            };
            assert_eq!(got, want, "#{i}: parse(\"{s}\")");
        }
    }

    #[test]
    fn test_parse_random_display_round_trip() {
        use rand::{thread_rng, Rng};

        let mut rng = thread_rng();
        for i in 0..512 {
            let bits = Bin64::from_parts(
                rng.gen(),
                rng.gen_range(1..=2046),
                rng.gen::<u64>() & Bin64::SIG_MASK,
            );
            // `Display` for f64 prints a decimal string that
            // round-trips; our parser must agree with the
            // platform on it bit for bit.
            let s = format!("{}", bits.to_f64());
            let got = parse(&s);
            assert_eq!(got, bits, "#{i}: parse(\"{s}\")");
        }
    }
}
