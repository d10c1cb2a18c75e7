use bitflags::bitflags;

/// Controls how the final digit of a decimal expansion is
/// rounded when the requested digit count cuts the exact
/// expansion short.
///
/// Encoding always uses IEEE 754-2008 roundTiesToEven; this only
/// affects [`Bin64::expansion_in`][crate::Bin64::expansion_in].
#[derive(Copy, Clone, Default, Debug, Eq, PartialEq)]
pub enum RoundingMode {
    /// IEEE 754-2008 roundTiesToEven.
    ///
    /// - Under 0.5 rounds down.
    /// - Over 0.5 rounds up.
    /// - Exactly 0.5 rounds to the nearest even.
    #[default]
    ToNearestEven,
    /// IEEE 754-2008 roundTiesToAway.
    ///
    /// Like [`ToNearestEven`][Self::ToNearestEven], except that
    /// 0.5 rounds up.
    ToNearestAway,
    /// IEEE 754-2008 roundTowardZero.
    ///
    /// AKA truncation.
    ToZero,
}

/// Conditions raised while encoding a literal.
///
/// Returned by
/// [`Bin64::parse_with_cond`][crate::Bin64::parse_with_cond].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Condition(u32);

impl Default for Condition {
    fn default() -> Self {
        Self::empty()
    }
}

bitflags! {
    impl Condition: u32 {
        /// Occurs when the encoded value differs from the
        /// literal: the literal carried more precision than 53
        /// significand bits and nonzero bits were discarded.
        const INEXACT = 0x1;
        /// Occurs when rounding incremented the significand:
        /// the encoded magnitude is the representable neighbor
        /// above the literal rather than a truncation of it.
        const ROUNDED = 0x2;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_flags() {
        let cond = Condition::INEXACT | Condition::ROUNDED;
        assert!(cond.contains(Condition::INEXACT));
        assert!(cond.contains(Condition::ROUNDED));
        assert!(Condition::default().is_empty());
        assert!(!Condition::INEXACT.contains(Condition::ROUNDED));
    }

    #[test]
    fn test_rounding_mode_default() {
        assert_eq!(RoundingMode::default(), RoundingMode::ToNearestEven);
    }
}
