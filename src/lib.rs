//! `rbfp` is a pure Rust implementation of exact conversions
//! between decimal numerals and IEEE 754-2008 binary64 floating
//! point numbers.
//!
//! # Overview
//!
//! A binary64 value is a dyadic rational: an integer divided by
//! a power of two. Its decimal expansion therefore terminates,
//! and both directions of the decimal conversion can be computed
//! exactly with integer arithmetic alone:
//!
//! - [`Bin64::parse`] converts a decimal literal of any length
//!   into the nearest binary64 bit pattern with a single
//!   round-to-nearest, ties-to-even step.
//! - [`Bin64::expansion`] renders the exact decimal expansion of
//!   a bit pattern to any requested number of fractional digits.
//!
//! Neither direction ever rounds through an intermediate
//! floating point value, so every digit either function produces
//! or consumes is exact.
//!
//! Only normal numbers and zero are in range. Inputs that would
//! overflow to infinity or underflow to a subnormal are reported
//! as errors, never silently clamped.
//!
//! ```
//! use rbfp::Bin64;
//!
//! let bits = Bin64::parse("0.1234567890123456")?;
//! assert_eq!(bits.biased_exp(), 1019);
//! assert_eq!(bits.expansion(20)?, "0.12345678901234559410");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::undocumented_unsafe_blocks)]
#![deny(clippy::unimplemented)]
#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![deny(unused_lifetimes)]
#![deny(unused_qualifications)]

mod atob;
mod bignum;
mod bin64;
mod btoa;
mod conv;
mod ctx;
mod util;

pub use bignum::Natural;
#[doc(inline)]
pub use bin64::Bin64;
pub use conv::{DecodeError, EncodeError};
pub use ctx::{Condition, RoundingMode};

/// Encodes a decimal literal as the nearest binary64 value.
///
/// This is [`Bin64::parse`] as a free function.
pub fn encode(literal: &str) -> Result<Bin64, EncodeError> {
    Bin64::parse(literal)
}

/// Decodes a binary64 value into its exact decimal expansion,
/// rounded half-even to `fractional_digits` fractional digits.
///
/// This is [`Bin64::expansion`] as a free function.
pub fn decode(bits: Bin64, fractional_digits: usize) -> Result<String, DecodeError> {
    bits.expansion(fractional_digits)
}

/// Simplifies importing common items.
pub mod prelude {
    pub use super::{decode, encode, Bin64, RoundingMode};
}
