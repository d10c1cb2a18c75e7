use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rbfp::{Bin64, RoundingMode};

/// Round-trips a decimal literal through IEEE 754 binary64.
///
/// The literal is encoded as the nearest binary64 value
/// (round-to-nearest, ties-to-even) and its exact decimal
/// expansion is printed back.
#[derive(Parser)]
struct Options {
    /// Decimal literal to encode.
    ///
    /// Optional sign, integer digits, optional fraction, and an
    /// optional `e`/`E` exponent. Any number of digits.
    literal: String,

    /// Fractional digits to print.
    ///
    /// Defaults to the termination digit count: the point past
    /// which every further digit of the exact expansion is zero.
    digits: Option<usize>,

    /// Print the raw bit fields before the expansion.
    #[arg(long)]
    bits: bool,

    /// Rounding applied to the final printed digit.
    #[arg(long, value_enum, default_value = "half-even")]
    rounding: Rounding,
}

#[derive(Copy, Clone, ValueEnum)]
enum Rounding {
    /// Round to nearest, ties to even.
    HalfEven,
    /// Round to nearest, ties away from zero.
    HalfAway,
    /// Truncate.
    Truncate,
}

impl From<Rounding> for RoundingMode {
    fn from(r: Rounding) -> Self {
        match r {
            Rounding::HalfEven => RoundingMode::ToNearestEven,
            Rounding::HalfAway => RoundingMode::ToNearestAway,
            Rounding::Truncate => RoundingMode::ToZero,
        }
    }
}

fn main() -> Result<()> {
    let opts = Options::parse();

    let bits = Bin64::parse(&opts.literal)
        .with_context(|| format!("cannot encode `{}`", opts.literal))?;
    if opts.bits {
        println!(
            "sign={} exponent={} significand={:#015x}",
            bits.signbit() as u8,
            bits.biased_exp(),
            bits.significand(),
        );
    }

    let digits = opts
        .digits
        .unwrap_or(bits.termination_digit_count() as usize);
    let expansion = bits
        .expansion_in(digits, opts.rounding.into())
        .with_context(|| format!("cannot decode {bits:?}"))?;
    println!("{expansion}");
    Ok(())
}
