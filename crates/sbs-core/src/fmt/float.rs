//! Float-to-text conversion
//!
//! Fixed-point and scientific output built from bounded digit loops. All the
//! arithmetic runs in the width of the input (an `f32` is never widened), so a
//! value prints the same way on a desktop host as on a target whose only
//! float type is 32 bits wide.
//!
//! Non-finite values and magnitudes whose integral part does not fit in a
//! `u32` print as the sentinels `nan`, `inf` and `ovf`.

use core::fmt::Write;
use core::ops::{Add, Div, Mul, Sub};

use super::int::{DIGITS, write_decimal};
use super::select::{FloatMode, MAX_AUTO_DECIMALS, Notation, Precision, select_float_mode};
use crate::text::Text;

pub const NAN_TEXT: &str = "nan";
pub const INF_TEXT: &str = "inf";
pub const OVF_TEXT: &str = "ovf";

mod sealed {
    pub trait Sealed {}
}

/// Binary floating-point value the engine knows how to format.
///
/// This trait is sealed: it is implemented for `f32` and `f64` only.
pub trait FloatValue:
    sealed::Sealed
    + Copy
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
{
    const ZERO: Self;
    const ONE: Self;
    const HALF: Self;
    const TEN: Self;
    /// Largest magnitude whose integral part still narrows to a `u32`
    /// (determined empirically on 32-bit targets).
    const OVERFLOW_LIMIT: Self;
    /// Auto-precision accepts a digit count once the scaled rounding error
    /// drops below this.
    const AUTO_TOLERANCE: Self;
    /// Largest power of ten that is exactly representable.
    const EXACT_POW10: u32;

    fn is_nan(self) -> bool;
    fn is_infinite(self) -> bool;
    fn abs(self) -> Self;
    fn floor(self) -> Self;
    fn log10(self) -> Self;
    /// Truncate toward zero.
    fn to_i32(self) -> i32;
    /// Truncate toward zero, saturating.
    fn to_u32(self) -> u32;
    fn from_u32(value: u32) -> Self;
}

macro_rules! impl_float {
    ($ty:ty, $abs:path, $floor:path, $log10:path, $exact:expr) => {
        impl sealed::Sealed for $ty {}

        impl FloatValue for $ty {
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;
            const HALF: Self = 0.5;
            const TEN: Self = 10.0;
            const OVERFLOW_LIMIT: Self = 4_294_967_040.0;
            const AUTO_TOLERANCE: Self = 0.09;
            const EXACT_POW10: u32 = $exact;

            #[inline]
            fn is_nan(self) -> bool {
                <$ty>::is_nan(self)
            }

            #[inline]
            fn is_infinite(self) -> bool {
                <$ty>::is_infinite(self)
            }

            #[inline]
            fn abs(self) -> Self {
                $abs(self)
            }

            #[inline]
            fn floor(self) -> Self {
                $floor(self)
            }

            #[inline]
            fn log10(self) -> Self {
                $log10(self)
            }

            #[inline]
            fn to_i32(self) -> i32 {
                self as i32
            }

            #[inline]
            fn to_u32(self) -> u32 {
                self as u32
            }

            #[inline]
            fn from_u32(value: u32) -> Self {
                value as $ty
            }
        }
    };
}

impl_float!(f32, libm::fabsf, libm::floorf, libm::log10f, 10);
impl_float!(f64, libm::fabs, libm::floor, libm::log10, 22);

/// Write `value` using `mode` and `precision`.
pub fn write_float<W: Write, T: FloatValue>(
    out: &mut W,
    value: T,
    mode: FloatMode,
    precision: Precision,
) -> core::fmt::Result {
    if value.is_nan() {
        return out.write_str(NAN_TEXT);
    }
    if value.is_infinite() {
        return out.write_str(INF_TEXT);
    }
    let magnitude = value.abs();
    if magnitude > T::OVERFLOW_LIMIT {
        return out.write_str(OVF_TEXT);
    }
    if value < T::ZERO {
        out.write_char('-')?;
    }

    let magnitude_exp = (magnitude != T::ZERO).then(|| magnitude.log10().floor().to_i32());
    match mode.resolve(magnitude_exp, precision) {
        (Notation::Decimal, precision) => write_fixed(out, magnitude, precision),
        (Notation::Scientific, precision) => write_scientific(out, magnitude, precision),
    }
}

/// Format `value` into a new [`Text`].
pub fn format_float<T: FloatValue>(value: T, mode: FloatMode, precision: Precision) -> Text {
    let mut text = Text::new();
    // Text capacity covers the longest output (254 fractional digits).
    let _ = write_float(&mut text, value, mode, precision);
    text
}

/// Format `value` with a raw, unvalidated mode and a raw precision byte
/// (255 meaning Auto-precision).
///
/// Out-of-range modes yield an empty [`Text`].
pub fn format_float_raw<T: FloatValue>(value: T, raw_mode: i32, raw_precision: u8) -> Text {
    let mut text = Text::new();
    if let Some(mode) = select_float_mode(raw_mode) {
        let _ = write_float(&mut text, value, mode, Precision::from_raw(raw_precision));
    }
    text
}

// ---------------------------------------------------------------------------
// Decimal (fixed-point) notation
// ---------------------------------------------------------------------------

/// Fixed-point output of a non-negative magnitude that fits a `u32`.
fn write_fixed<W: Write, T: FloatValue>(
    out: &mut W,
    magnitude: T,
    precision: Precision,
) -> core::fmt::Result {
    let (decimals, value) = match precision {
        Precision::Auto => (auto_precision(magnitude), magnitude),
        Precision::Digits(decimals) => (
            decimals,
            round(magnitude, u32::from(decimals.min(MAX_AUTO_DECIMALS))),
        ),
    };

    let mut integral = value.to_u32();
    let mut remainder = value - T::from_u32(integral);

    // Half a unit of the last printed digit: the truncating digit loop below
    // then rounds that digit half-up (1.999 -> "2.00"). Added to the fraction
    // alone so the offset is not lost to the spacing of large f32 values.
    let rounding_digits = u32::from(decimals.min(MAX_AUTO_DECIMALS));
    remainder = remainder + T::HALF / pow10::<T>(rounding_digits);
    if remainder >= T::ONE {
        remainder = remainder - T::ONE;
        integral += 1;
    }
    write_decimal(out, u64::from(integral))?;

    if decimals == 0 {
        return Ok(());
    }
    out.write_char('.')?;
    for _ in 0..decimals {
        remainder = remainder * T::TEN;
        let digit = remainder.floor().to_u32().min(9);
        remainder = remainder - T::from_u32(digit);
        out.write_char(DIGITS[digit as usize] as char)?;
    }
    Ok(())
}

/// Smallest digit count (1..=14) whose rounded value stays within
/// `0.09 * 10^-digits` of `value`; 14 when none does.
///
/// The error is computed in `T`, so for large `f32` values the rounding steps
/// themselves are inexact and the search can overshoot
/// (`4294967040.0f32` picks 2 digits, not 1).
fn auto_precision<T: FloatValue>(value: T) -> u8 {
    (1..=MAX_AUTO_DECIMALS)
        .find(|&decimals| {
            let decimals = u32::from(decimals);
            let error = (value - round(value, decimals)).abs() * pow10::<T>(decimals);
            error < T::AUTO_TOLERANCE
        })
        .unwrap_or(MAX_AUTO_DECIMALS)
}

/// Round half-up to `decimals` fractional digits (a remainder of exactly one
/// half rounds down).
fn round<T: FloatValue>(value: T, decimals: u32) -> T {
    let scale = pow10::<T>(decimals);
    let scaled = scale * value;
    let truncated = scaled.floor();
    if scaled - truncated > T::HALF {
        (truncated + T::ONE) / scale
    } else {
        truncated / scale
    }
}

// ---------------------------------------------------------------------------
// Scientific notation
// ---------------------------------------------------------------------------

/// Mantissa in fixed-point followed by `e`, the exponent sign and at least
/// two exponent digits.
fn write_scientific<W: Write, T: FloatValue>(
    out: &mut W,
    magnitude: T,
    precision: Precision,
) -> core::fmt::Result {
    let exponent = scientific_exponent(magnitude);
    let mantissa = scale_pow10(magnitude, exponent);
    write_fixed(out, mantissa, precision)?;

    out.write_char('e')?;
    out.write_char(if exponent < 0 { '-' } else { '+' })?;
    let exponent = exponent.unsigned_abs();
    if exponent < 10 {
        out.write_char('0')?;
    }
    write_decimal(out, u64::from(exponent))
}

/// `log10` truncated toward zero, then lowered by one more when negative.
///
/// For magnitudes in `[0.1, 1)` this yields 0 and for exact negative powers of
/// ten it undershoots by one (`0.01` -> `10.0e-03`); existing output depends
/// on these exact digits.
fn scientific_exponent<T: FloatValue>(magnitude: T) -> i32 {
    if magnitude == T::ZERO {
        return 0;
    }
    let exponent = magnitude.log10().to_i32();
    if exponent < 0 { exponent - 1 } else { exponent }
}

/// `value / 10^exponent`, applied in exactly representable steps.
fn scale_pow10<T: FloatValue>(mut value: T, exponent: i32) -> T {
    let mut remaining = exponent.unsigned_abs();
    while remaining > 0 {
        let step = remaining.min(T::EXACT_POW10);
        let factor = pow10::<T>(step);
        value = if exponent < 0 {
            value * factor
        } else {
            value / factor
        };
        remaining -= step;
    }
    value
}

fn pow10<T: FloatValue>(exponent: u32) -> T {
    let mut power = T::ONE;
    for _ in 0..exponent {
        power = power * T::TEN;
    }
    power
}
