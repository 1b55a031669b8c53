//! Integer-to-text conversion
//!
//! Binary, octal and hexadecimal output is always as wide as the declared
//! integer type (a `u8` is 8 binary digits whatever its value); negative
//! numbers are written as their two's-complement pattern at that width.
//! Decimal output is minimal width with a leading `-` for negative values.

use core::fmt::Write;

use super::select::{IntBase, Radix, select_int_base};
use crate::text::Text;

/// Lowercase digit table for every supported radix.
pub(crate) const DIGITS: &[u8; 16] = b"0123456789abcdef";

mod sealed {
    pub trait Sealed {}
}

/// Fixed-width integer the engine knows how to format.
///
/// This trait is sealed: it is implemented for the eight primitive integer
/// types from 8 to 64 bits and cannot be implemented elsewhere.
pub trait IntegerValue: sealed::Sealed + Copy {
    /// Declared bit width
    const BITS: u32;

    /// Bit pattern masked to the declared width (two's complement for
    /// negative values).
    fn to_bits(self) -> u64;

    /// Sign and absolute value, for decimal output.
    fn sign_magnitude(self) -> (bool, u64);
}

macro_rules! impl_unsigned {
    ($($ty:ty),*) => {$(
        impl sealed::Sealed for $ty {}

        impl IntegerValue for $ty {
            const BITS: u32 = <$ty>::BITS;

            #[inline]
            fn to_bits(self) -> u64 {
                self as u64
            }

            #[inline]
            fn sign_magnitude(self) -> (bool, u64) {
                (false, self as u64)
            }
        }
    )*};
}

macro_rules! impl_signed {
    ($($ty:ty => $unsigned:ty),*) => {$(
        impl sealed::Sealed for $ty {}

        impl IntegerValue for $ty {
            const BITS: u32 = <$ty>::BITS;

            #[inline]
            fn to_bits(self) -> u64 {
                // Reinterpret at the declared width first so sign-extension
                // bits never reach the wider word.
                self as $unsigned as u64
            }

            #[inline]
            fn sign_magnitude(self) -> (bool, u64) {
                (self < 0, self.unsigned_abs() as u64)
            }
        }
    )*};
}

impl_unsigned!(u8, u16, u32, u64);
impl_signed!(i8 => u8, i16 => u16, i32 => u32, i64 => u64);

/// Write `value` in the requested base.
///
/// Never writes anything other than digits and, for negative decimals, one
/// leading `-`.
pub fn write_int<W: Write, I: IntegerValue>(
    out: &mut W,
    value: I,
    base: IntBase,
) -> core::fmt::Result {
    write_radix(out, value, base.resolve())
}

pub(crate) fn write_radix<W: Write, I: IntegerValue>(
    out: &mut W,
    value: I,
    radix: Radix,
) -> core::fmt::Result {
    match radix {
        Radix::Binary => write_binary(out, value.to_bits(), I::BITS),
        Radix::Octal => write_octal(out, value.to_bits(), I::BITS),
        Radix::Hexadecimal => write_hexadecimal(out, value.to_bits(), I::BITS),
        Radix::Decimal => {
            let (negative, magnitude) = value.sign_magnitude();
            if negative {
                out.write_char('-')?;
            }
            write_decimal(out, magnitude)
        }
    }
}

/// Format `value` into a new [`Text`].
pub fn format_int<I: IntegerValue>(value: I, base: IntBase) -> Text {
    let mut text = Text::new();
    // The widest integer output (64 binary digits) fits any Text.
    let _ = write_int(&mut text, value, base);
    text
}

/// Format `value` with a raw, unvalidated base.
///
/// Out-of-range bases yield an empty [`Text`].
pub fn format_int_raw<I: IntegerValue>(value: I, raw_base: i32) -> Text {
    let mut text = Text::new();
    if let Some(radix) = select_int_base(raw_base) {
        let _ = write_radix(&mut text, value, radix);
    }
    text
}

/// Exactly `bits` characters, most significant bit first.
fn write_binary<W: Write>(out: &mut W, bits: u64, width: u32) -> core::fmt::Result {
    let mut mask = 1u64 << (width - 1);
    while mask != 0 {
        out.write_char(if bits & mask != 0 { '1' } else { '0' })?;
        mask >>= 1;
    }
    Ok(())
}

/// `ceil(width / 3)` three-bit groups, most significant first.
fn write_octal<W: Write>(out: &mut W, bits: u64, width: u32) -> core::fmt::Result {
    let groups = width.div_ceil(3);
    for group in (0..groups).rev() {
        out.write_char(DIGITS[((bits >> (3 * group)) & 0b111) as usize] as char)?;
    }
    Ok(())
}

/// `width / 4` nibbles, most significant first.
fn write_hexadecimal<W: Write>(out: &mut W, bits: u64, width: u32) -> core::fmt::Result {
    let nibbles = width / 4;
    for nibble in (0..nibbles).rev() {
        out.write_char(DIGITS[((bits >> (4 * nibble)) & 0b1111) as usize] as char)?;
    }
    Ok(())
}

/// Most-significant-digit-first decimal extraction of a magnitude.
///
/// Zero still produces a single `0`.
pub(crate) fn write_decimal<W: Write>(out: &mut W, mut magnitude: u64) -> core::fmt::Result {
    let exponent = magnitude.checked_ilog10().unwrap_or(0);
    let mut power = 10u64.pow(exponent);
    while power != 0 {
        let digit = magnitude / power;
        magnitude -= digit * power;
        power /= 10;
        out.write_char(DIGITS[digit as usize] as char)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u8_all_bases() {
        assert_eq!(format_int(186u8, IntBase::Auto), "186");
        assert_eq!(format_int(52u8, IntBase::Binary), "00110100");
        assert_eq!(format_int(186u8, IntBase::Binary), "10111010");
        assert_eq!(format_int(186u8, IntBase::Octal), "272");
        assert_eq!(format_int(186u8, IntBase::Decimal), "186");
        assert_eq!(format_int(186u8, IntBase::Hexadecimal), "ba");
    }

    #[test]
    fn test_i8_all_bases() {
        assert_eq!(format_int(-27i8, IntBase::Auto), "-27");
        assert_eq!(format_int(52i8, IntBase::Binary), "00110100");
        assert_eq!(format_int(-27i8, IntBase::Binary), "11100101");
        assert_eq!(format_int(-27i8, IntBase::Octal), "345");
        assert_eq!(format_int(-27i8, IntBase::Decimal), "-27");
        assert_eq!(format_int(-27i8, IntBase::Hexadecimal), "e5");
    }

    #[test]
    fn test_16_bit_values() {
        assert_eq!(format_int(186u16, IntBase::Binary), "0000000010111010");
        assert_eq!(format_int(186u16, IntBase::Octal), "000272");
        assert_eq!(format_int(186u16, IntBase::Hexadecimal), "00ba");
        assert_eq!(format_int(-27i16, IntBase::Binary), "1111111111100101");
        assert_eq!(format_int(-27i16, IntBase::Octal), "177745");
        assert_eq!(format_int(-27i16, IntBase::Hexadecimal), "ffe5");
    }

    #[test]
    fn test_32_bit_values() {
        assert_eq!(
            format_int(186u32, IntBase::Binary),
            "00000000000000000000000010111010"
        );
        assert_eq!(format_int(186u32, IntBase::Octal), "00000000272");
        assert_eq!(format_int(186u32, IntBase::Hexadecimal), "000000ba");
        assert_eq!(
            format_int(-27i32, IntBase::Binary),
            "11111111111111111111111111100101"
        );
        assert_eq!(format_int(-27i32, IntBase::Octal), "37777777745");
        assert_eq!(format_int(-27i32, IntBase::Hexadecimal), "ffffffe5");
    }

    #[test]
    fn test_64_bit_values() {
        assert_eq!(
            format_int(52u64, IntBase::Binary),
            "0000000000000000000000000000000000000000000000000000000000110100"
        );
        assert_eq!(
            format_int(186u64, IntBase::Octal),
            "0000000000000000000272"
        );
        assert_eq!(format_int(186u64, IntBase::Hexadecimal), "00000000000000ba");
        assert_eq!(
            format_int(-27i64, IntBase::Octal),
            "1777777777777777777745"
        );
        assert_eq!(format_int(-27i64, IntBase::Hexadecimal), "ffffffffffffffe5");
        assert_eq!(format_int(u64::MAX, IntBase::Decimal), "18446744073709551615");
        assert_eq!(format_int(i64::MIN, IntBase::Decimal), "-9223372036854775808");
    }

    #[test]
    fn test_zero_emits_single_digit() {
        assert_eq!(format_int(0u8, IntBase::Decimal), "0");
        assert_eq!(format_int(0i64, IntBase::Auto), "0");
        assert_eq!(format_int(0u16, IntBase::Hexadecimal), "0000");
    }

    #[test]
    fn test_fixed_widths() {
        fn check<I: IntegerValue>(value: I, bin: usize, oct: usize, hex: usize) {
            assert_eq!(format_int(value, IntBase::Binary).len(), bin, "binary width");
            assert_eq!(format_int(value, IntBase::Octal).len(), oct, "octal width");
            assert_eq!(format_int(value, IntBase::Hexadecimal).len(), hex, "hex width");
        }
        for value in [0u8, 1, 127, 255] {
            check(value, 8, 3, 2);
        }
        for value in [i8::MIN, -1, 0, i8::MAX] {
            check(value, 8, 3, 2);
        }
        for value in [i16::MIN, -1, 0, i16::MAX] {
            check(value, 16, 6, 4);
        }
        for value in [0u32, 7, u32::MAX] {
            check(value, 32, 11, 8);
        }
        for value in [i64::MIN, -1, 0, i64::MAX] {
            check(value, 64, 22, 16);
        }
    }

    #[test]
    fn test_decimal_parses_back_8_and_16_bit() {
        for value in i8::MIN..=i8::MAX {
            let text = format_int(value, IntBase::Decimal);
            assert_eq!(text.parse::<i8>(), Ok(value), "i8 {}", value);
        }
        for value in u8::MIN..=u8::MAX {
            let text = format_int(value, IntBase::Decimal);
            assert_eq!(text.parse::<u8>(), Ok(value), "u8 {}", value);
        }
        for value in i16::MIN..=i16::MAX {
            let text = format_int(value, IntBase::Decimal);
            assert_eq!(text.parse::<i16>(), Ok(value), "i16 {}", value);
        }
        for value in u16::MIN..=u16::MAX {
            let text = format_int(value, IntBase::Decimal);
            assert_eq!(text.parse::<u16>(), Ok(value), "u16 {}", value);
        }
    }

    #[test]
    fn test_decimal_parses_back_wide_samples() {
        for shift in 0..64 {
            let power = 1u64 << shift;
            for candidate in [power - 1, power, power.wrapping_add(1)] {
                let text = format_int(candidate, IntBase::Decimal);
                assert_eq!(text.parse::<u64>(), Ok(candidate));
                let signed = candidate as i64;
                let text = format_int(signed, IntBase::Decimal);
                assert_eq!(text.parse::<i64>(), Ok(signed));
                let narrow = candidate as u32;
                let text = format_int(narrow, IntBase::Decimal);
                assert_eq!(text.parse::<u32>(), Ok(narrow));
                let text = format_int(narrow as i32, IntBase::Decimal);
                assert_eq!(text.parse::<i32>(), Ok(narrow as i32));
            }
        }
        for value in [i64::MIN, i64::MAX, 999_999_999_999, -1_000_000_000_000] {
            let text = format_int(value, IntBase::Decimal);
            assert_eq!(text.parse::<i64>(), Ok(value));
        }
    }

    #[test]
    fn test_invalid_raw_base_is_empty() {
        assert!(format_int_raw(52u64, -1).is_empty());
        assert!(format_int_raw(52i64, -1).is_empty());
        assert!(format_int_raw(52u32, -1).is_empty());
        assert!(format_int_raw(52i32, -1).is_empty());
        assert!(format_int_raw(52u16, -1).is_empty());
        assert!(format_int_raw(52i16, -1).is_empty());
        assert!(format_int_raw(52u8, -1).is_empty());
        assert!(format_int_raw(52i8, 5).is_empty());
    }

    #[test]
    fn test_valid_raw_base_formats() {
        assert_eq!(format_int_raw(52u8, 0), "52");
        assert_eq!(format_int_raw(52u8, 1), "00110100");
        assert_eq!(format_int_raw(52u8, 4), "34");
    }
}
