//! Format selection and validation
//!
//! Callers may build format modes from raw integers (configuration blobs,
//! serial commands). Those raw values pass through the fallible conversions
//! here before they reach a formatter, so an out-of-range value can only ever
//! become "no output" and never an arbitrary branch.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::error::SbsError;

/// Digit count limit for Auto-precision (and for the rounding step).
pub const MAX_AUTO_DECIMALS: u8 = 14;

/// Raw precision value reserved for Auto-precision.
pub const AUTO_PRECISION_RAW: u8 = 255;

/// Below this power of ten, Auto mode switches to scientific notation.
const AUTO_SCIENTIFIC_BELOW_EXP: i32 = -3;

/// Requested integer output base
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IntBase {
    /// Let the engine pick (always decimal)
    #[default]
    Auto,
    /// Base 2, fixed width
    Binary,
    /// Base 8, fixed width
    Octal,
    /// Base 10, minimal width
    Decimal,
    /// Base 16, fixed width
    Hexadecimal,
}

impl IntBase {
    /// Resolve `Auto` to a concrete radix.
    pub const fn resolve(self) -> Radix {
        match self {
            Self::Auto | Self::Decimal => Radix::Decimal,
            Self::Binary => Radix::Binary,
            Self::Octal => Radix::Octal,
            Self::Hexadecimal => Radix::Hexadecimal,
        }
    }
}

impl TryFrom<i32> for IntBase {
    type Error = SbsError;

    fn try_from(raw: i32) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(Self::Auto),
            1 => Ok(Self::Binary),
            2 => Ok(Self::Octal),
            3 => Ok(Self::Decimal),
            4 => Ok(Self::Hexadecimal),
            _ => Err(SbsError::UnsupportedIntBase(raw)),
        }
    }
}

impl From<IntBase> for i32 {
    fn from(base: IntBase) -> Self {
        match base {
            IntBase::Auto => 0,
            IntBase::Binary => 1,
            IntBase::Octal => 2,
            IntBase::Decimal => 3,
            IntBase::Hexadecimal => 4,
        }
    }
}

/// Concrete integer radix after `Auto` resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Radix {
    Binary,
    Octal,
    Decimal,
    Hexadecimal,
}

/// Requested float notation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FloatMode {
    /// Scientific for magnitudes below 1e-3, decimal otherwise, with
    /// Auto-precision in both cases
    #[default]
    Auto,
    /// Fixed-point
    Decimal,
    /// Normalized mantissa with a power-of-ten exponent
    Scientific,
}

impl FloatMode {
    /// Resolve the mode (and precision) for a non-negative finite magnitude.
    ///
    /// `magnitude_exp` is `floor(log10(|value|))`, or `None` for zero.
    pub fn resolve(self, magnitude_exp: Option<i32>, precision: Precision) -> (Notation, Precision) {
        match self {
            Self::Decimal => (Notation::Decimal, precision),
            Self::Scientific => (Notation::Scientific, precision),
            Self::Auto => match magnitude_exp {
                Some(exp) if exp < AUTO_SCIENTIFIC_BELOW_EXP => {
                    (Notation::Scientific, Precision::Auto)
                }
                _ => (Notation::Decimal, Precision::Auto),
            },
        }
    }
}

impl TryFrom<i32> for FloatMode {
    type Error = SbsError;

    fn try_from(raw: i32) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(Self::Auto),
            1 => Ok(Self::Decimal),
            2 => Ok(Self::Scientific),
            _ => Err(SbsError::UnsupportedFloatMode(raw)),
        }
    }
}

impl From<FloatMode> for i32 {
    fn from(mode: FloatMode) -> Self {
        match mode {
            FloatMode::Auto => 0,
            FloatMode::Decimal => 1,
            FloatMode::Scientific => 2,
        }
    }
}

/// Concrete float notation after `Auto` resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notation {
    Decimal,
    Scientific,
}

/// Number of fractional digits to emit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    /// Smallest digit count (up to 14) that reproduces the value
    Auto,
    /// Exactly this many fractional digits (0..=254)
    Digits(u8),
}

impl Precision {
    /// Build a precision from its raw byte, 255 meaning Auto.
    pub const fn from_raw(raw: u8) -> Self {
        if raw == AUTO_PRECISION_RAW {
            Self::Auto
        } else {
            Self::Digits(raw)
        }
    }

    /// Raw byte form, inverse of [`Precision::from_raw`].
    pub const fn to_raw(self) -> u8 {
        match self {
            Self::Auto => AUTO_PRECISION_RAW,
            Self::Digits(digits) => digits,
        }
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self::Digits(2)
    }
}

/// Validate a raw integer base, logging rejected values.
pub fn select_int_base(raw: i32) -> Option<Radix> {
    match IntBase::try_from(raw) {
        Ok(base) => Some(base.resolve()),
        Err(err) => {
            trace!("Dropping int format request: {}", err);
            None
        }
    }
}

/// Validate a raw float mode, logging rejected values.
pub fn select_float_mode(raw: i32) -> Option<FloatMode> {
    match FloatMode::try_from(raw) {
        Ok(mode) => Some(mode),
        Err(err) => {
            trace!("Dropping float format request: {}", err);
            None
        }
    }
}
