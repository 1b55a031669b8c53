//! Parsing of the textual arguments shared by the command line and the echo
//! loop.
//!
//! Bases and float modes are resolved to their raw integer form so that every
//! request goes through the engine's raw-value validation: a named mode and
//! its number are interchangeable, and an out-of-range number prints nothing.

use sbs_core::console::Verbosity;
use sbs_core::fmt::{AUTO_PRECISION_RAW, FloatMode, IntBase, format_int_raw};
use sbs_core::{Text, math};

use crate::error::CliError;

/// Largest explicit digit count; larger requests are clamped to it.
const MAX_EXPLICIT_PRECISION: u32 = AUTO_PRECISION_RAW as u32 - 1;

/// Integer base by name (`auto`, `bin`, `oct`, `dec`, `hex`) or raw number.
pub fn parse_base(arg: &str) -> Result<i32, CliError> {
    let base = match arg {
        "auto" => IntBase::Auto,
        "bin" | "binary" => IntBase::Binary,
        "oct" | "octal" => IntBase::Octal,
        "dec" | "decimal" => IntBase::Decimal,
        "hex" | "hexadecimal" => IntBase::Hexadecimal,
        raw => return raw.parse().map_err(|_| CliError::invalid("base", raw)),
    };
    Ok(i32::from(base))
}

/// Float mode by name (`auto`, `dec`, `sci`) or raw number.
pub fn parse_mode(arg: &str) -> Result<i32, CliError> {
    let mode = match arg {
        "auto" => FloatMode::Auto,
        "dec" | "decimal" => FloatMode::Decimal,
        "sci" | "scientific" => FloatMode::Scientific,
        raw => return raw.parse().map_err(|_| CliError::invalid("float mode", raw)),
    };
    Ok(i32::from(mode))
}

/// Precision byte: `auto` or a digit count (clamped to 254).
pub fn parse_precision(arg: &str) -> Result<u8, CliError> {
    if arg == "auto" {
        return Ok(AUTO_PRECISION_RAW);
    }
    let digits: u32 = arg
        .parse()
        .map_err(|_| CliError::invalid("precision", arg))?;
    let clamped = math::clamp(digits, 0, MAX_EXPLICIT_PRECISION);
    if clamped != digits {
        log::warn!("Precision {} clamped to {}", digits, clamped);
    }
    Ok(clamped as u8)
}

/// Verbosity by name (`mute`, `error`, `warning`, `debug`) or level number.
pub fn parse_verbosity(arg: &str) -> Result<Verbosity, CliError> {
    match arg {
        "mute" => Ok(Verbosity::Mute),
        "error" => Ok(Verbosity::Error),
        "warning" => Ok(Verbosity::Warning),
        "debug" => Ok(Verbosity::Debug),
        raw => {
            let level: i32 = raw
                .parse()
                .map_err(|_| CliError::invalid("verbosity", raw))?;
            Ok(Verbosity::try_from(level)?)
        }
    }
}

/// Integer width in bits.
pub fn parse_width(arg: &str) -> Result<u32, CliError> {
    match arg {
        "8" | "16" | "32" | "64" => arg.parse().map_err(|_| CliError::invalid("width", arg)),
        _ => Err(CliError::invalid("width", arg)),
    }
}

/// Integer value parsed at its declared width and signedness
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntArg {
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
}

impl IntArg {
    pub fn parse(width: u32, signed: bool, value: &str) -> Result<Self, CliError> {
        let invalid = |_| CliError::invalid("integer value", value);
        let arg = match (width, signed) {
            (8, false) => Self::U8(value.parse().map_err(invalid)?),
            (16, false) => Self::U16(value.parse().map_err(invalid)?),
            (32, false) => Self::U32(value.parse().map_err(invalid)?),
            (64, false) => Self::U64(value.parse().map_err(invalid)?),
            (8, true) => Self::I8(value.parse().map_err(invalid)?),
            (16, true) => Self::I16(value.parse().map_err(invalid)?),
            (32, true) => Self::I32(value.parse().map_err(invalid)?),
            (64, true) => Self::I64(value.parse().map_err(invalid)?),
            _ => return Err(CliError::invalid("width", &width.to_string())),
        };
        Ok(arg)
    }

    /// Parse a width token of the echo loop: `8`..`64` (unsigned) or
    /// `u8`/`i8`..`u64`/`i64`.
    pub fn parse_typed(width: &str, value: &str) -> Result<Self, CliError> {
        let (signed, bits) = match width.as_bytes().first() {
            Some(b'i') => (true, &width[1..]),
            Some(b'u') => (false, &width[1..]),
            _ => (false, width),
        };
        Self::parse(parse_width(bits)?, signed, value)
    }

    pub fn format(self, raw_base: i32) -> Text {
        match self {
            Self::U8(v) => format_int_raw(v, raw_base),
            Self::U16(v) => format_int_raw(v, raw_base),
            Self::U32(v) => format_int_raw(v, raw_base),
            Self::U64(v) => format_int_raw(v, raw_base),
            Self::I8(v) => format_int_raw(v, raw_base),
            Self::I16(v) => format_int_raw(v, raw_base),
            Self::I32(v) => format_int_raw(v, raw_base),
            Self::I64(v) => format_int_raw(v, raw_base),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_base_names_and_raw() {
        assert_eq!(parse_base("hex").unwrap(), 4);
        assert_eq!(parse_base("auto").unwrap(), 0);
        assert_eq!(parse_base("2").unwrap(), 2);
        assert_eq!(parse_base("-1").unwrap(), -1, "raw values are not validated here");
        assert!(parse_base("base16").is_err());
    }

    #[test]
    fn test_parse_mode_names_and_raw() {
        assert_eq!(parse_mode("sci").unwrap(), 2);
        assert_eq!(parse_mode("dec").unwrap(), 1);
        assert_eq!(parse_mode("7").unwrap(), 7);
        assert!(parse_mode("fixed").is_err());
    }

    #[test]
    fn test_parse_precision() {
        assert_eq!(parse_precision("auto").unwrap(), 255);
        assert_eq!(parse_precision("3").unwrap(), 3);
        assert_eq!(parse_precision("1000").unwrap(), 254);
        assert!(parse_precision("-1").is_err());
    }

    #[test]
    fn test_parse_verbosity() {
        assert_eq!(parse_verbosity("debug").unwrap(), Verbosity::Debug);
        assert_eq!(parse_verbosity("0").unwrap(), Verbosity::Mute);
        assert!(matches!(
            parse_verbosity("9"),
            Err(CliError::Core(sbs_core::SbsError::UnsupportedVerbosity(9)))
        ));
    }

    #[test]
    fn test_int_arg_widths() {
        assert_eq!(IntArg::parse(8, true, "-27").unwrap().format(4), "e5");
        assert_eq!(IntArg::parse(16, false, "186").unwrap().format(2), "000272");
        assert_eq!(IntArg::parse(64, true, "-27").unwrap().format(3), "-27");
        assert!(IntArg::parse(8, false, "300").is_err(), "out of range for u8");
        assert!(IntArg::parse(12, false, "1").is_err());
    }

    #[test]
    fn test_int_arg_typed_width_tokens() {
        assert_eq!(IntArg::parse_typed("i8", "-1").unwrap(), IntArg::I8(-1));
        assert_eq!(IntArg::parse_typed("u16", "7").unwrap(), IntArg::U16(7));
        assert_eq!(IntArg::parse_typed("32", "7").unwrap(), IntArg::U32(7));
        assert!(IntArg::parse_typed("i7", "1").is_err());
        assert!(IntArg::parse_typed("", "1").is_err());
    }

    #[test]
    fn test_invalid_raw_base_formats_nothing() {
        let text = IntArg::U8(52).format(-1);
        assert!(text.is_empty());
    }
}
